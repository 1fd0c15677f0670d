use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery [dir]    Render every .gantt chart into an HTML gallery");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => gallery(args.get(2).map(Utf8PathBuf::from)),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// One rendered chart: file name, source and SVG or error text.
struct Rendered {
    name: String,
    source: String,
    output: Result<String, String>,
}

fn gallery(dir: Option<Utf8PathBuf>) {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let charts_dir = dir.unwrap_or_else(|| manifest_dir.join("../tests/charts"));
    let output_path = manifest_dir.join("../gallery.html");

    let mut paths: Vec<Utf8PathBuf> = fs::read_dir(&charts_dir)
        .expect("Failed to read charts directory")
        .filter_map(|e| e.ok())
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .filter(|p| p.extension() == Some("gantt"))
        .collect();
    paths.sort();

    // Charts are independent; render them in parallel.
    let results: Vec<Rendered> = paths
        .par_iter()
        .map(|path| {
            let name = path.file_name().unwrap_or(path.as_str()).to_string();
            let source = fs::read_to_string(path).unwrap_or_default();
            let output = ganttline::gantt_named(&name, &source).map_err(|e| format!("{:?}", e));
            Rendered {
                name,
                source,
                output,
            }
        })
        .collect();

    let failed = results.iter().filter(|r| r.output.is_err()).count();

    let mut html = String::new();
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>ganttline gallery</title>
    <style>
        body {{
            font-family: system-ui, sans-serif;
            margin: 0;
            padding: 24px;
            background: #eee;
            color: #333;
        }}
        h1 {{
            font-weight: 600;
            font-size: 20px;
            margin: 0 0 24px 0;
        }}
        .chart-card {{
            background: white;
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.08);
            margin-bottom: 16px;
            padding: 12px 16px;
        }}
        .chart-title {{
            font-weight: 600;
            font-size: 13px;
        }}
        .error {{
            color: #b00020;
            white-space: pre-wrap;
            font-family: ui-monospace, monospace;
        }}
        .source {{
            white-space: pre;
            font-family: ui-monospace, monospace;
            font-size: 12px;
            background: #fafafa;
            padding: 8px;
        }}
    </style>
</head>
<body>
<h1>{} charts, {} failed</h1>
"#,
        results.len(),
        failed
    ));

    for r in &results {
        let content = match &r.output {
            Ok(svg) => svg.clone(),
            Err(e) => format!(r#"<div class="error">{}</div>"#, html_escape(e)),
        };
        html.push_str(&format!(
            r#"<div class="chart-card" id="{}">
    <div class="chart-title">{}</div>
    <div class="svg-container">{}</div>
    <details>
        <summary>Source</summary>
        <div class="source">{}</div>
    </details>
</div>
"#,
            r.name,
            r.name,
            content,
            html_escape(&r.source),
        ));
    }

    html.push_str("</body></html>\n");

    fs::write(&output_path, html).expect("Failed to write HTML");
    println!("Generated gallery at: {}", output_path);
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
