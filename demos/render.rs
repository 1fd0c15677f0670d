//! Render a chart file (or a built-in sample) to SVG on stdout.
//!
//! Run with `RUST_LOG=ganttline=debug` and `--features tracing` to see routing
//! decisions.

use tracing_subscriber::EnvFilter;

const SAMPLE: &str = r#"window = 7
task C from 2024-11-12 to 2024-11-16 progress 50%
task A from 2024-11-07 to 2024-11-12 progress 60%
task D from 2024-11-06 to 2024-11-14 progress 20%
task E from 2024-11-07 to 2024-11-14 progress 70%
task B from 2024-11-03 to 2024-11-10 progress 30%
B -> C
scroll x 2024-11-02
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (name, input) = match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path).expect("Failed to read file");
            (path, source)
        }
        None => ("<sample>".to_string(), SAMPLE.to_string()),
    };

    match ganttline::gantt_named(&name, &input) {
        Ok(svg) => println!("{}", svg),
        Err(e) => eprintln!("{:?}", e),
    }
}
