use pest::Parser;
use ganttline::{GanttParser, Rule};

fn main() {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| r#"task "Write docs" from 2024-11-01 to 2024-11-05 row 2 progress 40%"#.to_string());

    println!("Parsing: {}", input);
    println!();

    match GanttParser::parse(Rule::statement, &input) {
        Ok(pairs) => {
            println!(
                "{}",
                pest_ascii_tree::into_ascii_tree(pairs.clone()).unwrap()
            );
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
        }
    }
}
