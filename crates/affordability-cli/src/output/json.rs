use serde_json::Value;

/// Render the value as indented JSON on stdout.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("could not render JSON: {}", e),
    }
}
