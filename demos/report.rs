//! Print a JSON report of one simulation.
//!
//! Run with: cargo run --example report -- '<format>' '<input>'

use scanf_sim::{parse_format, simulate};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let format = args.next().unwrap_or_else(|| "%2$s %1$d%n".to_string());
    let input = args.next().unwrap_or_else(|| "42 answer".to_string());

    let directives = parse_format(&format)?;
    let result = simulate(&input, &directives)?;

    let report = serde_json::json!({
        "format": format,
        "input": input,
        "directives": directives,
        "result": result,
        "declarations": result.declarations("arg"),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
