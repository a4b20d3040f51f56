//! Simulate a few `sscanf` calls and print what they would store.
//!
//! Run with: cargo run --example simple

use scanf_sim::sscanf;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let calls = [
        ("%d-%d-%d", "2024-06-30"),
        ("%s %u %lf", "widget 42 9.75"),
        ("%ms %[^\n]", "name rest of the line"),
        ("%3$s %1$d %2$c", "word 7 x"),
        ("%d %d", "12 abc"),
        ("%d", "   "),
    ];

    for (format, input) in calls {
        let result = sscanf(format, input)?;
        println!("sscanf({:?}, {:?}) = {}", input, format, result.ret);
        println!("  consumed {} of {} bytes", result.length, input.len());

        for conv in result.convs.iter().filter(|conv| conv.matched.is_some()) {
            let spelled = &format[conv.start..conv.end];
            match conv.position.index().and_then(|p| result.args.get(p).map(|arg| (p, arg))) {
                Some((position, arg)) => {
                    println!("  {:<8} {}", spelled, arg.declaration(&format!("v{}", position)))
                }
                None => println!("  {:<8} (discarded)", spelled),
            }
        }
        for conv in result.unmatched() {
            println!("  {:<8} (not reached)", &format[conv.start..conv.end]);
        }
        println!();
    }

    match sscanf("%p", "0x10") {
        Ok(_) => println!("%p was simulated"),
        Err(err) => println!("%p: {}", err),
    }

    Ok(())
}
