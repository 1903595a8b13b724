//! Replays a keypad session against the in-memory display
//!
//! Run with: `RUST_LOG=webcalc=trace cargo run --example keypad_session`

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use webcalc::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut calc = Calculator::new(RecordingDisplay::new());

    println!("=== Webcalc keypad session ===\n");

    let session: &[(&str, &[&str])] = &[
        ("Precedence", &["2", "+", "3", "*", "4", "Enter"]),
        ("Chained from result", &["/", "7", "Enter"]),
        ("Division by zero", &["/", "0", "Enter"]),
        ("Correction", &["Backspace", "2", "Enter"]),
    ];

    for (label, keys) in session {
        for key in *keys {
            calc.press_key(key);
        }
        report(label, &calc);
    }

    calc.press_button(Some("clear"), "C");
    calc.press_button(None, "9");
    calc.press_button(Some("sqrt"), "√");
    calc.press_button(Some("calculate"), "=");
    report("Square root", &calc);

    calc.press_key("Backspace");
    for key in ["5", "0"] {
        calc.press_key(key);
    }
    calc.press_button(Some("percent"), "%");
    calc.press_key("Enter");
    report("Percent", &calc);

    calc.sink_mut().advance(Duration::from_secs(2));

    println!("History (newest first):");
    for line in calc.sink().history() {
        println!("  {line}");
    }
}

fn report(label: &str, calc: &Calculator<RecordingDisplay>) {
    println!("{label}:");
    println!("  display: {}", calc.sink().display());
    if let Some(error) = calc.sink().error() {
        println!("  error:   {error}");
    }
    println!();
}
