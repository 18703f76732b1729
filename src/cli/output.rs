//! Output formatting and progress spinners for the CLI

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::search::Value;

/// Create a spinner for a running search
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a duration in seconds with microsecond precision
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.6} s", elapsed.as_secs_f64())
}

/// Format a search value, marking proven wins and losses
pub fn format_value(value: Value) -> String {
    if value.is_proven() {
        format!("{value} (proven)")
    } else {
        value.to_string()
    }
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}
