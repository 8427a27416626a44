/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Need coverage color:
/// filled → green
/// short → red
/// no need → grey
pub fn color_for_coverage(placed: usize, needed: u32) -> &'static str {
    if needed == 0 {
        GREY
    } else if placed >= needed as usize {
        GREEN
    } else {
        RED
    }
}

/// Grey "--" for empty cells.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}--{RESET}")
    } else {
        value.to_string()
    }
}
