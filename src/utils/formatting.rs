//! Formatting utilities used for CLI outputs.

use crate::models::station::Station;

/// Short station description, e.g. "Pack (2 lanes)".
pub fn describe_station(s: &Station) -> String {
    match s.lanes {
        0 => s.name.clone(),
        1 => format!("{} (1 lane)", s.name),
        n => format!("{} ({} lanes)", s.name, n),
    }
}
