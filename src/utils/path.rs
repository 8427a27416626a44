//! Path utilities: expand ~ in configured paths.

use std::path::PathBuf;

/// `~` and `~/...` resolve against the home directory; anything else is
/// taken literally.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path {
        "~" => Some(""),
        p => p.strip_prefix("~/"),
    };

    match (rest, dirs::home_dir()) {
        (Some(r), Some(home)) => home.join(r),
        _ => PathBuf::from(path),
    }
}
