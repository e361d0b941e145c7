pub mod check;
pub mod facts;

use std::path::PathBuf;

/// Explicit root, or the current directory.
pub(crate) fn resolve_root(root: Option<PathBuf>, command: &str) -> Option<PathBuf> {
    match root {
        Some(p) => Some(p),
        None => match std::env::current_dir() {
            Ok(p) => Some(p),
            Err(e) => {
                eprintln!("switchcheck {command}: failed to get current directory: {e}");
                None
            }
        },
    }
}
