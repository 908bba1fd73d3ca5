//! Which project the assistant is working in.

use std::path::{Path, PathBuf};

pub const PROJECT_DIR_VAR: &str = "CLAUDE_PROJECT_DIR";

/// `CLAUDE_PROJECT_DIR`, falling back to the current directory.
pub fn project_dir() -> std::io::Result<PathBuf> {
    match std::env::var_os(PROJECT_DIR_VAR) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => std::env::current_dir(),
    }
}

/// Final path component, or the whole path when there is none (e.g. `/`).
pub fn project_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}
