use std::env;
use std::io;
use std::path::{Path, PathBuf};

pub mod settings;

pub use settings::{Cache, Executor, Logger, Settings};

fn project_root() -> io::Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        // development and testing environments
        Ok(PathBuf::from(manifest_dir))
    } else {
        // runtime root relative path `folder/executable` -> `folder/`
        let exe = env::current_exe()?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))
    }
}

/// Resolve `~/` against the project root, keep any other path as given
pub fn normalize_path(path: &str) -> io::Result<PathBuf> {
    match path.strip_prefix("~/") {
        Some(relative) => Ok(project_root()?.join(relative)),
        None => Ok(PathBuf::from(path)),
    }
}
