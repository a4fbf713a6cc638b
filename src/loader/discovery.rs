//! Route module discovery on disk
//!
//! Files directly inside the base directory and files exactly one
//! subdirectory down are candidates. Anything deeper is never visited.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A candidate module file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredModule {
    pub path: PathBuf,
    /// Path relative to the base directory, `/`-separated
    pub relative: String,
}

/// Result of scanning the base directory
#[derive(Debug, Default)]
pub struct Discovery {
    /// Modules sorted lexicographically by relative path
    pub modules: Vec<DiscoveredModule>,
    /// Entries that could not be inspected, with the reason
    pub unreadable: Vec<(String, io::Error)>,
}

/// Scan `dir` for module files with one of `extensions`.
///
/// Fails only when `dir` itself cannot be listed; problems with individual
/// entries are collected in [`Discovery::unreadable`].
pub fn discover(dir: &Path, extensions: &[String]) -> io::Result<Discovery> {
    if !fs::metadata(dir)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is not a directory", dir.display()),
        ));
    }

    let mut discovery = Discovery::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(2)
        .follow_links(true);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                let relative = e
                    .path()
                    .map(|path| relative_name(dir, path))
                    .unwrap_or_else(|| dir.display().to_string());
                discovery.unreadable.push((relative, e.into()));
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            discovery.modules.push(DiscoveredModule {
                relative: relative_name(dir, entry.path()),
                path: entry.into_path(),
            });
        }
    }

    discovery.modules.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(discovery)
}

fn relative_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Case-insensitive extension match
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map_or(false, |ext| {
            extensions.iter().any(|known| known.eq_ignore_ascii_case(ext))
        })
}
