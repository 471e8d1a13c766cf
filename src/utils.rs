use clap::ValueEnum;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// How far below a given directory to look for files.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recursion {
    /// Only the files directly inside the directory.
    None,
    /// One level of subdirectories.
    #[default]
    Once,
    All,
}

impl Recursion {
    fn max_depth(self) -> usize {
        match self {
            Self::None => 1,
            Self::Once => 2,
            Self::All => usize::MAX,
        }
    }
}

/// Checks if a directory entry is hidden (starts with '.').
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|s| s.starts_with('.'))
}

fn is_excluded(path: &Path, excluded_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            excluded_extensions
                .iter()
                .any(|excluded| excluded.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}

/// Lists the files under each root, in sorted order per root.
///
/// A root that is itself a file is listed as given. Hidden entries below a root are
/// skipped, as are files whose extension is in `excluded_extensions` (case-insensitive,
/// with or without a leading dot). Paths reached twice are listed once.
pub fn list_media_files(
    roots: &[PathBuf],
    recursion: Recursion,
    excluded_extensions: &[String],
) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for root in roots {
        for entry in WalkDir::new(root)
            .max_depth(recursion.max_depth())
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry?;
            if entry.file_type().is_file() && !is_excluded(entry.path(), excluded_extensions) {
                files.push(entry.into_path());
            }
        }
    }
    let mut seen = std::collections::HashSet::new();
    files.retain(|path| seen.insert(path.clone()));
    Ok(files)
}
