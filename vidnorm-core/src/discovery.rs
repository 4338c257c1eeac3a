//! File discovery module for finding candidate input files.
//!
//! Lists the regular files at the top level of the input directory. No
//! extension filter is applied: whether a file is video is decided by probing
//! it, not by its name.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Lists regular files directly inside `input_dir`, sorted by file name.
///
/// Subdirectories are skipped and not descended into. Symlinks are followed
/// when deciding whether an entry is a file. An empty directory yields an
/// empty list.
///
/// # Examples
///
/// ```rust,no_run
/// use vidnorm_core::find_candidate_files;
/// use std::path::Path;
///
/// let files = find_candidate_files(Path::new("/path/to/videos")).unwrap();
/// println!("Found {} candidate files", files.len());
/// ```
pub fn find_candidate_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to read input directory '{}': {}",
            input_dir.display(),
            e
        ))
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", input_dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    // read_dir order is platform dependent
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_lists_top_level_files_sorted() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.mkv")).unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        File::create(dir.path().join("C.mp4")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        File::create(dir.path().join("nested").join("deep.mkv")).unwrap();

        let files = find_candidate_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["C.mp4", "a.txt", "b.mkv"]);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(find_candidate_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let result = find_candidate_files(Path::new("surely_this_does_not_exist_42"));
        assert!(matches!(result, Err(CoreError::PathError(_))));
    }
}
