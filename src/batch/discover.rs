//! Workbook discovery

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{BatchError, BatchResult};

/// Extension of the workbooks a batch run picks up
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Lists the workbooks directly inside `dir`, sorted by file name.
///
/// Office lock files (`~$name.xlsx`) and subdirectories are skipped.
pub fn discover_workbooks(dir: &Path) -> BatchResult<Vec<PathBuf>> {
    let discover_err = |source| BatchError::Discover {
        path: dir.to_path_buf(),
        source,
    };

    let mut workbooks = Vec::new();
    for entry in fs::read_dir(dir).map_err(discover_err)? {
        let path = entry.map_err(discover_err)?.path();
        if path.is_file() && is_workbook(&path) {
            workbooks.push(path);
        }
    }

    workbooks.sort();
    Ok(workbooks)
}

fn is_workbook(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION));
    let is_lock_file = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(true, |name| name.starts_with('~'));

    has_extension && !is_lock_file
}
