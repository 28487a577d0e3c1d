//! Source file discovery.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use plugmerge_config::MergeConfig;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Build output directories never scanned.
const SKIPPED_DIRS: [&str; 2] = ["obj", "bin"];

/// A source file and the input root it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub root: PathBuf,
}

impl ScannedFile {
    pub fn new(path: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: root.into(),
        }
    }
}

/// Finds the `*.cs` files of a merge.
#[derive(Debug, Clone, Default)]
pub struct FileScanner {
    inputs: Vec<PathBuf>,
    ignore_paths: Vec<PathBuf>,
    ignore_files: Vec<PathBuf>,
}

impl FileScanner {
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            ..Self::default()
        }
    }

    /// Scanner for the configured inputs. Output directories are ignored too.
    pub fn from_config(merge: &MergeConfig) -> Self {
        Self::new(merge.input_paths.clone())
            .with_ignore_paths(merge.ignore_paths.iter().chain(&merge.output_paths).cloned())
            .with_ignore_files(merge.ignore_files.iter().cloned())
    }

    /// Skip everything under these directories.
    pub fn with_ignore_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.ignore_paths.extend(paths);
        self
    }

    /// Skip these exact files.
    pub fn with_ignore_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.ignore_files.extend(files);
        self
    }

    /// Scan every input root.
    ///
    /// Files are sorted by path (component-wise) within each root and
    /// reported once even when roots overlap.
    pub fn scan(&self) -> Vec<ScannedFile> {
        let mut seen = HashSet::new();
        let mut scanned = Vec::new();
        for root in &self.inputs {
            if !root.is_dir() {
                warn!("Input path does not exist: {}", root.display());
                continue;
            }

            let mut files = self.scan_root(root);
            files.sort();
            debug!("Found {} files in {}", files.len(), root.display());
            scanned.extend(
                files
                    .into_iter()
                    .filter(|path| seen.insert(path.clone()))
                    .map(|path| ScannedFile::new(path, root)),
            );
        }
        scanned
    }

    fn scan_root(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_skipped_dir(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(|path| is_source_file(path) && !self.ignore_files.contains(path))
            .collect()
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let build_dir = entry.depth() > 0
            && SKIPPED_DIRS
                .iter()
                .any(|name| entry.file_name() == std::ffi::OsStr::new(name));
        build_dir || self.ignore_paths.iter().any(|p| entry.path().starts_with(p))
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "cs")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "class A { }").unwrap();
        path
    }

    fn relative(root: &Path, files: &[ScannedFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_scan_sorted_sources_only() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "b.cs");
        touch(root, "a/z.cs");
        touch(root, "a/readme.md");
        touch(root, "a.cs");

        let files = FileScanner::new(vec![root.to_path_buf()]).scan();
        assert_eq!(relative(root, &files), vec!["a/z.cs", "a.cs", "b.cs"]);
        assert!(files.iter().all(|f| f.root == root));
    }

    #[test]
    fn test_scan_skips_build_and_ignored_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "src/Plugin.cs");
        touch(root, "obj/Debug/Generated.cs");
        touch(root, "src/bin/Out.cs");
        touch(root, "build/Merged.cs");
        touch(root, "skip/Skipped.cs");
        let ignored = touch(root, "src/Ignored.cs");

        let files = FileScanner::new(vec![root.to_path_buf()])
            .with_ignore_paths([root.join("build"), root.join("skip")])
            .with_ignore_files([ignored])
            .scan();
        assert_eq!(relative(root, &files), vec!["src/Plugin.cs"]);
    }

    #[test]
    fn test_scan_missing_root_is_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.cs");

        let inputs = vec![temp.path().join("missing"), temp.path().to_path_buf()];
        let files = FileScanner::new(inputs).scan();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_overlapping_roots_report_once() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "sub/a.cs");

        let files = FileScanner::new(vec![root.to_path_buf(), root.join("sub")]).scan();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].root, root);
    }

    #[test]
    fn test_from_config_ignores_outputs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        touch(root, "Plugin.cs");
        touch(root, "out/Plugin.cs");

        let merge = MergeConfig {
            input_paths: vec![root.to_path_buf()],
            output_paths: vec![root.join("out")],
            ignore_paths: vec![],
            ignore_files: vec![],
            ..MergeConfig::default()
        };
        let files = FileScanner::from_config(&merge).scan();
        assert_eq!(relative(root, &files), vec!["Plugin.cs"]);
    }
}
