use crate::root::relative_display;
use crate::text::read_source_text;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Which files a scan recognises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Extensions without the leading dot, matched case-insensitively.
    pub extensions: Vec<String>,

    /// Descend into dot-directories and list dot-files.
    pub include_hidden: bool,

    /// Honour `.gitignore` / `.ignore` files (also outside git checkouts).
    pub respect_ignore_files: bool,

    /// Directory names never descended into.
    pub ignored_dirs: Vec<String>,

    /// Files larger than this are skipped. Unbounded when unset.
    pub max_file_size_bytes: Option<u64>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            include_hidden: false,
            respect_ignore_files: true,
            ignored_dirs: IGNORED_DIRS.iter().map(|dir| dir.to_string()).collect(),
            max_file_size_bytes: None,
        }
    }
}

impl ScanOptions {
    /// Default options restricted to `extensions`.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.extensions.iter().all(|ext| normalize_extension(ext).is_empty()) {
            return Err("scan.extensions must name at least one extension".to_string());
        }
        if self.max_file_size_bytes == Some(0) {
            return Err("scan.max_file_size_bytes must be > 0".to_string());
        }
        Ok(())
    }

    pub fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = extension_of(path) else {
            return false;
        };
        self.extensions
            .iter()
            .any(|candidate| normalize_extension(candidate) == ext)
    }

    fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(name))
    }
}

/// A recognised file found by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFile {
    /// Relative to the scan root, `/`-separated.
    pub relative: String,
    #[serde(skip)]
    pub absolute: PathBuf,
    /// Lower-cased, without the dot.
    pub extension: String,
}

impl CodeFile {
    /// Whole-file text; empty when the file is unreadable or binary.
    pub fn read_text(&self) -> String {
        read_source_text(&self.absolute)
    }
}

/// Scanner for finding source files under a root
pub struct FileScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_options(root, ScanOptions::default())
    }

    pub fn with_options(root: impl AsRef<Path>, options: ScanOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options,
        }
    }

    /// Recursively list recognised files, sorted by name within each
    /// directory. A missing or non-directory root yields nothing.
    pub fn scan(&self) -> Vec<CodeFile> {
        if !self.root.is_dir() {
            log::debug!("Scan root {} is not a directory", self.root.display());
            return Vec::new();
        }

        let mut files = Vec::new();
        let respect = self.options.respect_ignore_files;

        let root = self.root.clone();
        let ignored = self.options.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(!self.options.include_hidden)
            .ignore(respect)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .parents(false)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && Self::is_ignored_scope(entry.path(), &root, &ignored))
        });

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.options.accepts(path) {
                        continue;
                    }

                    if let Some(limit) = self.options.max_file_size_bytes {
                        if let Ok(meta) = entry.metadata() {
                            if meta.len() > limit {
                                log::debug!(
                                    "Skipping large file {} ({} bytes > {limit})",
                                    path.display(),
                                    meta.len()
                                );
                                continue;
                            }
                        }
                    }

                    let Some(relative) = relative_display(&self.root, path) else {
                        continue;
                    };
                    files.push(CodeFile {
                        relative,
                        absolute: path.to_path_buf(),
                        extension: extension_of(path).unwrap_or_default(),
                    });
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::info!(
            "Found {} code files under {}",
            files.len(),
            self.root.display()
        );
        files
    }

    fn is_ignored_scope(path: &Path, root: &Path, options: &ScanOptions) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let Component::Normal(name) = component {
                    if options.is_ignored_dir(&name.to_string_lossy()) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// Shorthand for `FileScanner::with_options(root, options).scan()`.
pub fn list_code_files(root: impl AsRef<Path>, options: &ScanOptions) -> Vec<CodeFile> {
    FileScanner::with_options(root, options.clone()).scan()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_ascii_lowercase()
}

const IGNORED_DIRS: &[&str] = &[".git", "node_modules", "target", "__pycache__", ".venv"];

const DEFAULT_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "tsx", "jsx", "rs", "go", "java", "cpp", "c", "h", "hpp",
];
