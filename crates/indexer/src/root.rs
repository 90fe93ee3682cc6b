use crate::error::{IndexerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A directory that bounds a scan.
///
/// Holds only the path; existence is re-checked by [`SourceRoot::revalidate`]
/// before every operation because the tree may change between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    path: PathBuf,
}

impl SourceRoot {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        check_dir(path)?;
        let path = fs::canonicalize(path).map_err(|err| IndexerError::io(path, err))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last path component, used to name reports.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn revalidate(&self) -> Result<()> {
        check_dir(&self.path)
    }

    /// Resolve `relative` to an existing regular file under this root.
    pub fn resolve_file(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        self.revalidate()?;
        let full = self.path.join(relative.as_ref());
        let meta = match fs::metadata(&full) {
            Ok(meta) => meta,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(IndexerError::NotFound(full));
            }
            Err(err) => return Err(IndexerError::io(full, err)),
        };
        if !meta.is_file() {
            return Err(IndexerError::NotAFile(full));
        }
        Ok(full)
    }
}

pub(crate) fn relative_display(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

fn check_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(IndexerError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(IndexerError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_root_is_not_found() {
        let temp = tempdir().unwrap();
        let err = SourceRoot::open(temp.path().join("nope")).unwrap_err();
        assert!(matches!(err, IndexerError::NotFound(_)));
    }

    #[test]
    fn file_root_is_not_a_directory() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("main.py");
        fs::write(&file, "print(1)").unwrap();
        let err = SourceRoot::open(&file).unwrap_err();
        assert!(matches!(err, IndexerError::NotADirectory(_)));
    }

    #[test]
    fn resolve_file_distinguishes_missing_and_directories() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("pkg")).unwrap();
        fs::write(temp.path().join("pkg/app.py"), "x = 1").unwrap();
        let root = SourceRoot::open(temp.path()).unwrap();

        assert!(root.resolve_file("pkg/app.py").is_ok());
        assert!(matches!(
            root.resolve_file("pkg/missing.py"),
            Err(IndexerError::NotFound(_))
        ));
        assert!(matches!(
            root.resolve_file("pkg"),
            Err(IndexerError::NotAFile(_))
        ));
    }

    #[test]
    fn revalidate_notices_removed_root() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("repo");
        fs::create_dir_all(&dir).unwrap();
        let root = SourceRoot::open(&dir).unwrap();
        assert_eq!(root.name(), "repo");
        fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(root.revalidate(), Err(IndexerError::NotFound(_))));
    }
}
