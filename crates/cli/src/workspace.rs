use crate::config::LensConfig;
use lens_indexer::{IndexerError, Result, SourceRoot};
use std::fs;
use std::path::{Path, PathBuf};

/// Pick the directory a command operates on: `--folder` wins, then
/// `--repo` under the clone root, then the clone root itself.
pub fn resolve_target(
    config: &LensConfig,
    folder: Option<&str>,
    repo: Option<&str>,
) -> Result<SourceRoot> {
    let dir = match (folder, repo) {
        (Some(folder), _) => expand_home(folder),
        (None, Some(repo)) => config.clone_root.join(repo),
        (None, None) => config.clone_root.clone(),
    };
    log::debug!("Target directory: {}", dir.display());
    SourceRoot::open(dir)
}

/// Non-hidden immediate subdirectories of `clone_root`, sorted by name.
pub fn list_repositories(clone_root: &Path) -> Result<Vec<String>> {
    let root = SourceRoot::open(clone_root)?;
    let entries = fs::read_dir(root.path()).map_err(|err| IndexerError::io(root.path(), err))?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {err}", root.path().display());
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if entry.path().is_dir() {
            repos.push(name);
        }
    }
    repos.sort();
    Ok(repos)
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
