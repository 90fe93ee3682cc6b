use crate::config::OutlineConfig;
use crate::error::Result;
use crate::language::Language;
use crate::structure::extract_file_structure;
use lens_indexer::{read_source_text, SourceRoot};
use lens_protocol::FileExplanation;
use std::path::Path;

/// Lines shown under "Preview".
pub const PREVIEW_LINES: usize = 25;

/// Outline `relative` (under `root`) with the rules for its extension.
pub fn explain_file(
    root: &SourceRoot,
    relative: &str,
    config: &OutlineConfig,
) -> Result<FileExplanation> {
    let full = root.resolve_file(relative)?;
    let text = read_source_text(&full);
    Ok(explain_text(relative, &text, config.max_structure_lines))
}

/// Outline already-read text. `path` only picks the language and labels the
/// result.
pub fn explain_text(path: &str, text: &str, max_structure_lines: usize) -> FileExplanation {
    let extension = Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let language = Language::from_path(path);
    let lines: Vec<&str> = text.lines().collect();

    FileExplanation {
        path: path.to_string(),
        language: language.as_str().to_string(),
        extension,
        total_lines: lines.len(),
        summary: extract_file_structure(text, language, max_structure_lines),
        preview: lines
            .iter()
            .take(PREVIEW_LINES)
            .map(|line| line.to_string())
            .collect(),
    }
}
