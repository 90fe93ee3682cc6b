use crate::error::Result;
use crate::root::SourceRoot;
use lens_protocol::FileWindow;
use std::fs;
use std::path::Path;

const BINARY_SNIFF_BYTES: usize = 8 * 1024;

/// Read a file as text without ever failing.
///
/// I/O errors and binary content (a NUL byte in the first 8 KiB) give an
/// empty string; invalid UTF-8 is decoded lossily.
pub fn read_source_text(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => decode_source_bytes(bytes).unwrap_or_else(|| {
            log::debug!("Treating binary file {} as empty", path.display());
            String::new()
        }),
        Err(err) => {
            log::debug!("Treating unreadable file {} as empty: {err}", path.display());
            String::new()
        }
    }
}

/// `None` for binary content.
pub fn decode_source_bytes(bytes: Vec<u8>) -> Option<String> {
    let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
    if sniff.contains(&0) {
        return None;
    }
    Some(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// The first `max_chars` characters of `text`.
pub fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Read `line_count` lines of `relative` starting at the 1-based
/// `start_line` (values below 1 are treated as 1).
pub fn read_window(
    root: &SourceRoot,
    relative: &str,
    start_line: usize,
    line_count: usize,
) -> Result<FileWindow> {
    let full = root.resolve_file(relative)?;
    let text = read_source_text(&full);
    let lines: Vec<&str> = text.lines().collect();

    let start_line = start_line.max(1);
    let start_idx = (start_line - 1).min(lines.len());
    let end_idx = start_idx.saturating_add(line_count).min(lines.len());

    Ok(FileWindow {
        path: relative.to_string(),
        start_line,
        lines: lines[start_idx..end_idx]
            .iter()
            .map(|line| line.to_string())
            .collect(),
        total_lines: lines.len(),
    })
}
