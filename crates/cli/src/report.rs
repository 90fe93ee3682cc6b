use lens_protocol::{
    DeclarationKind, DefinitionMatch, FileExplanation, FileWindow, Highlight, RouteEntry,
    ScoredResult,
};
use std::fmt::Write as _;
use std::path::Path;

const RULE_WIDTH: usize = 60;
const MAX_IMPORTS: usize = 8;
const MAX_TYPES: usize = 5;
const MAX_FUNCTIONS: usize = 8;
pub const MAX_DEFINITIONS: usize = 10;

pub fn render_repositories(clone_root: &Path, repos: &[String]) -> String {
    if repos.is_empty() {
        return format!(
            "No repositories found in {}. Clone a repo first!",
            clone_root.display()
        );
    }
    let mut out = format!("Available repositories ({}):\n", repos.len());
    for repo in repos {
        let _ = writeln!(out, "  - {repo}");
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_files(root_name: &str, files: &[String]) -> String {
    if files.is_empty() {
        return format!("No code files found in '{root_name}'.");
    }
    let mut out = format!("Code files in '{root_name}' ({}):\n", files.len());
    for file in files {
        let _ = writeln!(out, "  {file}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Numbered list with bracketed matches; `styled` additionally colours them.
pub fn render_search(
    query: &str,
    results: &[ScoredResult],
    max_results: usize,
    styled: bool,
) -> String {
    if results.is_empty() {
        return format!("No files found matching '{query}'.");
    }
    let shown = &results[..results.len().min(max_results)];
    let mut out = format!(
        "Fuzzy search results for '{query}' ({} matches):\n\n",
        shown.len()
    );
    for (idx, result) in shown.iter().enumerate() {
        let path = match &result.highlight {
            Some(highlight) => render_highlight(highlight, styled),
            None => result.path.clone(),
        };
        let _ = writeln!(out, "  {}. {path} (score: {:.2})", idx + 1, result.score);
    }
    if results.len() > max_results {
        let _ = write!(out, "\n... and {} more matches", results.len() - max_results);
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_highlight(highlight: &Highlight, styled: bool) -> String {
    if !styled {
        return highlight.to_string();
    }
    highlight.render_with(|run| {
        console::style(format!("[{run}]"))
            .cyan()
            .bold()
            .to_string()
    })
}

pub fn render_recommendations(description: &str, results: &[ScoredResult]) -> String {
    if results.is_empty() {
        return format!("No files look relevant to '{description}'.");
    }
    let mut out = format!("Recommended files for: '{description}'\n\n");
    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} (relevance: {:.1})",
            idx + 1,
            result.path,
            result.score
        );
    }
    out.push_str("\nUse `context-lens explain <file>` to learn what each file does.");
    out
}

pub fn render_explanation(explanation: &FileExplanation) -> String {
    let mut lines = vec![
        explanation.path.clone(),
        "=".repeat(RULE_WIDTH),
        format!(
            "Lines: {} | Language: {} | Extension: {}",
            explanation.total_lines,
            explanation.language,
            display_extension(&explanation.extension)
        ),
        String::new(),
    ];

    let summary = &explanation.summary;
    if !summary.imports.is_empty() {
        lines.push("Imports:".to_string());
        lines.extend(
            summary
                .imports
                .iter()
                .take(MAX_IMPORTS)
                .map(|import| format!("  - {import}")),
        );
        lines.push(String::new());
    }
    if !summary.types.is_empty() {
        lines.push("Types:".to_string());
        lines.extend(
            summary
                .types
                .iter()
                .take(MAX_TYPES)
                .map(|decl| format!("  - {} (line {})", decl.name, decl.line)),
        );
        lines.push(String::new());
    }
    if !summary.functions.is_empty() {
        lines.push("Functions:".to_string());
        lines.extend(
            summary
                .functions
                .iter()
                .take(MAX_FUNCTIONS)
                .map(|decl| format!("  - {}() (line {})", decl.name, decl.line)),
        );
        lines.push(String::new());
    }

    lines.push(format!("Preview (first {} lines):", lens_outline::PREVIEW_LINES));
    lines.push("-".repeat(RULE_WIDTH));
    lines.extend(explanation.preview.iter().cloned());
    let remaining = explanation.remaining();
    if remaining > 0 {
        lines.push(format!("\n... ({remaining} more lines)"));
    }
    lines.join("\n")
}

pub fn render_window(window: &FileWindow) -> String {
    if window.lines.is_empty() {
        return format!(
            "{} has {} lines; nothing to show from line {}.",
            window.path, window.total_lines, window.start_line
        );
    }
    let mut out = format!(
        "{} (lines {}-{}):\n",
        window.path,
        window.start_line,
        window.end_line()
    );
    for (offset, line) in window.lines.iter().enumerate() {
        let _ = writeln!(out, "{:4} | {line}", window.start_line + offset);
    }
    let remaining = window.remaining();
    if remaining > 0 {
        let _ = write!(out, "\n... ({remaining} more lines)");
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_definitions(
    kind: DeclarationKind,
    query: &str,
    root_name: &str,
    matches: &[DefinitionMatch],
) -> String {
    let (singular, plural) = match kind {
        DeclarationKind::Function => ("Function", "functions"),
        DeclarationKind::Type => ("Type", "types"),
    };
    if matches.is_empty() {
        return format!("{singular} matching '{query}' not found in '{root_name}'.");
    }
    let mut out = format!(
        "Found {plural} matching '{query}' ({} locations):\n\n",
        matches.len()
    );
    for found in matches.iter().take(MAX_DEFINITIONS) {
        let _ = writeln!(out, "  {}:{}", found.file, found.line);
        let _ = writeln!(out, "     {}\n", found.text);
    }
    if matches.len() > MAX_DEFINITIONS {
        let _ = write!(out, "... and {} more", matches.len() - MAX_DEFINITIONS);
    }
    out.truncate(out.trim_end().len());
    out
}

/// Markdown API reference for one repository.
pub fn render_api_doc(repo_name: &str, repo_path: &Path, routes: &[RouteEntry]) -> String {
    let mut lines = vec![
        format!("# API Documentation for {repo_name}"),
        format!("Repo path: {}", repo_path.display()),
        String::new(),
        "## Endpoints".to_string(),
    ];
    if routes.is_empty() {
        lines.push("No endpoints detected.".to_string());
    } else {
        lines.push("| Method | Path | File | Notes |".to_string());
        lines.push("| --- | --- | --- | --- |".to_string());
        for route in routes {
            lines.push(format!(
                "| {} | {} | {}:{} | {} |",
                route.method,
                escape_cell(&route.path),
                escape_cell(&route.file),
                route.line,
                escape_cell(&route.text)
            ));
        }
    }
    lines.join("\n")
}

fn display_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{extension}")
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
