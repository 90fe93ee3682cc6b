//! Result types shared by the context-lens crates.
//!
//! Everything here is plain data: scanners, extractors and rankers produce
//! these values, the CLI renders or serializes them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dimensionless relevance value. `0.0` means "no match"; only comparable
/// within a single scoring run.
pub type MatchScore = f64;

/// A candidate string with the character positions a query matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    /// Sorted, de-duplicated char indices into `text`.
    pub matched: Vec<usize>,
}

impl Highlight {
    pub fn new(text: impl Into<String>, mut matched: Vec<usize>) -> Self {
        matched.sort_unstable();
        matched.dedup();
        Self {
            text: text.into(),
            matched,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Split `text` into maximal runs of matched / unmatched characters.
    pub fn segments(&self) -> Vec<(bool, String)> {
        let mut segments: Vec<(bool, String)> = Vec::new();
        let mut cursor = self.matched.iter().peekable();
        for (idx, ch) in self.text.chars().enumerate() {
            let is_match = cursor.peek().is_some_and(|&&m| m == idx);
            if is_match {
                cursor.next();
            }
            match segments.last_mut() {
                Some((flag, run)) if *flag == is_match => run.push(ch),
                _ => segments.push((is_match, ch.to_string())),
            }
        }
        segments
    }

    /// Render with a caller-provided decoration for matched runs.
    pub fn render_with(&self, mut decorate: impl FnMut(&str) -> String) -> String {
        self.segments()
            .into_iter()
            .map(|(is_match, run)| if is_match { decorate(&run) } else { run })
            .collect()
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(|run| format!("[{run}]")))
    }
}

/// One ranked file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub score: MatchScore,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl ScoredResult {
    pub fn new(score: MatchScore, path: impl Into<String>) -> Self {
        Self {
            score,
            path: path.into(),
            highlight: None,
        }
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }
}

/// Descending by score. Stable, so equal scores keep discovery order.
pub fn sort_by_score_desc(results: &mut [ScoredResult]) {
    results.sort_by(|a, b| descending(a.score, b.score));
}

pub fn descending(a: MatchScore, b: MatchScore) -> Ordering {
    b.total_cmp(&a)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// class / struct / enum / trait / type
    Type,
    Function,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Function => "function",
        }
    }
}

/// A declared name found by line-prefix classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// 1-based
    pub line: usize,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            line,
        }
    }
}

/// Shallow outline of the head of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSummary {
    pub types: Vec<Declaration>,
    /// Public functions only; underscore-prefixed names are dropped.
    pub functions: Vec<Declaration>,
    /// Raw (trimmed) import lines in file order.
    pub imports: Vec<String>,
}

impl StructuralSummary {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.functions.is_empty() && self.imports.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHttpMethod(pub String);

impl fmt::Display for UnknownHttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown HTTP method: {}", self.0)
    }
}

impl std::error::Error for UnknownHttpMethod {}

impl FromStr for HttpMethod {
    type Err = UnknownHttpMethod;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            _ => Err(UnknownHttpMethod(raw.to_string())),
        }
    }
}

/// An HTTP route registration detected in source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub method: HttpMethod,
    pub path: String,
    /// Path relative to the scanned root, `/`-separated.
    pub file: String,
    /// 1-based
    pub line: usize,
    /// Trimmed source line, truncated.
    pub text: String,
}

/// A declaration whose name fuzzily matched a lookup query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionMatch {
    pub kind: DeclarationKind,
    pub name: String,
    pub file: String,
    pub line: usize,
    pub text: String,
    /// Score relative to the query's self-match, in (0, 1].
    pub similarity: f64,
}

/// A contiguous slice of a file's lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWindow {
    pub path: String,
    /// 1-based line number of `lines[0]`.
    pub start_line: usize,
    pub lines: Vec<String>,
    pub total_lines: usize,
}

impl FileWindow {
    /// 1-based, inclusive. Equals `start_line - 1` when the window is empty.
    pub fn end_line(&self) -> usize {
        (self.start_line + self.lines.len()).saturating_sub(1)
    }

    pub fn remaining(&self) -> usize {
        self.total_lines.saturating_sub(self.end_line())
    }
}

/// Outline plus preview of one file, as shown by `explain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileExplanation {
    pub path: String,
    /// Lower-cased, without the dot; empty when the file has none.
    pub extension: String,
    pub language: String,
    pub total_lines: usize,
    pub summary: StructuralSummary,
    pub preview: Vec<String>,
}

impl FileExplanation {
    /// Lines after the preview.
    pub fn remaining(&self) -> usize {
        self.total_lines.saturating_sub(self.preview.len())
    }
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
