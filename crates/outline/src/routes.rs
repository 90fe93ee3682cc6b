//! HTTP route detection by ordered regex rules.
//!
//! Every line is tested against the rules in priority order; the first rule
//! that matches produces the line's single [`RouteEntry`] and the remaining
//! rules are skipped.

use crate::config::{OutlineConfig, RouteRuleSpec};
use crate::error::{OutlineError, Result};
use lens_indexer::{FileScanner, ScanOptions, SourceRoot};
use lens_protocol::{HttpMethod, RouteEntry};
use once_cell::sync::Lazy;
use regex::Regex;

/// One compiled route pattern.
#[derive(Debug, Clone)]
pub struct RouteRule {
    name: String,
    regex: Regex,
    method_group: Option<usize>,
    path_group: usize,
}

impl RouteRule {
    pub fn compile(spec: &RouteRuleSpec) -> Result<Self> {
        let regex = Regex::new(&spec.pattern).map_err(|source| OutlineError::InvalidPattern {
            name: spec.name.clone(),
            source,
        })?;
        let groups = regex.captures_len() - 1;
        let in_range = |group: usize| (1..=groups).contains(&group);
        if !in_range(spec.path_group) || !spec.method_group.map_or(true, in_range) {
            return Err(OutlineError::invalid_config(format!(
                "route rule '{}' references a capture group the pattern does not have ({groups} groups)",
                spec.name
            )));
        }
        Ok(Self {
            name: spec.name.clone(),
            regex,
            method_group: spec.method_group,
            path_group: spec.path_group,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(method, path)` if this rule recognises `line`. A missing or
    /// unrecognised method capture means GET.
    pub fn match_line(&self, line: &str) -> Option<(HttpMethod, String)> {
        let captures = self.regex.captures(line)?;
        let path = captures.get(self.path_group)?.as_str().to_string();
        let method = self
            .method_group
            .and_then(|group| captures.get(group))
            .map(|raw| {
                raw.as_str().parse().unwrap_or_else(|_| {
                    log::debug!("Rule {} captured unknown method {:?}", self.name, raw.as_str());
                    HttpMethod::Get
                })
            })
            .unwrap_or_default();
        Some((method, path))
    }
}

const METHODS: &str = "get|post|put|patch|delete|options|head";

fn builtin_specs() -> Vec<RouteRuleSpec> {
    let spec = |name: &str, pattern: String, method_group, path_group| RouteRuleSpec {
        name: name.to_string(),
        pattern,
        method_group,
        path_group,
    };
    vec![
        // @app.get("/users/{id}")
        spec(
            "decorator-method",
            format!(r#"(?i)@(app|api|router)\.({METHODS})\(\s*["']([^"']+)"#),
            Some(2),
            3,
        ),
        // @bp.route("/x") and router.route('/x')
        spec(
            "route-call",
            r#"(?i)(?:@.*|\.)route\(\s*["']([^"']+)"#.to_string(),
            None,
            1,
        ),
        // app.post('/login', handler)
        spec(
            "method-call",
            format!(r#"(?i)\b(app|router)\.({METHODS})\(\s*["']([^"']+)"#),
            Some(2),
            3,
        ),
        // path("users/", views.users)
        spec(
            "path-table",
            r#"(?i)\bpath\(\s*["']([^"']+)"#.to_string(),
            None,
            1,
        ),
        spec(
            "re-path-table",
            r#"(?i)\bre_path\(\s*["']([^"']+)"#.to_string(),
            None,
            1,
        ),
    ]
}

static BUILTIN_RULES: Lazy<Vec<RouteRule>> = Lazy::new(|| {
    builtin_specs()
        .iter()
        .map(|spec| RouteRule::compile(spec).expect("built-in route rule must compile"))
        .collect()
});

/// Prioritised rule list.
#[derive(Debug, Clone)]
pub struct RouteRuleSet {
    rules: Vec<RouteRule>,
}

impl Default for RouteRuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RouteRuleSet {
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES.clone(),
        }
    }

    /// Built-in rules followed by `custom`, in the given order.
    pub fn with_custom(custom: &[RouteRuleSpec]) -> Result<Self> {
        let mut set = Self::builtin();
        for spec in custom {
            set.rules.push(RouteRule::compile(spec)?);
        }
        Ok(set)
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// First matching rule wins.
    pub fn match_line(&self, line: &str) -> Option<(HttpMethod, String)> {
        self.rules.iter().find_map(|rule| rule.match_line(line))
    }

    /// Routes in one file's text, in line order.
    pub fn extract_from_text(
        &self,
        file: &str,
        text: &str,
        max_line_chars: usize,
    ) -> Vec<RouteEntry> {
        text.lines()
            .enumerate()
            .filter_map(|(idx, line)| {
                let (method, path) = self.match_line(line)?;
                Some(RouteEntry {
                    method,
                    path,
                    file: file.to_string(),
                    line: idx + 1,
                    text: truncate_chars(line.trim(), max_line_chars),
                })
            })
            .collect()
    }
}

/// Scans a tree for route registrations.
pub struct RouteExtractor {
    rules: RouteRuleSet,
    scan: ScanOptions,
    max_line_chars: usize,
}

impl RouteExtractor {
    /// `scan` supplies walk settings; its extension list is replaced by
    /// `config.route_extensions`.
    pub fn new(config: &OutlineConfig, scan: &ScanOptions) -> Result<Self> {
        config.validate().map_err(OutlineError::InvalidConfig)?;
        Ok(Self {
            rules: RouteRuleSet::with_custom(&config.custom_route_rules)?,
            scan: ScanOptions {
                extensions: config.route_extensions.clone(),
                ..scan.clone()
            },
            max_line_chars: config.max_route_line_chars,
        })
    }

    /// Routes in traversal order, then line order within each file.
    pub fn extract(&self, root: &SourceRoot) -> Result<Vec<RouteEntry>> {
        root.revalidate()?;
        let files = FileScanner::with_options(root.path(), self.scan.clone()).scan();
        let mut entries = Vec::new();
        for file in &files {
            let text = file.read_text();
            entries.extend(
                self.rules
                    .extract_from_text(&file.relative, &text, self.max_line_chars),
            );
        }
        log::debug!(
            "Detected {} route(s) in {} file(s) under {}",
            entries.len(),
            files.len(),
            root.path().display()
        );
        Ok(entries)
    }
}

/// Scan `root` with default settings.
pub fn extract_routes(root: &SourceRoot) -> Result<Vec<RouteEntry>> {
    RouteExtractor::new(&OutlineConfig::default(), &ScanOptions::default())?.extract(root)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
