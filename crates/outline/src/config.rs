use serde::{Deserialize, Serialize};

/// Limits and rule extensions for structure and route extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Only this many leading lines are classified for a structural summary
    pub max_structure_lines: usize,

    /// Route entries keep at most this many characters of the source line
    pub max_route_line_chars: usize,

    /// Extensions scanned for route registrations (narrower than the code
    /// file allow-list: route idioms are language specific)
    pub route_extensions: Vec<String>,

    /// Extra route rules, tried after the built-in ones
    pub custom_route_rules: Vec<RouteRuleSpec>,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_structure_lines: 100,
            max_route_line_chars: 200,
            route_extensions: ["py", "js", "ts", "tsx", "jsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            custom_route_rules: Vec::new(),
        }
    }
}

impl OutlineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_structure_lines == 0 {
            return Err("outline.max_structure_lines must be > 0".to_string());
        }
        if self.max_route_line_chars == 0 {
            return Err("outline.max_route_line_chars must be > 0".to_string());
        }
        if self.route_extensions.is_empty() {
            return Err("outline.route_extensions must not be empty".to_string());
        }
        for rule in &self.custom_route_rules {
            if rule.path_group == 0 {
                return Err(format!(
                    "route rule '{}': path_group must point at a capture group (>= 1)",
                    rule.name
                ));
            }
            if rule.method_group == Some(0) {
                return Err(format!(
                    "route rule '{}': method_group must point at a capture group (>= 1)",
                    rule.name
                ));
            }
        }
        Ok(())
    }
}

/// A user-supplied route pattern.
///
/// `pattern` is a Rust regex; `path_group` (and optionally `method_group`)
/// name the capture groups holding the route path and HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRuleSpec {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub method_group: Option<usize>,
    pub path_group: usize,
}
