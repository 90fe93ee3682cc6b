//! # Lens Outline
//!
//! Shallow, parser-free summaries of source files.
//!
//! ## Architecture
//!
//! ```text
//! Source text
//!     │
//!     ├──> Language Detection (from extension)
//!     │
//!     ├──> Structure: first N lines × per-language prefix table
//!     │    └─> types, public functions, import lines
//!     │
//!     └──> Routes: every line × ordered regex rules (first match wins)
//!          └─> RouteEntry { method, path, file, line, text }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lens_outline::extract_structure;
//!
//! let code = "import os\n\nclass Repo:\n    def clone(self):\n        pass\n";
//! let lines: Vec<&str> = code.lines().collect();
//! let summary = extract_structure(&lines);
//!
//! assert_eq!(summary.types[0].name, "Repo");
//! assert_eq!(summary.functions[0].line, 4);
//! assert_eq!(summary.imports, vec!["import os"]);
//! ```

mod config;
mod error;
mod explain;
mod language;
mod routes;
mod rules;
mod structure;

pub use config::{OutlineConfig, RouteRuleSpec};
pub use error::{OutlineError, Result};
pub use explain::{explain_file, explain_text, PREVIEW_LINES};
pub use language::Language;
pub use routes::{extract_routes, RouteExtractor, RouteRule, RouteRuleSet};
pub use rules::{LineClass, StructureRules};
pub use structure::{
    extract_file_structure, extract_structure, extract_structure_with, DEFAULT_STRUCTURE_LINES,
};
