use crate::rules::StructureRules;
use std::path::Path;

/// Which prefix table classifies a file. Chosen from the extension alone;
/// file contents are never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    Unknown,
}

/// Lower-cased extension (no dot) to language. Headers follow their family.
const EXTENSION_TABLE: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("pyw", Language::Python),
    ("js", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("cjs", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("tsx", Language::TypeScript),
    ("rs", Language::Rust),
    ("go", Language::Go),
    ("java", Language::Java),
    ("c", Language::C),
    ("h", Language::C),
    ("cpp", Language::Cpp),
    ("cc", Language::Cpp),
    ("cxx", Language::Cpp),
    ("hpp", Language::Cpp),
    ("hh", Language::Cpp),
    ("hxx", Language::Cpp),
];

impl Language {
    /// `ext` may carry a leading dot and any case.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.');
        EXTENSION_TABLE
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map_or(Language::Unknown, |&(_, language)| language)
    }

    /// Files without an extension are `Unknown`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension() {
            Some(ext) => Self::from_extension(&ext.to_string_lossy()),
            None => Language::Unknown,
        }
    }

    /// Label used in `explain` reports and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Unknown => "unknown",
        }
    }

    /// Line-prefix rules for this language. Unknown files use the Python
    /// table.
    pub fn structure_rules(self) -> &'static StructureRules {
        StructureRules::for_language(self)
    }
}
