//! Per-language line-prefix tables.
//!
//! A line is classified by its trimmed prefix alone: type declarations are
//! tried first, then functions, then imports. Multi-line signatures,
//! decorators and unusual formatting are not handled; this is a summary
//! aid, not a parser.

use crate::language::Language;
use lens_protocol::DeclarationKind;

#[derive(Debug)]
pub struct StructureRules {
    pub type_prefixes: &'static [&'static str],
    pub function_prefixes: &'static [&'static str],
    pub import_prefixes: &'static [&'static str],
    /// Characters that end a declared name (whitespace always does).
    pub name_terminators: &'static [char],
    /// Skip a leading `(...)` receiver before the name (`func (s *S) Name`).
    pub skip_receiver: bool,
    /// Functions open with a return type instead of a keyword
    /// (`static int parse(...)`); recognised by shape when no prefix matches.
    pub typed_signatures: bool,
}

/// What a single line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Declaration(DeclarationKind, &'a str),
    Import(&'a str),
}

pub static PYTHON_RULES: StructureRules = StructureRules {
    type_prefixes: &["class "],
    function_prefixes: &["def ", "async def "],
    import_prefixes: &["import ", "from "],
    name_terminators: &['(', ':'],
    skip_receiver: false,
    typed_signatures: false,
};

pub static JAVASCRIPT_RULES: StructureRules = StructureRules {
    type_prefixes: &[
        "class ",
        "export class ",
        "export default class ",
        "interface ",
        "export interface ",
    ],
    function_prefixes: &[
        "function ",
        "async function ",
        "export function ",
        "export async function ",
        "export default function ",
    ],
    import_prefixes: &["import "],
    name_terminators: &['(', '{', '<', ':'],
    skip_receiver: false,
    typed_signatures: false,
};

pub static RUST_RULES: StructureRules = StructureRules {
    type_prefixes: &[
        "struct ",
        "pub struct ",
        "pub(crate) struct ",
        "enum ",
        "pub enum ",
        "pub(crate) enum ",
        "trait ",
        "pub trait ",
    ],
    function_prefixes: &[
        "fn ",
        "pub fn ",
        "pub(crate) fn ",
        "async fn ",
        "pub async fn ",
    ],
    import_prefixes: &["use ", "pub use ", "extern crate "],
    name_terminators: &['(', '<', '{', ';', ':'],
    skip_receiver: false,
    typed_signatures: false,
};

pub static GO_RULES: StructureRules = StructureRules {
    type_prefixes: &["type "],
    function_prefixes: &["func "],
    import_prefixes: &["import "],
    name_terminators: &['(', '[', '{'],
    skip_receiver: true,
    typed_signatures: false,
};

pub static JAVA_RULES: StructureRules = StructureRules {
    type_prefixes: &[
        "class ",
        "public class ",
        "abstract class ",
        "public abstract class ",
        "final class ",
        "public final class ",
        "interface ",
        "public interface ",
        "enum ",
        "public enum ",
        "record ",
        "public record ",
    ],
    function_prefixes: &[],
    import_prefixes: &["import "],
    name_terminators: &['(', '<', '{'],
    skip_receiver: false,
    typed_signatures: true,
};

pub static C_FAMILY_RULES: StructureRules = StructureRules {
    type_prefixes: &["struct ", "typedef struct ", "class ", "enum ", "union "],
    function_prefixes: &[],
    import_prefixes: &["#include "],
    name_terminators: &['{', ';', ':', '<'],
    skip_receiver: false,
    typed_signatures: true,
};

impl StructureRules {
    pub fn for_language(language: Language) -> &'static StructureRules {
        match language {
            Language::Python | Language::Unknown => &PYTHON_RULES,
            Language::JavaScript | Language::TypeScript => &JAVASCRIPT_RULES,
            Language::Rust => &RUST_RULES,
            Language::Go => &GO_RULES,
            Language::Java => &JAVA_RULES,
            Language::C | Language::Cpp => &C_FAMILY_RULES,
        }
    }

    /// Classify one (untrimmed) line.
    ///
    /// Declarations with an empty name (`class :`) are not reported.
    pub fn classify<'a>(&self, line: &'a str) -> Option<LineClass<'a>> {
        let trimmed = line.trim();

        if let Some(rest) = strip_any(trimmed, self.type_prefixes) {
            return self
                .declared_name(rest)
                .map(|name| LineClass::Declaration(DeclarationKind::Type, name));
        }
        if let Some(rest) = strip_any(trimmed, self.function_prefixes) {
            return self
                .declared_name(rest)
                .map(|name| LineClass::Declaration(DeclarationKind::Function, name));
        }
        if starts_with_any(trimmed, self.import_prefixes) {
            return Some(LineClass::Import(trimmed));
        }
        if self.typed_signatures {
            return typed_signature_name(trimmed)
                .map(|name| LineClass::Declaration(DeclarationKind::Function, name));
        }
        None
    }

    fn declared_name<'a>(&self, rest: &'a str) -> Option<&'a str> {
        let mut rest = rest.trim_start();
        if self.skip_receiver && rest.starts_with('(') {
            if let Some(close) = rest.find(')') {
                rest = rest[close + 1..].trim_start();
            }
        }
        let end = rest
            .find(|c: char| c.is_whitespace() || self.name_terminators.contains(&c))
            .unwrap_or(rest.len());
        let name = rest[..end].trim_end_matches(|c| self.name_terminators.contains(&c));
        (!name.is_empty()).then_some(name)
    }
}

/// Words that can precede `(` in a statement but never start a signature.
const STATEMENT_KEYWORDS: &[&str] = &[
    "return", "else", "if", "while", "for", "switch", "case", "new", "throw", "delete",
    "sizeof", "do", "goto", "await", "yield", "assert",
];

/// Name in `<modifiers and return type> name(...)`. At least one word must
/// precede the name, which rules out plain calls.
fn typed_signature_name(line: &str) -> Option<&str> {
    let paren = line.find('(')?;
    let head = line[..paren].trim_end();
    if head.contains(|c: char| matches!(c, '=' | '.' | '"' | '\'' | ',' | ')' | '+' | '-' | '!')) {
        return None;
    }

    let mut words = head.split_whitespace();
    let first = words.next()?;
    if !first.starts_with(|c: char| c.is_alphabetic() || c == '_')
        || STATEMENT_KEYWORDS.contains(&first)
    {
        return None;
    }
    let last = words.last()?;

    let name = last.trim_start_matches(['*', '&']);
    let name = name.rsplit("::").next().unwrap_or(name);
    let is_identifier = !name.is_empty()
        && name.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '~')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '~');
    is_identifier.then_some(name)
}

fn strip_any<'a>(line: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes.iter().find_map(|prefix| line.strip_prefix(prefix))
}

fn starts_with_any(line: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| line.starts_with(prefix))
}
