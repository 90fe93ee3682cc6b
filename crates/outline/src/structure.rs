use crate::language::Language;
use crate::rules::{LineClass, StructureRules, PYTHON_RULES};
use lens_protocol::{Declaration, DeclarationKind, StructuralSummary};

/// Default number of leading lines classified.
pub const DEFAULT_STRUCTURE_LINES: usize = 100;

/// Summarise the first 100 lines with the default (Python family) rules.
pub fn extract_structure<S: AsRef<str>>(lines: &[S]) -> StructuralSummary {
    extract_structure_with(lines, &PYTHON_RULES, DEFAULT_STRUCTURE_LINES)
}

/// Summarise `text` with the rules for `language`.
pub fn extract_file_structure(
    text: &str,
    language: Language,
    max_lines: usize,
) -> StructuralSummary {
    let lines: Vec<&str> = text.lines().take(max_lines).collect();
    extract_structure_with(&lines, language.structure_rules(), max_lines)
}

/// Classify at most `max_lines` leading lines.
///
/// Types are listed in line order, then functions whose names do not start
/// with `_`, then raw import lines.
pub fn extract_structure_with<S: AsRef<str>>(
    lines: &[S],
    rules: &StructureRules,
    max_lines: usize,
) -> StructuralSummary {
    let mut summary = StructuralSummary::default();

    for (idx, line) in lines.iter().take(max_lines).enumerate() {
        let line_no = idx + 1;
        match rules.classify(line.as_ref()) {
            Some(LineClass::Declaration(DeclarationKind::Type, name)) => {
                summary
                    .types
                    .push(Declaration::new(DeclarationKind::Type, name, line_no));
            }
            Some(LineClass::Declaration(DeclarationKind::Function, name)) => {
                if !is_private(name) {
                    summary
                        .functions
                        .push(Declaration::new(DeclarationKind::Function, name, line_no));
                }
            }
            Some(LineClass::Import(import)) => summary.imports.push(import.to_string()),
            None => {}
        }
    }

    summary
}

fn is_private(name: &str) -> bool {
    name.starts_with('_')
}
