use crate::fuzzy::FuzzyMatcher;
use lens_indexer::CodeFile;
use lens_outline::{Language, LineClass};
use lens_protocol::{DeclarationKind, DefinitionMatch};

/// Fuzzy lookup of declared function or type names across files.
///
/// Unlike the structural outline, every line of every file is inspected and
/// private (`_`-prefixed) names are included.
pub struct DefinitionFinder {
    matcher: FuzzyMatcher,
    threshold: f64,
}

impl DefinitionFinder {
    pub fn new(threshold: f64) -> Self {
        Self {
            matcher: FuzzyMatcher::new(),
            threshold,
        }
    }

    /// Declarations of `kind` in `text` whose name is similar enough to
    /// `query`, in line order.
    pub fn find_in_text(
        &mut self,
        file: &str,
        language: Language,
        text: &str,
        query: &str,
        kind: DeclarationKind,
    ) -> Vec<DefinitionMatch> {
        let query = query.to_lowercase();
        let rules = language.structure_rules();
        let mut found = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let Some(LineClass::Declaration(declared, name)) = rules.classify(line) else {
                continue;
            };
            if declared != kind {
                continue;
            }
            let similarity = self.matcher.similarity(&query, &name.to_lowercase());
            if similarity <= self.threshold {
                continue;
            }
            found.push(DefinitionMatch {
                kind,
                name: name.to_string(),
                file: file.to_string(),
                line: idx + 1,
                text: line.trim().to_string(),
                similarity,
            });
        }
        found
    }

    /// Search every file, best similarity first. Ties keep file then line
    /// order.
    pub fn find(
        &mut self,
        files: &[CodeFile],
        query: &str,
        kind: DeclarationKind,
    ) -> Vec<DefinitionMatch> {
        let mut matches = Vec::new();
        for file in files {
            let language = Language::from_extension(&file.extension);
            let text = file.read_text();
            matches.extend(self.find_in_text(&file.relative, language, &text, query, kind));
        }
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        log::debug!(
            "{} lookup {query:?} matched {} declaration(s)",
            kind.as_str(),
            matches.len()
        );
        matches
    }
}

/// Convenience wrapper over [`DefinitionFinder::find`].
pub fn find_definitions(
    files: &[CodeFile],
    query: &str,
    kind: DeclarationKind,
    threshold: f64,
) -> Vec<DefinitionMatch> {
    DefinitionFinder::new(threshold).find(files, query, kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_indexer::{list_code_files, ScanOptions};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    const AUTH: &str = "\
import hashlib

class LoginForm:
    def login(self, user):
        return self._login_helper(user)

    def _login_helper(self, user):
        pass

def logout():
    pass
";

    fn names(matches: &[DefinitionMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn finds_functions_including_private_ones() {
        let mut finder = DefinitionFinder::new(0.7);
        let found = finder.find_in_text(
            "auth.py",
            Language::Python,
            AUTH,
            "login",
            DeclarationKind::Function,
        );

        assert_eq!(names(&found), vec!["login", "_login_helper"]);
        assert_eq!(found[0].line, 4);
        assert_eq!(found[0].text, "def login(self, user):");
        assert_eq!(found[0].similarity, 1.0);
        assert!(found[1].similarity < 1.0);
    }

    #[test]
    fn kind_filter_separates_types_from_functions() {
        let mut finder = DefinitionFinder::new(0.7);
        let found = finder.find_in_text(
            "auth.py",
            Language::Python,
            AUTH,
            "LoginForm",
            DeclarationKind::Type,
        );
        assert_eq!(names(&found), vec!["LoginForm"]);
        assert_eq!(found[0].line, 3);
    }

    #[test]
    fn threshold_filters_weak_matches() {
        let mut strict = DefinitionFinder::new(0.999);
        let found = strict.find_in_text(
            "auth.py",
            Language::Python,
            AUTH,
            "login",
            DeclarationKind::Function,
        );
        assert_eq!(names(&found), vec!["login"]);
    }

    #[test]
    fn similarity_equal_to_threshold_is_rejected() {
        let mut fuzzy = FuzzyMatcher::new();
        let exact_helper = fuzzy.similarity("login", "_login_helper");

        let mut finder = DefinitionFinder::new(exact_helper);
        let found = finder.find_in_text(
            "auth.py",
            Language::Python,
            AUTH,
            "login",
            DeclarationKind::Function,
        );
        assert_eq!(names(&found), vec!["login"]);

        let mut finder = DefinitionFinder::new(1.0);
        let found = finder.find_in_text(
            "auth.py",
            Language::Python,
            AUTH,
            "login",
            DeclarationKind::Function,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn searches_all_files_best_first() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.py"), "def parse_config_file():\n    pass\n").unwrap();
        fs::write(temp.path().join("b.rs"), "fn helper() {}\npub fn parse_config() {}\n").unwrap();
        fs::write(temp.path().join("c.go"), "func (l *Loader) ParseConfig() error {\n}\n").unwrap();

        let files = list_code_files(temp.path(), &ScanOptions::default());
        let found = find_definitions(&files, "parse_config", DeclarationKind::Function, 0.7);

        assert_eq!(found[0].name, "parse_config");
        assert_eq!(found[0].file, "b.rs");
        assert_eq!(found[0].line, 2);
        assert!(found.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        assert!(!names(&found).contains(&"helper"));
    }

    #[test]
    fn finds_functions_in_return_type_languages() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("UserService.java"),
            "public class UserService {\n    public List<User> loadUsers(int limit) {\n        return repo.findAll(limit);\n    }\n}\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("users.c"),
            "#include <stdio.h>\n\nstatic int load_users(int limit)\n{\n    return fetch(limit);\n}\n",
        )
        .unwrap();

        let files = list_code_files(temp.path(), &ScanOptions::default());
        let java = find_definitions(&files, "loadUsers", DeclarationKind::Function, 0.7);
        let c = find_definitions(&files, "load_users", DeclarationKind::Function, 0.7);

        assert_eq!(java[0].file, "UserService.java");
        assert_eq!(java[0].line, 2);
        assert_eq!(c[0].file, "users.c");
        assert_eq!(c[0].line, 3);
    }
}
