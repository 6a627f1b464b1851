/// Static Pre-Execution Screen
///
/// **Core Responsibility:**
/// Decide whether source text is allowed to reach a toolchain at all.
/// Pure function: (source, language) -> ValidationReport. No filesystem,
/// no processes.
///
/// **Checks (applied in order, all findings accumulated):**
/// 1. Per-language denylist, case-insensitive substring match
/// 2. Source length bound
/// 3. Heuristic infinite-loop detection (best effort - neither proves nor
///    disproves termination)
///
/// A denylist is an inherently incomplete security control; the real
/// isolation boundary belongs to the host environment. This screen exists
/// to reject the obvious cases cheaply and early.

use crate::types::{Language, ValidationReport};
use lazy_static::lazy_static;
use regex::Regex;

/// Maximum accepted source length, in characters.
pub const MAX_SOURCE_CHARS: usize = 10_000;

lazy_static! {
    /// Unconditional loop forms: a constant-true condition or a counting
    /// loop with an empty condition clause.
    static ref INFINITE_LOOP: Regex =
        Regex::new(r"(?i)while\s*\(\s*true\s*\)|for\s*\(\s*;\s*;\s*\)").unwrap();
}

/// Known-dangerous constructs per language: dynamic evaluation primitives,
/// process-spawning APIs, raw filesystem access, destructive schema
/// statements.
fn denylist(language: Language) -> &'static [&'static str] {
    match language {
        Language::Javascript => &["eval", "Function", "require", "import"],
        Language::Python => &["exec", "eval", "__import__", "open", "file"],
        Language::Java => &["Runtime", "ProcessBuilder", "System.exit"],
        Language::Cpp => &["system", "exec", "popen", "#include <fstream>"],
        Language::Sql => &["DROP DATABASE", "DROP SCHEMA", "TRUNCATE"],
    }
}

/// Screen source text for a given language.
///
/// Findings are accumulated, not short-circuited, so the caller can surface
/// the complete issue list verbatim.
pub fn validate(source: &str, language: Language) -> ValidationReport {
    let mut issues = Vec::new();

    let lowered = source.to_lowercase();
    for construct in denylist(language) {
        if lowered.contains(&construct.to_lowercase()) {
            issues.push(format!(
                "Potentially dangerous function detected: {}",
                construct
            ));
        }
    }

    if source.chars().count() > MAX_SOURCE_CHARS {
        issues.push("Code is too long (max 10,000 characters)".to_string());
    }

    if INFINITE_LOOP.is_match(source) {
        issues.push("Potential infinite loop detected".to_string());
    }

    ValidationReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_source_passes() {
        let report = validate("print(\"hi\")", Language::Python);
        assert!(report.valid);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_python_eval_rejected() {
        let report = validate("eval(input())", Language::Python);
        assert!(!report.valid);
        assert_eq!(
            report.issues,
            vec!["Potentially dangerous function detected: eval".to_string()]
        );
    }

    #[test]
    fn test_denylist_is_case_insensitive() {
        let report = validate("EVAL('1+1')", Language::Javascript);
        assert!(!report.valid);
        assert!(report.issues[0].contains("eval"));
    }

    #[test]
    fn test_denylist_matches_anywhere_in_source() {
        let source = "x = 1\ny = 2\nz = __import__('os')\n";
        let report = validate(source, Language::Python);
        assert!(!report.valid);
        assert!(report
            .issues
            .iter()
            .any(|i| i.contains("__import__")));
    }

    #[test]
    fn test_java_process_builder_rejected() {
        let report = validate(
            "new ProcessBuilder(\"ls\").start();",
            Language::Java,
        );
        assert!(!report.valid);
        assert!(report.issues[0].contains("ProcessBuilder"));
    }

    #[test]
    fn test_cpp_fstream_include_rejected() {
        let report = validate(
            "#include <fstream>\nint main() { return 0; }",
            Language::Cpp,
        );
        assert!(!report.valid);
        assert!(report.issues[0].contains("#include <fstream>"));
    }

    #[test]
    fn test_sql_drop_database_rejected_but_drop_table_allowed() {
        let report = validate("DROP DATABASE prod", Language::Sql);
        assert!(!report.valid);
        let report = validate("DROP TABLE users", Language::Sql);
        assert!(report.valid);
    }

    #[test]
    fn test_findings_accumulate() {
        // eval + exec + over-length in one source
        let mut source = String::from("eval(exec('x'))\n");
        source.push_str(&"a".repeat(MAX_SOURCE_CHARS));
        let report = validate(&source, Language::Python);
        assert!(!report.valid);
        assert_eq!(report.issues.len(), 3);
        assert!(report.issues[0].contains("exec"));
        assert!(report.issues[1].contains("eval"));
        assert!(report.issues[2].contains("too long"));
    }

    #[test]
    fn test_length_bound_independent_of_content() {
        let source = "a".repeat(MAX_SOURCE_CHARS + 1);
        let report = validate(&source, Language::Java);
        assert!(!report.valid);
        assert!(report.issues[0].contains("too long"));

        let source = "a".repeat(MAX_SOURCE_CHARS);
        assert!(validate(&source, Language::Java).valid);
    }

    #[test]
    fn test_infinite_loop_heuristic() {
        for source in [
            "while(true) {}",
            "while ( true ) {}",
            "while(TRUE) {}",
            "for(;;) {}",
            "for ( ; ; ) {}",
        ] {
            let report = validate(source, Language::Cpp);
            assert!(!report.valid, "expected rejection for {:?}", source);
            assert_eq!(
                report.issues,
                vec!["Potential infinite loop detected".to_string()]
            );
        }
    }

    #[test]
    fn test_bounded_loops_pass() {
        let report = validate("for (int i = 0; i < 10; i++) {}", Language::Cpp);
        assert!(report.valid);
        let report = validate("while (n > 0) { n--; }", Language::Cpp);
        assert!(report.valid);
    }

    #[test]
    fn test_heuristic_does_not_prove_termination() {
        // A genuinely unbounded loop the textual heuristic cannot see.
        let report = validate("while True:\n    pass", Language::Python);
        assert!(report.valid);
    }
}
