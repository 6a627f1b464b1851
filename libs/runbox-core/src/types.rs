use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported languages - a closed set. Anything outside it is rejected at
/// the deserialization boundary before any other processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Javascript,
    Python,
    Java,
    Cpp,
    Sql,
}

impl Language {
    /// Parse a language name as it appears on the wire or the CLI.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "javascript" | "js" => Some(Language::Javascript),
            "python" => Some(Language::Python),
            "java" => Some(Language::Java),
            "cpp" | "c++" => Some(Language::Cpp),
            "sql" => Some(Language::Sql),
            _ => None,
        }
    }

    pub fn all() -> [Language; 5] {
        [
            Language::Javascript,
            Language::Python,
            Language::Java,
            Language::Cpp,
            Language::Sql,
        ]
    }

    /// Whether execution spawns a real process (everything except sql).
    pub fn spawns_process(&self) -> bool {
        !matches!(self, Language::Sql)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Javascript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Sql => "sql",
        };
        write!(f, "{}", name)
    }
}

/// A single execution request. Immutable once accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub language: Language,
    pub source_code: String,
    /// Piped into the spawned process when non-empty.
    #[serde(default)]
    pub stdin: String,
}

impl ExecutionRequest {
    pub fn new(language: Language, source_code: impl Into<String>) -> Self {
        Self {
            language,
            source_code: source_code.into(),
            stdin: String::new(),
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = stdin.into();
        self
    }
}

/// Verdict of the static pre-execution screen.
/// `valid` is true iff `issues` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}

/// Outcome of one execution attempt.
///
/// `success` reflects whether the pipeline ran to completion without a
/// categorized failure (validation rejection, compile error, unsupported
/// language). It does not, by itself, indicate the program's own exit
/// status - runtime failures and timeouts are folded into `output`. This
/// mirrors the upstream contract and is a documented limitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
    pub error: String,
}

impl ExecutionResult {
    /// The pipeline ran the program (or synthesized a response) to the end.
    pub fn completed(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: String::new(),
        }
    }

    /// The validator refused the source; issues are surfaced verbatim.
    pub fn rejected(issues: &[String]) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: issues.join("\n"),
        }
    }

    /// Compilation aborted the attempt; run phase was skipped.
    pub fn compile_error(diagnostics: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: format!("Compilation error: {}", diagnostics.into()),
        }
    }

    pub fn unsupported(language: Language) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: format!("Unsupported language: {}", language),
        }
    }

    /// Unexpected internal fault (filesystem, spawn). Never panics the
    /// service; surfaced as a generic execution failure.
    pub fn internal_error(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: format!("Execution failed: {}", error),
        }
    }
}
