// Toolchain configuration for the execution core.
// Built-in defaults cover every supported language; config/languages.json
// can override binary names and flags per host.

use crate::types::Language;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default hard wall-clock budget for one execution attempt.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// An external program plus its fixed leading arguments. The strategy
/// appends the per-attempt paths; user text never passes through a shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    fn new(command: &str, args: &[&str]) -> Self {
        Self {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Per-language toolchain: how artifacts are named and which programs
/// compile and run them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageToolchain {
    pub name: String,
    pub file_extension: String,
    pub run: ToolCommand,
    #[serde(default)]
    pub compile: Option<ToolCommand>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ToolchainsFile {
    languages: Vec<LanguageToolchain>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    scratch_dir: Option<PathBuf>,
}

/// Authoritative source for which languages are enabled and how their
/// toolchains are invoked.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    toolchains: HashMap<Language, LanguageToolchain>,
    pub timeout: Duration,
    pub scratch_dir: PathBuf,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        let defaults = [
            LanguageToolchain {
                name: "javascript".to_string(),
                file_extension: "js".to_string(),
                run: ToolCommand::new("node", &[]),
                compile: None,
            },
            LanguageToolchain {
                name: "python".to_string(),
                file_extension: "py".to_string(),
                // -u keeps stdout unbuffered so a timed-out run still
                // surfaces partial output
                run: ToolCommand::new("python3", &["-u"]),
                compile: None,
            },
            LanguageToolchain {
                name: "java".to_string(),
                file_extension: "java".to_string(),
                run: ToolCommand::new("java", &[]),
                compile: Some(ToolCommand::new("javac", &[])),
            },
            LanguageToolchain {
                name: "cpp".to_string(),
                file_extension: "cpp".to_string(),
                run: ToolCommand::new("", &[]),
                compile: Some(ToolCommand::new("g++", &[])),
            },
        ];

        let mut toolchains = HashMap::new();
        for tc in defaults {
            if let Some(lang) = Language::from_name(&tc.name) {
                toolchains.insert(lang, tc);
            }
        }

        Self {
            toolchains,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            scratch_dir: std::env::temp_dir().join("runbox_code"),
        }
    }
}

impl ToolchainConfig {
    /// Load configuration from a languages.json file.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            bail!(
                "Toolchain config file not found: {}",
                config_path.display()
            );
        }

        let content = fs::read_to_string(config_path)
            .context("Failed to read languages.json")?;
        Self::from_json(&content)
    }

    /// Load from config/languages.json when present, built-in defaults
    /// otherwise.
    pub fn load_default() -> Result<Self> {
        let default_path = Path::new("config/languages.json");
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let file: ToolchainsFile =
            serde_json::from_str(content).context("Failed to parse languages.json")?;

        let mut toolchains = HashMap::new();
        for tc in file.languages {
            match Language::from_name(&tc.name) {
                Some(lang) => {
                    toolchains.insert(lang, tc);
                }
                None => bail!("Unknown language '{}' in languages.json", tc.name),
            }
        }

        if toolchains.is_empty() {
            bail!("No languages configured in languages.json");
        }

        let base = Self::default();
        Ok(Self {
            toolchains,
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(base.timeout),
            scratch_dir: file.scratch_dir.unwrap_or(base.scratch_dir),
        })
    }

    /// Get the toolchain for a language. A missing entry means the host
    /// has not enabled that language.
    pub fn toolchain(&self, language: Language) -> Result<&LanguageToolchain> {
        self.toolchains
            .get(&language)
            .ok_or_else(|| anyhow::anyhow!("No toolchain configured for language: {}", language))
    }

    /// All languages with a configured toolchain (sql never needs one).
    pub fn configured_languages(&self) -> Vec<Language> {
        self.toolchains.keys().copied().collect()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_process_languages() {
        let config = ToolchainConfig::default();
        for lang in Language::all() {
            if lang.spawns_process() {
                assert!(
                    config.toolchain(lang).is_ok(),
                    "missing default toolchain for {}",
                    lang
                );
            }
        }
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_compiled_languages_have_compile_step() {
        let config = ToolchainConfig::default();
        assert!(config.toolchain(Language::Java).unwrap().compile.is_some());
        assert!(config.toolchain(Language::Cpp).unwrap().compile.is_some());
        assert!(config
            .toolchain(Language::Python)
            .unwrap()
            .compile
            .is_none());
    }

    #[test]
    fn test_from_json_override() {
        let json = r#"{
            "languages": [
                {
                    "name": "python",
                    "file_extension": "py",
                    "run": { "command": "/usr/bin/python3.12", "args": ["-u"] }
                }
            ],
            "timeout_secs": 5
        }"#;
        let config = ToolchainConfig::from_json(json).unwrap();
        assert_eq!(
            config.toolchain(Language::Python).unwrap().run.command,
            "/usr/bin/python3.12"
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.toolchain(Language::Java).is_err());
    }

    #[test]
    fn test_from_json_rejects_unknown_language() {
        let json = r#"{
            "languages": [
                { "name": "cobol", "file_extension": "cbl", "run": { "command": "cobc" } }
            ]
        }"#;
        assert!(ToolchainConfig::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_rejects_empty() {
        assert!(ToolchainConfig::from_json(r#"{ "languages": [] }"#).is_err());
    }
}
