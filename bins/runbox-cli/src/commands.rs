// CLI commands for driving the execution core locally
use anyhow::{Context, Result, bail};
use runbox_core::{CodeExecutor, ExecutionRequest, Language, ToolchainConfig};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Resolve the language from an explicit flag or the file extension.
fn resolve_language(file: &str, explicit: Option<&str>) -> Result<Language> {
    if let Some(name) = explicit {
        return Language::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unsupported language: {}", name));
    }

    let extension = Path::new(file)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let language = match extension {
        "js" => Language::Javascript,
        "py" => Language::Python,
        "java" => Language::Java,
        "cpp" | "cc" | "cxx" => Language::Cpp,
        "sql" => Language::Sql,
        _ => bail!(
            "Cannot infer language from '{}'; pass --language explicitly",
            file
        ),
    };

    Ok(language)
}

fn read_source(file: &str) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read source file {}", file))
}

pub async fn run(
    file: &str,
    language: Option<&str>,
    stdin_file: Option<&str>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let language = resolve_language(file, language)?;
    let source = read_source(file)?;

    let stdin = match stdin_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read stdin file {}", path))?,
        None => String::new(),
    };

    let mut config = ToolchainConfig::load_default()?;
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let executor = CodeExecutor::new(config)?;
    let request = ExecutionRequest::new(language, source).with_stdin(stdin);
    let result = executor.execute(&request).await;

    if result.success {
        println!("{}", result.output);
        Ok(())
    } else {
        eprintln!("{}", result.error);
        std::process::exit(1);
    }
}

pub fn validate(file: &str, language: Option<&str>) -> Result<()> {
    let language = resolve_language(file, language)?;
    let source = read_source(file)?;

    let report = runbox_core::validate(&source, language);

    if report.valid {
        println!("✓ No issues found");
        Ok(())
    } else {
        eprintln!("✗ {} issue(s):", report.issues.len());
        for issue in &report.issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
}

pub fn languages() -> Result<()> {
    let config = ToolchainConfig::load_default()?;

    let mut names: Vec<String> = config
        .configured_languages()
        .iter()
        .map(|l| l.to_string())
        .collect();
    // sql needs no toolchain and is always available
    names.push(Language::Sql.to_string());
    names.sort();

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_extension() {
        assert_eq!(resolve_language("a.py", None).unwrap(), Language::Python);
        assert_eq!(resolve_language("a.cc", None).unwrap(), Language::Cpp);
        assert_eq!(resolve_language("q.sql", None).unwrap(), Language::Sql);
        assert!(resolve_language("Makefile", None).is_err());
    }

    #[test]
    fn test_explicit_flag_wins() {
        assert_eq!(
            resolve_language("weird.txt", Some("javascript")).unwrap(),
            Language::Javascript
        );
        assert!(resolve_language("weird.txt", Some("fortran")).is_err());
    }
}
