// JVM strategy: compile with javac, then launch the VM with the class name
// extracted from the source. javac dictates that a public class lives in a
// file of the same name, so each attempt gets its own uniquely named
// scratch subdirectory and the source file is named after the class.

use crate::artifact::ArtifactSet;
use crate::config::{LanguageToolchain, ToolchainConfig};
use crate::strategy::{or_no_output, run_with_timeout};
use crate::types::{ExecutionRequest, ExecutionResult};
use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

/// Class used when no public class declaration is found in the source.
pub const DEFAULT_CLASS_NAME: &str = "Solution";

lazy_static! {
    static ref PUBLIC_CLASS: Regex = Regex::new(r"public\s+class\s+(\w+)").unwrap();
}

/// Best-effort extraction of the public class name. Not finding one is not
/// an error; the default identifier is used instead.
pub fn extract_class_name(source: &str) -> &str {
    PUBLIC_CLASS
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_CLASS_NAME)
}

pub async fn run(
    config: &ToolchainConfig,
    toolchain: &LanguageToolchain,
    request: &ExecutionRequest,
) -> Result<ExecutionResult> {
    let class_name = extract_class_name(&request.source_code);

    let mut artifacts = ArtifactSet::new();
    let attempt_dir = artifacts.create_dir(&config.scratch_dir)?;
    let source_path = attempt_dir.join(format!("{}.{}", class_name, toolchain.file_extension));
    std::fs::write(&source_path, &request.source_code)?;

    debug!(class_name, source = %source_path.display(), "Compiling");

    let compiler = toolchain
        .compile
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No compiler configured for {}", request.language))?;

    let mut compile_cmd = Command::new(&compiler.command);
    compile_cmd.args(&compiler.args).arg(&source_path);

    let compile = run_with_timeout(compile_cmd, "", config.timeout).await?;
    if !compile.succeeded() {
        debug!(diagnostics = %compile.output, "Compilation failed");
        return Ok(ExecutionResult::compile_error(compile.output));
    }

    let mut run_cmd = Command::new(&toolchain.run.command);
    run_cmd
        .args(&toolchain.run.args)
        .arg("-cp")
        .arg(&attempt_dir)
        .arg(class_name);

    let outcome = run_with_timeout(run_cmd, &request.stdin, config.timeout).await?;

    Ok(ExecutionResult::completed(or_no_output(outcome.output)))
}
