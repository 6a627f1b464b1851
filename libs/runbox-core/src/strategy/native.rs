// Native strategy: compile with g++ to a per-attempt executable, then run
// the binary directly. Compile failure is judged by the binary being
// absent, with the compiler diagnostics surfaced as the error.

use crate::artifact::ArtifactSet;
use crate::config::{LanguageToolchain, ToolchainConfig};
use crate::strategy::{or_no_output, run_with_timeout};
use crate::types::{ExecutionRequest, ExecutionResult};
use anyhow::Result;
use tokio::process::Command;
use tracing::debug;

pub async fn run(
    config: &ToolchainConfig,
    toolchain: &LanguageToolchain,
    request: &ExecutionRequest,
) -> Result<ExecutionResult> {
    let mut artifacts = ArtifactSet::new();
    let source_path = artifacts.write_source(
        &config.scratch_dir,
        &toolchain.file_extension,
        &request.source_code,
    )?;
    // Same stem, no extension. Tracked before compiling so a partially
    // written binary is cleaned up too.
    let binary_path = source_path.with_extension("");
    artifacts.track_file(binary_path.clone());

    debug!(source = %source_path.display(), binary = %binary_path.display(), "Compiling");

    let compiler = toolchain
        .compile
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("No compiler configured for {}", request.language))?;

    let mut compile_cmd = Command::new(&compiler.command);
    compile_cmd
        .args(&compiler.args)
        .arg("-o")
        .arg(&binary_path)
        .arg(&source_path);

    let compile = run_with_timeout(compile_cmd, "", config.timeout).await?;
    if !binary_path.exists() {
        debug!(diagnostics = %compile.output, "Compilation produced no binary");
        return Ok(ExecutionResult::compile_error(compile.output));
    }

    // The compiled binary is the run command; configured run args pass
    // through unchanged.
    let mut run_cmd = Command::new(&binary_path);
    run_cmd.args(&toolchain.run.args);

    let outcome = run_with_timeout(run_cmd, &request.stdin, config.timeout).await?;

    Ok(ExecutionResult::completed(or_no_output(outcome.output)))
}
