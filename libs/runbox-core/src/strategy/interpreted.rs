// Interpreted strategy: write the source file, invoke the interpreter on
// it directly. Shared by javascript (node) and python.

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

    debug!(
        language = %request.language,
        source = %source_path.display(),
        "Running interpreter"
    );

    let mut cmd = Command::new(&toolchain.run.command);
    cmd.args(&toolchain.run.args).arg(&source_path);

    let outcome = run_with_timeout(cmd, &request.stdin, config.timeout).await?;

    // Timeouts and non-zero exits are folded into the output text; the
    // attempt still counts as a completed run.
    Ok(ExecutionResult::completed(or_no_output(outcome.output)))
}
