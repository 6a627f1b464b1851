/// Execution Orchestrator
///
/// **Core Responsibility:**
/// Take a validated request through artifact materialization, toolchain
/// invocation, and cleanup, and fold every outcome into the
/// {success, output, error} contract.
///
/// **Critical Properties:**
/// - Validation always runs first; a rejected request never touches the
///   filesystem or spawns a process
/// - Each call is stateless with respect to other calls; concurrency
///   safety comes from unique artifact naming, not locking
/// - Internal faults become a generic failure result, never a crash

use crate::artifact;
use crate::config::ToolchainConfig;
use crate::strategy::{interpreted, jvm, native, sql};
use crate::types::{ExecutionRequest, ExecutionResult, Language, ValidationReport};
use crate::validator;
use anyhow::Result;
use tracing::{error, info, instrument};

pub struct CodeExecutor {
    config: ToolchainConfig,
}

impl CodeExecutor {
    /// Create an executor, materializing the scratch directory if absent.
    pub fn new(config: ToolchainConfig) -> Result<Self> {
        artifact::ensure_scratch_dir(&config.scratch_dir)?;
        Ok(Self { config })
    }

    /// Executor with built-in toolchain defaults.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ToolchainConfig::load_default()?)
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Run the static screen in isolation.
    pub fn validate(&self, request: &ExecutionRequest) -> ValidationReport {
        validator::validate(&request.source_code, request.language)
    }

    /// Execute one request end to end.
    ///
    /// Blocks (at the subprocess-wait point) until the program completes
    /// or the timeout fires. Cancellation beyond the built-in timeout is
    /// not provided.
    #[instrument(skip(self, request), fields(language = %request.language, source_len = request.source_code.len()))]
    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        let report = self.validate(request);
        if !report.valid {
            info!(issues = report.issues.len(), "Request rejected by validator");
            return ExecutionResult::rejected(&report.issues);
        }

        // No artifacts and no process for declarative queries.
        if request.language == Language::Sql {
            return sql::run(&request.source_code);
        }

        let toolchain = match self.config.toolchain(request.language) {
            Ok(tc) => tc,
            Err(_) => {
                info!("Language not configured on this host");
                return ExecutionResult::unsupported(request.language);
            }
        };

        let start = std::time::Instant::now();
        let result = match request.language {
            Language::Javascript | Language::Python => {
                interpreted::run(&self.config, toolchain, request).await
            }
            Language::Java => jvm::run(&self.config, toolchain, request).await,
            Language::Cpp => native::run(&self.config, toolchain, request).await,
            Language::Sql => unreachable!("handled above"),
        };

        match result {
            Ok(result) => {
                info!(
                    success = result.success,
                    execution_ms = start.elapsed().as_millis() as u64,
                    "Execution completed"
                );
                result
            }
            Err(e) => {
                error!(error = %e, "Execution failed with internal fault");
                ExecutionResult::internal_error(e)
            }
        }
    }
}
