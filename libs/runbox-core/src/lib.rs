/// Runbox Core - Sandboxed Multi-Language Code Execution
///
/// **Core Responsibility:**
/// Accept a (language, code, stdin) tuple, screen it for known-dangerous
/// constructs, materialize it as on-disk artifacts, invoke the appropriate
/// toolchain under a hard wall-clock timeout, capture output, and guarantee
/// artifact cleanup on every exit path.
///
/// **Architecture:**
/// 1. Validator screens source text before anything touches the filesystem
///    (validator.rs)
/// 2. CodeExecutor dispatches to a language-specific strategy (executor.rs,
///    strategy/)
/// 3. ArtifactSet owns the per-attempt scratch files and removes them on
///    drop (artifact.rs)
///
/// This crate knows nothing about HTTP, persistence, or auth - those live
/// with the callers.

pub mod artifact;
pub mod config;
pub mod executor;
pub mod strategy;
pub mod types;
pub mod validator;

pub use config::{LanguageToolchain, ToolchainConfig};
pub use executor::CodeExecutor;
pub use types::{ExecutionRequest, ExecutionResult, Language, ValidationReport};
pub use validator::validate;
