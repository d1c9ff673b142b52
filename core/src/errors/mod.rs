mod config_error;
mod heap_error;
mod stack_error;
mod syntax_error;

pub use config_error::ConfigError;
pub use heap_error::HeapError;
pub use stack_error::StackError;
pub use syntax_error::SyntaxError;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type wrapping every failure the collector and its front-ends report.
///
/// Stack and heap errors are precondition violations: callers observe the kind here, and a
/// front-end is expected to treat them as fatal rather than retry.
#[derive(Debug, Error, Diagnostic)]
pub enum GcError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Heap(#[from] HeapError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}
