pub mod config;
pub mod context;
pub mod errors;
pub mod runtime;
pub mod script;

pub use config::GcConfig;
pub use context::Context;
pub use errors::GcError;
pub use runtime::gc::CollectStats;
pub use runtime::value::{ObjRef, Object, ObjectKind};

/// Convenience function to run an operation script against a fresh context.
pub fn run(source: &str) -> Result<Context, GcError> {
    run_with_config(source, GcConfig::default())
}

pub fn run_with_config(source: &str, config: GcConfig) -> Result<Context, GcError> {
    let ops = script::parse(source)?;
    let mut ctx = Context::with_config(config)?;
    for op in &ops {
        script::execute(&mut ctx, op)?;
    }
    Ok(ctx)
}
