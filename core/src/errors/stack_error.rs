use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum StackError {
    #[error("Stack Overflow! root stack is full ({capacity} entries)")]
    #[diagnostic(
        code(marksweep::stack::overflow),
        help("pop roots you no longer need, or raise `stack_max`")
    )]
    Overflow { capacity: usize },

    #[error("Stack Underflow! needed {needed} root(s) but only {available} available")]
    #[diagnostic(
        code(marksweep::stack::underflow),
        help("`pair` consumes the two topmost roots; `pop` needs at least one")
    )]
    Underflow { needed: usize, available: usize },
}
