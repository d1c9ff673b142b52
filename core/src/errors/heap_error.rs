use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum HeapError {
    #[error("#{index} does not refer to a live object")]
    #[diagnostic(
        code(marksweep::heap::dangling),
        help("the object was reclaimed by a sweep, or the handle belongs to another context")
    )]
    DanglingReference { index: usize },

    #[error("#{index} is not a pair")]
    #[diagnostic(code(marksweep::heap::not_a_pair))]
    NotAPair { index: usize },

    #[error("heap exhausted with {live} live objects")]
    #[diagnostic(code(marksweep::heap::exhausted))]
    Exhausted { live: usize },
}
