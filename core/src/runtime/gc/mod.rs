pub mod heap;
pub mod marker;
pub mod sweeper;
pub mod trace;

pub use heap::{CollectStats, Heap, INITIAL_GC_THRESHOLD};
pub use trace::{Trace, Tracer};
