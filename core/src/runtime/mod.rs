pub mod gc;
pub mod stack;
pub mod value;
