pub mod inputs;
pub mod job;

pub use inputs::*;
pub use job::*;
