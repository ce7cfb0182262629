pub mod analysis;
pub mod extraction;
pub mod processor;

pub use processor::*;
