pub mod language;
pub mod node;
pub mod page;
pub mod patterns;
pub mod registry;
pub mod stats;
pub mod tokenizer;
pub mod word;

pub use node::*;
pub use page::*;
pub use registry::*;
pub use stats::*;
pub use tokenizer::*;
pub use word::*;

#[cfg(test)]
mod tests;
