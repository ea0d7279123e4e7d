pub mod memory;

pub use memory::{ContentItem, InMemoryHost};
