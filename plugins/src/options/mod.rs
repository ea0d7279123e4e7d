pub mod json_file;
pub mod memory;

pub use json_file::JsonFileOptionStore;
pub use memory::MemoryOptionStore;
