pub mod memory;

pub use memory::MemoryDocument;
