pub mod csv_export;
pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, ProjectStore};
