pub mod catalog;
pub mod engine;
pub mod memory;
pub mod persistence;

pub use catalog::{Collections, StoreHandle};
pub use engine::{RecordStore, find_by_id, next_id, position_of};
pub use memory::InMemoryStore;
pub use persistence::JsonFileStore;
