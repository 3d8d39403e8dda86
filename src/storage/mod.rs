//! Storage backends implementing the Datastore trait

pub mod in_memory;

pub use in_memory::InMemoryDatastore;
