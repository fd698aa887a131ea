//! In-process stand-ins for the Postgres store, for tests and local tooling.

mod memory;

pub use memory::MemoryStore;
