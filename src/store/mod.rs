//! Store contract and the terminal HashMap store.

pub mod hashmap;
pub mod traits;

pub use hashmap::HashMapStore;
pub use traits::{Cache, StoreFull, StoreMetrics};
