pub mod hot_set;

pub use hot_set::{DEFAULT_HOT_SET_CAPACITY, HotSet};
