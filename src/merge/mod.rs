pub mod deep_merge;

pub use deep_merge::{deep_merge, reconcile};
