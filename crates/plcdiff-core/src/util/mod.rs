//! Generic collection utilities with no domain coupling.

pub mod deep_equal;
pub mod difference;
pub mod group_by;

pub use deep_equal::deep_equal;
pub use difference::{difference, unique};
pub use group_by::group_by;
