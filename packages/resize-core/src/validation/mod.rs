pub mod key;
pub mod sizes;

pub use key::normalize_key;
pub use sizes::{SizeSpec, TargetWidth};
