pub mod types;

pub use types::{ResolveError, StorageError, TransformError};
