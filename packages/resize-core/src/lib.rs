pub mod constants;
pub mod errors;
pub mod keys;
pub mod request;
pub mod resolver;
pub mod response;
pub mod storage;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{DEFAULT_QUALITY, DEFAULT_VARIANT_PREFIX, DEFAULT_WIDTHS};
pub use errors::{ResolveError, StorageError, TransformError};
pub use keys::variant_key;
pub use request::ImageRequest;
pub use resolver::{Resolver, ResolverConfig};
pub use response::ResponseEnvelope;
pub use storage::{MemoryStore, ObjectAcl, ObjectStore, PutOptions, StorageProxyClient};
pub use transform::{EncodeSettings, OutputFormat, decode_image, encode_image, resize_to_width};
pub use validation::{SizeSpec, TargetWidth, normalize_key};
