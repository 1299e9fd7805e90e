pub mod memory;
pub mod proxy;
pub mod store;

pub use memory::{MemoryStore, StoredObject};
pub use proxy::StorageProxyClient;
pub use store::{ObjectAcl, ObjectStore, PutOptions};
