pub mod resource;
pub mod storage;

pub use resource::{AssetSource, InMemoryAssetSource, ResourceError, SharedResourceData};
pub use storage::{InMemoryKeyValueStore, KeyValueStore, StorageError};
