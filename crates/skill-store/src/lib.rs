// error module
pub mod error;
pub use error::{StoreError, StoreResult};

// store trait and config
pub mod store;
pub use store::{SkillStore, StoreConfig};

// backends (存储后端)
pub mod etcd;
pub mod file;
pub mod memory;
pub use etcd::{EtcdClient, EtcdStore, MockEtcdClient};
pub use file::FileStore;
pub use memory::MemoryStore;

// manager module
pub mod manager;
pub use manager::SkillManager;
