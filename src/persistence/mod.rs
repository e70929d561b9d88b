pub mod files;
pub mod json_store;
pub mod memory;
pub mod metadata;
pub mod repository;

pub use files::{
    config_file, ensure_taskitto_dir, init_local_dir, log_file, session_file, tasks_file,
};
pub use json_store::JsonFileRepository;
pub use memory::MemoryRepository;
pub use metadata::{load_metadata, save_metadata, SessionMetadata};
pub use repository::{StoreError, TaskRepository, UserScope};
