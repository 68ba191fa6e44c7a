pub mod app_config;
pub mod draft_repo;
pub mod favorites_repo;
pub mod kv;

pub use draft_repo::DraftRepo;
pub use favorites_repo::FavoritesRepo;
pub use kv::{FileStore, KvStore, MemoryStore};
