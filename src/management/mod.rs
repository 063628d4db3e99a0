mod cache;
mod session;
mod store;

pub use cache::Cache;
pub use session::SessionStore;
pub use store::CacheEntry;
pub use store::CacheStore;
pub use store::FileCacheStore;
pub use store::MemoryCacheStore;
