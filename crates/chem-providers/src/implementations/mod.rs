pub mod cached;
pub mod in_memory;

pub use cached::CachedProvider;
pub use in_memory::InMemoryProvider;
