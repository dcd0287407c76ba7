// Service exports
pub mod cache;
pub mod catalog;
pub mod postgres;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use catalog::{CatalogClient, CatalogCollections, CatalogError};
pub use postgres::{PostgresClient, PostgresError, ProviderCompletions, StoredCompletion};
