pub mod kv_store;
pub use kv_store::{InMemoryKvStore, KeyValueStore, PgKvStore};
pub mod lead_repo;
pub use lead_repo::LeadRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
