//! SurrealDB repository implementations.

mod broker;
mod profile;

pub use broker::SurrealBrokerRepository;
pub use profile::SurrealProfileRepository;
