//! Abstraction layer: traits the application services depend on, implemented
//! by `folio-infra` adapters (and by mocks in tests).

pub mod config;
pub mod shared_store;

pub use config::ConfigPort;
pub use shared_store::{
    ContextId, SharedStoreHub, SharedStorePort, StoreChange, StoreSubscription,
};
