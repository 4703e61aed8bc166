//! Domain handler implementations
//!
//! This module contains the handler variants the service registry can
//! bind to a domain:
//! - `memory`: direct local delivery into process memory, for tests
//!   and transient tenants
//! - `queuing`: store-and-forward fallback for authenticated relay to
//!   unregistered domains

pub mod memory;
pub mod queuing;

pub use memory::MemoryDomain;
pub use queuing::QueuingHandler;
