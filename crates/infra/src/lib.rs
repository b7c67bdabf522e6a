//! `lastmile-infra` — infrastructure implementations of the domain boundaries.
//!
//! Currently in-memory only (tests/dev); SQL-backed implementations slot in
//! behind the same traits.

pub mod in_memory;

mod integration_tests;

pub use in_memory::{
    InMemoryOrderStore, InMemoryPermissionSource, InMemoryPodStore, InMemoryRequisitionSource,
    InMemoryShipmentSource,
};
