//! `lastmile-pod` — the proof-of-delivery lifecycle.
//!
//! A proof of delivery (POD) records what was actually received against a
//! dispatched order. This crate owns the `OrderPod` aggregate, the
//! status-keyed population strategy used at creation, the store boundary,
//! and [`PodService`], the stateless orchestrator enforcing permission,
//! status and validation rules across create/save/submit.

pub mod pod;
pub mod service;
pub mod store;

pub use pod::{OrderPod, PodId, PodLineItem, PodSource};
pub use service::PodService;
pub use store::PodStore;
