//! `lastmile-auth` — pure authorization boundary for fulfillment.
//!
//! This crate is intentionally decoupled from HTTP and storage. It names the
//! fulfillment rights and defines the permission source the lifecycle service
//! consults; it does not implement the permission-rule engine itself.

pub mod rights;
pub mod source;

pub use rights::Right;
pub use source::FulfillmentPermissionSource;
