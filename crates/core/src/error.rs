//! Domain error model.
//!
//! Every failure crossing a boundary carries a machine-readable message key
//! (e.g. `error.permission.denied`) so downstream layers can localize it.
//! The core never formats human-readable text.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business/domain failures. Infrastructure
/// concerns belong elsewhere. `Display` renders the message key verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The acting user lacks the required fulfillment right.
    #[error("error.permission.denied")]
    PermissionDenied,

    /// The POD's order is already RECEIVED; submission is one-way.
    #[error("error.pod.already.submitted")]
    AlreadySubmitted,

    /// No POD may be created from an order in this status.
    #[error("error.order.status.unsupported")]
    UnsupportedOrderStatus,

    /// A POD line item failed validation; carries the rule's message key.
    #[error("{0}")]
    InvalidLineItem(&'static str),

    /// A requested record was absent; carries the entity's message key.
    #[error("{0}")]
    NotFound(&'static str),

    /// A guarded status update observed a stale status. Caller-retryable.
    #[error("error.concurrent.modification")]
    ConcurrentModification,

    /// A boundary was asked to do something its state machine forbids
    /// (e.g. an invalid order status transition).
    #[error("error.invariant.violated")]
    InvariantViolation,

    /// An identifier string failed to parse.
    #[error("error.id.malformed")]
    MalformedId,
}

impl DomainError {
    pub fn pod_not_found() -> Self {
        Self::NotFound("error.pod.not.found")
    }

    pub fn order_not_found() -> Self {
        Self::NotFound("error.order.not.found")
    }

    pub fn requisition_not_found() -> Self {
        Self::NotFound("error.requisition.not.found")
    }

    pub fn shipment_not_found() -> Self {
        Self::NotFound("error.shipment.not.found")
    }

    pub fn invalid_received_quantity() -> Self {
        Self::InvalidLineItem("error.invalid.received.quantity")
    }

    /// The message key rendered by `Display`.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "error.permission.denied",
            Self::AlreadySubmitted => "error.pod.already.submitted",
            Self::UnsupportedOrderStatus => "error.order.status.unsupported",
            Self::InvalidLineItem(key) | Self::NotFound(key) => key,
            Self::ConcurrentModification => "error.concurrent.modification",
            Self::InvariantViolation => "error.invariant.violated",
            Self::MalformedId => "error.id.malformed",
        }
    }

    /// Whether the caller may retry the operation after re-reading state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}
