//! `lastmile-orders` — order status model and the status oracle boundary.
//!
//! Orders are owned by the order subsystem; this crate only models the slice
//! the POD workflow depends on: the status lifecycle and a boundary for
//! reading and (conditionally) advancing it.

pub mod order;
pub mod oracle;

pub use oracle::OrderStatusOracle;
pub use order::{Order, OrderStatus};
