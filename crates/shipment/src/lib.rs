//! `lastmile-shipment` — shipped-line model and source boundary.
//!
//! Once an order is packed, what was actually put in the boxes is recorded as
//! shipment lines. PODs for packed orders are seeded from these rather than
//! from the requisition, so receipts are checked against what shipped.

pub mod line_item;

pub use line_item::{ShipmentLineItem, ShipmentLineSource};
