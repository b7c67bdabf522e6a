//! `lastmile-requisitions` — the approved request record preceding fulfillment.
//!
//! A requisition is what the receiving facility originally asked for. When an
//! order has not yet been packed, the POD workflow seeds proofs of delivery
//! from the requisition instead of from shipped lines.

pub mod requisition;

pub use requisition::{Requisition, RequisitionId, RequisitionLineItem, RequisitionSource};
