//! Domain model and pure logic for the evotrack coaching client.
//!
//! Everything in this crate is synchronous and side-effect free: entity
//! models and DTOs mapped to the coaching API's wire format, the metric
//! enumeration, the evolution aggregation used by progress charts, and
//! JSON payload cleaning for partial updates.  Network access and caching
//! live in `evotrack-client` and `evotrack-store`.

pub mod error;
pub mod evolution;
pub mod history;
pub mod metric;
pub mod models;
pub mod payload;
pub mod types;
