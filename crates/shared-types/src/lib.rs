//! # Shared Types Crate
//!
//! Value types that cross the boundary between chaincode and the host ledger.
//!
//! ## Design Principles
//!
//! - **Host shapes only**: every type here mirrors something the ledger hands
//!   to chaincode (query rows, key modifications, transaction timestamps).
//! - **One error taxonomy**: `LedgerError` is returned by the host boundary
//!   and by every decorator layered on top of it, so decorators stay
//!   interchangeable with the store they wrap.
//! - **Opaque payloads**: values are plain bytes; nothing in this crate
//!   interprets them.

pub mod composite;
pub mod entities;
pub mod errors;
pub mod iterators;

pub use composite::*;
pub use entities::*;
pub use errors::*;
pub use iterators::*;
