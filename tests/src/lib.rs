//! # Attorney-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── history_benchmarks.rs   # Append and replay cost vs log length
//! │
//! └── src/integration/            # Full decorator stacks over MemoryLedger
//!     ├── history_flows.rs
//!     └── partition_isolation.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ac-tests
//!
//! # By category
//! cargo test -p ac-tests integration::history_flows
//!
//! # Benchmarks
//! cargo bench -p ac-tests
//! ```

pub mod integration;
