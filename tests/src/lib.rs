//! # Federation-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── fixtures/         # Serialized blocks from a reference network
//! └── src/integration/  # Cross-crate flows and property tests
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fc-tests
//! cargo test -p fc-tests integration::signed_block_vector
//! ```

pub mod integration;
