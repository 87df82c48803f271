//! # signdoc testkit
//!
//! Testing utilities for signdoc.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed transactions with the exact sign bytes they must produce
//! - **Generators**: Proptest strategies for messages, field numbers, and transactions
//! - **Fixtures**: A bank/authz schema and helpers for building signable transactions
//!
//! ## Golden Vectors
//!
//! ```rust
//! use signdoc_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     println!("{name}: {matches} {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use signdoc_testkit::generators::{tx_from_params, TxParams};
//! use signdoc_testkit::TestFixture;
//!
//! proptest! {
//!     #[test]
//!     fn sign_bytes_deterministic(params: TxParams) {
//!         let handler = TestFixture::new().handler();
//!         let tx = tx_from_params(&params);
//!         let a = handler.get_sign_bytes(&params.signer, &tx).unwrap();
//!         let b = handler.get_sign_bytes(&params.signer, &tx).unwrap();
//!         prop_assert_eq!(a, b);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use signdoc::Coin;
//! use signdoc_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let tx = fixture.tx(vec![fixture.send("cosmos1bob", &[Coin::new("10", "stake")])], "hi");
//! let bytes = fixture.sign_bytes(&tx).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{bank_registry, msg_exec, msg_send, TestFixture};
pub use generators::{tx_from_params, TxParams};
pub use vectors::{all_vectors, tx_from_vector, verify_all_vectors, GoldenVector, VectorMsg};
