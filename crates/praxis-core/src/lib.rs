#![deny(missing_docs)]

//! # praxis-core — Foundational Types for Practice Compliance
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `serde_json`,
//! `serde_yaml`, `thiserror`, `chrono`, and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** You cannot pass a [`DeviceId`]
//!    where a [`TeamMemberId`] is expected, and blank identifiers are
//!    rejected when a snapshot is deserialized.
//!
//! 2. **Dates, not instants.** Training validity is a calendar concept.
//!    [`ReferenceDate`] is the explicit "today" of every evaluation.
//!
//! 3. **[`CanonicalBytes`] is the sole path to digest computation.** Snapshot
//!    fingerprints are computed over sorted-key compact JSON.
//!
//! 4. **[`PraxisError`] hierarchy.** Structured errors with `thiserror`, no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, PraxisError, ValidationError};
pub use identity::{DeviceId, TeamMemberId, TrainingRecordId};
pub use temporal::ReferenceDate;
