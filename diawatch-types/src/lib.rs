//! # diawatch-types
//!
//! Core types for diabetes self-management analytics. This crate defines the
//! schema shared by the diawatch analytics engine, the RAG client, and any
//! tool that reads or writes diawatch measurement journals.
//!
//! ## Design Goals
//!
//! - **Plain data**: Measurement records are simple structs with public fields
//! - **Optional serialization**: Enable the `serde` feature as needed
//! - **Unit safety**: Glucose concentrations are carried as [`MmolL`], never
//!   bare floats
//! - **Versioned schema**: Journal documents include version info for forward
//!   compatibility
//!
//! ## Example
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use diawatch_types::{GlucoseSample, MmolL, TargetRange};
//!
//! let sample = GlucoseSample::new(
//!     MmolL(5.6),
//!     NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
//!     NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
//! )
//! .with_category("Натщесердце");
//!
//! let target = TargetRange::default(); // 4.0-9.0 mmol/L
//! assert!(target.contains(sample.value));
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is included in serialized
//! journal documents to allow consumers to handle format evolution gracefully.

mod document;
mod mmol;
mod profile;
mod records;
mod summary;
mod version;

pub use document::*;
pub use mmol::*;
pub use profile::*;
pub use records::*;
pub use summary::*;
pub use version::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the journal document format.
/// Consumers should check this version and handle older formats appropriately.
pub const SCHEMA_VERSION: u32 = 1;
