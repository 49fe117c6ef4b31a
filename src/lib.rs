// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-iscn: ISCN karyotype interpreter
//!
//! Part of the ferro bioinformatics toolkit. Turns cytogenetic karyotype
//! notation into per-band loss, gain and fusion counts.
//!
//! # Example
//!
//! ```
//! use ferro_iscn::{band_index, KaryotypeInterpreter};
//!
//! let interpreter = KaryotypeInterpreter::new();
//!
//! // Standard notation
//! let report = interpreter.interpret("46,XX,del(5)(q13q31)[20]").unwrap();
//! let outcome = report.clones[0].outcome.as_ref().unwrap();
//! assert_eq!(outcome.loss_at(band_index().resolve("5q21.1").unwrap()), 1);
//!
//! // Detailed-system derivative
//! let report = interpreter
//!     .interpret("46,XX,der(8)(8pter->8q21::hsr::8q24->8qter)")
//!     .unwrap();
//! let outcome = report.clones[0].outcome.as_ref().unwrap();
//! assert!(outcome.gained().is_empty());
//!
//! // Rejected input carries positional errors and a suggested rewrite
//! let err = interpreter.interpret("46,xy,t(9,22)(q34,q11)").unwrap_err();
//! let failure = err.syntax_failure().unwrap();
//! assert_eq!(failure.suggestion.as_deref(), Some("46,XY,t(9;22)(q34;q11)"));
//! ```

pub mod bands;
pub mod config;
pub mod detailed;
pub mod error;
pub mod error_handling;
pub mod orchestrator;
pub mod outcome;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod standard;

// Re-export commonly used types
pub use bands::{band_index, Arm, Band, BandIndex};
pub use config::IscnConfig;
pub use detailed::{DetailedFormula, DetailedInterpreter};
pub use error::{ErrorCode, IscnError, SourceSpan, SyntaxFailure, TokenError};
pub use error_handling::{ErrorConfig, ErrorMode, KaryotypeCleaner};
pub use orchestrator::{CloneReport, KaryotypeInterpreter, KaryotypeReport, Pipeline};
pub use outcome::BiologicalOutcome;
pub use standard::{IscnParser, StandardEventInterpreter};

/// Result type alias for ferro-iscn operations
pub type Result<T> = std::result::Result<T, IscnError>;
