//! Detailed-system derivative formulas
//!
//! A detailed clause names its base chromosomes and then spells out the
//! derivative fragment by fragment:
//!
//! ```text
//! der(13;15)(13pter->13q10::15q10->15q21)
//!  |    |     \_____________/  \_________/
//!  |    |        segment         segment
//!  |    base chromosomes
//!  keyword (der, dic or r)
//! ```
//!
//! [`lexer`] splits the body into `::`, `->` and band tokens, [`formula`]
//! builds a typed [`DetailedFormula`] from them and [`interpret`] turns the
//! formula into a loss/gain/fusion outcome.
//!
//! # Example
//!
//! ```
//! use ferro_iscn::bands::band_index;
//! use ferro_iscn::detailed::DetailedInterpreter;
//!
//! let outcome = DetailedInterpreter::default().interpret_clause("der(7)(::7q11->7q31::)");
//! let q32 = band_index().resolve("7q32.1").unwrap();
//! assert_eq!(outcome.loss_at(q32), 1);
//! assert!(outcome.gained().is_empty());
//! ```

pub mod formula;
pub mod interpret;
pub mod lexer;

pub use formula::{
    has_detailed_body, is_detailed_clause, DetailedFormula, Element, FormulaKind, Segment,
};
pub use interpret::DetailedInterpreter;
pub use lexer::{tokenize, Token};
