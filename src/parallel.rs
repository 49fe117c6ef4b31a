//! Parallel processing support for ferro-iscn
//!
//! Karyotype strings are independent of each other, so a batch can be
//! interpreted across threads with rayon. Enable with the `parallel` feature.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_iscn::parallel::{interpret_parallel, interpret_parallel_ok};
//! use ferro_iscn::KaryotypeInterpreter;
//!
//! let interpreter = KaryotypeInterpreter::new();
//! let karyotypes = vec![
//!     "46,XX,del(5)(q13q31)[20]",
//!     "47,XY,+8[10]/46,XY[10]",
//!     "46,XX,der(7)(::7q11->7q31::)",
//! ];
//!
//! let results = interpret_parallel(&interpreter, &karyotypes);
//! assert_eq!(results.len(), karyotypes.len());
//!
//! let _reports = interpret_parallel_ok(&interpreter, &karyotypes);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::IscnError;
use crate::error_handling::Cleaner;
use crate::orchestrator::{KaryotypeInterpreter, KaryotypeReport};
use crate::standard::{EventInterpreter, StandardParser};

/// Interpret multiple karyotype strings in parallel
///
/// Returns a vector of results, one for each input string.
/// Order is preserved.
pub fn interpret_parallel<P, I, C, S>(
    interpreter: &KaryotypeInterpreter<P, I, C>,
    karyotypes: &[S],
) -> Vec<Result<KaryotypeReport, IscnError>>
where
    P: StandardParser + Sync,
    I: EventInterpreter + Sync,
    C: Cleaner + Sync,
    S: AsRef<str> + Sync,
{
    karyotypes
        .par_iter()
        .map(|k| interpreter.interpret(k.as_ref()))
        .collect()
}

/// Interpret multiple karyotype strings in parallel, filtering errors
///
/// Returns only the reports that interpreted successfully.
pub fn interpret_parallel_ok<P, I, C, S>(
    interpreter: &KaryotypeInterpreter<P, I, C>,
    karyotypes: &[S],
) -> Vec<KaryotypeReport>
where
    P: StandardParser + Sync,
    I: EventInterpreter + Sync,
    C: Cleaner + Sync,
    S: AsRef<str> + Sync,
{
    karyotypes
        .par_iter()
        .filter_map(|k| interpreter.interpret(k.as_ref()).ok())
        .collect()
}
