#![deny(missing_docs)]
//! `optbind` binds command line options directly to your variables.
//!
//! Declare each option against a `&mut` binding, finalize the declarations
//! into a binder, and run it once over the raw argument tokens.
//! Options match anywhere in the stream; whatever the declarations do not
//! consume remains as the positional arguments, in their original order.
//!
//! ```
//! use optbind::{Bound, CommandLineBinder, Declaration, Scalar, Toggle};
//!
//! let mut verbose = false;
//! let mut count: i64 = 0;
//! let positionals = CommandLineBinder::new("program")
//!     .usage("FILE..")
//!     .arguments(Bound::at_least(1))
//!     .declare(
//!         Declaration::flag(Toggle::new(&mut verbose), "verbose")
//!             .short('v')
//!             .help("Make some noise."),
//!     )
//!     .declare(
//!         Declaration::option(Scalar::new(&mut count), "count")
//!             .default("1")
//!             .help("How many times to run."),
//!     )
//!     .build()
//!     .bind_tokens(vec!["--count", "3", "-v", "input.txt"].as_slice())
//!     .unwrap();
//!
//! assert!(verbose);
//! assert_eq!(count, 3);
//! assert_eq!(positionals.get(0), Some("input.txt"));
//! ```
//!
//! A failing run reports every diagnostic it found, not just the first.
//! The implicit `-h`/`--help` flag prints generated help and takes priority
//! over all diagnostics.
//! In production, use [`GeneralBinder::bind`] instead of
//! [`GeneralBinder::bind_tokens`]; it reads [`std::env::args`] and exits the
//! process on help (status `0`) or diagnostics (status `1`).

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

mod api;
mod cast;
mod constant;
mod matcher;
mod model;
mod parser;
mod tokens;

pub use api::{CommandLineBinder, Declaration, Scalar, Toggle};
pub use cast::{Cast, CastError};
pub use model::Bound;
pub use parser::{BindError, GeneralBinder, Positionals};
