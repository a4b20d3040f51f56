//! # scanf_sim
//!
//! A simulator for C `sscanf` conversions. It predicts what a call would
//! consume, return, and store, without touching memory.
//!
//! ## What does it simulate?
//!
//! Given a format string and an input buffer, `sscanf` reads characters,
//! converts them, and writes into caller-supplied variables. This crate
//! replays that process and reports:
//!
//! - the return value `sscanf` would produce (`-1` for `EOF`)
//! - how many bytes of the buffer were consumed
//! - which slice of input each conversion matched
//! - every deposit, described as a C declaration (`int a = 12;`)
//!
//! ## Key Features
//!
//! - **Full conversion grammar**: `N$` positions, `*` suppression, widths, `m`
//!   allocation, all length modifiers, scanlists and `%n`
//! - **Exact values**: integers are arbitrary precision and hex floats are
//!   correctly rounded
//! - **Serde reports**: every result type implements `Serialize`
//! - **No Unsafe Code**: Written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! scanf_sim = "0.1"
//! ```
//!
//! ### Simulating a call
//!
//! ```rust
//! use scanf_sim::sscanf;
//!
//! let result = sscanf("%d-%3s %lf", "42-abcdef 2.5").unwrap();
//! assert_eq!(result.ret, 2);
//! assert_eq!(result.length, 6);
//! assert_eq!(
//!     result.declarations("v"),
//!     vec!["int v0 = 42;", "char v1[4] = \"abc\";"]
//! );
//! ```
//!
//! ### Two phases
//!
//! A format can be tokenized once and replayed on many buffers:
//!
//! ```rust
//! use scanf_sim::{parse_format, simulate};
//!
//! let directives = parse_format("%2$s %1$d").unwrap();
//! for input in ["word 7", "word", ""] {
//!     let result = simulate(input, &directives).unwrap();
//!     assert!(result.ret <= 2);
//! }
//! ```
//!
//! ## Errors
//!
//! Three outcomes are kept apart:
//!
//! - malformed formats fail in [`parse_format`] with [`Error::InvalidFormat`]
//! - constructs that cannot be simulated (`%p`, one position written twice)
//!   fail in [`simulate`] with [`Error::Unimplemented`]
//! - everything `sscanf` itself could do, including `EOF` and matching
//!   failures, is a normal [`ScanfResult`]
//!
//! ## Grammar
//!
//! See the [`grammar`] module for the accepted format syntax.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Rendered declarations for a few calls
//! - **`report.rs`** - A JSON report of one simulation
//!
//! Run any example with: `cargo run --example <name>`

pub mod args;
pub mod conv;
pub mod decl;
pub mod error;
pub mod format;
pub mod grammar;
pub mod hexfloat;
pub mod number;
pub mod options;
pub mod render;
pub mod scan;

pub use args::Arguments;
pub use conv::ConvSpec;
pub use decl::{Argument, Expression, FloatLiteral, Layer, TypeSpecifier};
pub use error::{Error, Result};
pub use format::{parse_format, ConversionDirective, Directive, Position};
pub use options::ScanfOptions;
pub use scan::{simulate, simulate_with_options, Conversion, ScanfResult};

/// Tokenizes `format` and simulates a scan of `buffer` with default options.
///
/// # Examples
///
/// ```rust
/// use scanf_sim::sscanf;
///
/// let result = sscanf("%x:%x", "ff:10").unwrap();
/// assert_eq!(result.ret, 2);
/// assert_eq!(result.declarations("n"), vec!["unsigned int n0 = 255;", "unsigned int n1 = 16;"]);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the format is malformed and
/// [`Error::Unimplemented`] if the scan reaches a construct that is not
/// simulated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn sscanf(format: &str, buffer: &str) -> Result<ScanfResult> {
    sscanf_with_options(format, buffer, &ScanfOptions::default())
}

/// Tokenizes `format` and simulates a scan of `buffer` with custom options.
///
/// # Examples
///
/// ```rust
/// use scanf_sim::{sscanf_with_options, ScanfOptions};
///
/// let options = ScanfOptions::new().with_wide_char_type("char32_t");
/// let result = sscanf_with_options("%lc", "x", &options).unwrap();
/// assert_eq!(result.declarations("c"), vec!["char32_t c0 = L'x';"]);
/// ```
///
/// # Errors
///
/// See [`sscanf`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn sscanf_with_options(format: &str, buffer: &str, options: &ScanfOptions) -> Result<ScanfResult> {
    let directives = parse_format(format)?;
    simulate_with_options(buffer, &directives, options)
}
