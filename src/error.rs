//! Error types for format tokenizing and scan simulation.
//!
//! Simulation has three separate failure channels, and only two of them
//! are errors:
//!
//! - **Invalid format**: [`Error::InvalidFormat`]. The format string breaks the
//!   conversion grammar or mixes `%N$` and sequential conversions. Do not
//!   simulate it.
//! - **Unimplemented**: [`Error::Unimplemented`]. The simulator reached a
//!   construct it does not model (`%p`, or two writes to the same positional
//!   argument). The input is fine; the caller has to fall back to a path
//!   that does not use the simulator.
//! - **Scan outcomes**: these are not errors. End-of-input and
//!   matching failures show up as data in [`ScanfResult::ret`](crate::ScanfResult::ret),
//!   the same way C's return code reports them.
//!
//! [`Error::Contract`] means a directive was built outside the grammar the
//! tokenizer accepts. [`parse_format`](crate::parse_format) never produces it
//! for its own output.
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::{parse_format, Error};
//!
//! let err = parse_format("%1$d %d").unwrap_err();
//! assert!(matches!(err, Error::InvalidFormat { .. }));
//! eprintln!("rejected: {}", err);
//! ```

use std::fmt;
use thiserror::Error;

/// All errors produced while tokenizing a format or simulating a scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The format string cannot be tokenized.
    #[error("Invalid format at offset {offset}: {msg}")]
    InvalidFormat { offset: usize, msg: String },

    /// The directive stream uses a construct the simulator does not model.
    #[error("Unimplemented conversion at offset {offset}: {reason}")]
    Unimplemented { offset: usize, reason: String },

    /// A directive was constructed outside the supported grammar.
    #[error("Contract violation: {0}")]
    Contract(String),
}

impl Error {
    /// Creates an invalid format error for a directive starting at `offset`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::Error;
    ///
    /// let err = Error::invalid_format(3, "unterminated scanlist");
    /// assert!(err.to_string().contains("offset 3"));
    /// ```
    pub fn invalid_format(offset: usize, msg: &str) -> Self {
        Error::InvalidFormat {
            offset,
            msg: msg.to_string(),
        }
    }

    /// Creates an unimplemented error for the conversion starting at `offset`.
    pub fn unimplemented(offset: usize, reason: &str) -> Self {
        Error::Unimplemented {
            offset,
            reason: reason.to_string(),
        }
    }

    /// Creates a contract violation error.
    pub fn contract<T: fmt::Display>(msg: T) -> Self {
        Error::Contract(msg.to_string())
    }

    /// Returns `true` if the caller should fall back to a non-simulated path.
    #[must_use]
    pub const fn is_unimplemented(&self) -> bool {
        matches!(self, Error::Unimplemented { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
