//! Conversion-specifier classification.
//!
//! [`classify`] turns a conversion letter (or bracket scanlist), a length
//! modifier and the `m` allocation flag into a [`ConvSpec`]. The result names
//! the target C type and how the conversion consumes input.
//!
//! ```rust
//! use scanf_sim::conv::{classify, ConvSpec, IntKind, LengthModifier, Specifier};
//!
//! let spec = classify(Specifier::Letter('x'), LengthModifier::Long, false).unwrap();
//! match spec {
//!     ConvSpec::Integer { base, ty } => {
//!         assert_eq!(base, 16);
//!         assert_eq!(ty.kind, IntKind::Long);
//!         assert!(!ty.signed);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::decl::TypeSpecifier;
use crate::{Error, Result};
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt;

/// The characters C treats as whitespace in scanf input and formats.
pub const C_WHITESPACE: [char; 6] = [' ', '\t', '\n', '\r', '\u{0b}', '\u{0c}'];

/// Returns `true` for space, tab, newline, carriage return, vertical tab
/// and form feed.
#[inline]
#[must_use]
pub fn is_c_space(ch: char) -> bool {
    C_WHITESPACE.contains(&ch)
}

/// An ordered set of characters. Order follows first appearance.
pub type Scanset = IndexSet<char>;

/// Length modifiers between the width and the conversion letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LengthModifier {
    None,
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `j`
    IntMax,
    /// `z`
    Size,
    /// `t`
    PtrDiff,
    /// `L`
    LongDouble,
}

impl LengthModifier {
    /// Parses a modifier spelling; `""` is [`LengthModifier::None`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::conv::LengthModifier;
    ///
    /// assert_eq!(LengthModifier::from_str_opt("hh"), Some(LengthModifier::Char));
    /// assert_eq!(LengthModifier::from_str_opt("q"), None);
    /// ```
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        Some(match s {
            "" => Self::None,
            "hh" => Self::Char,
            "h" => Self::Short,
            "l" => Self::Long,
            "ll" => Self::LongLong,
            "j" => Self::IntMax,
            "z" => Self::Size,
            "t" => Self::PtrDiff,
            "L" => Self::LongDouble,
            _ => return None,
        })
    }

    /// The modifier as written in a format string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Char => "hh",
            Self::Short => "h",
            Self::Long => "l",
            Self::LongLong => "ll",
            Self::IntMax => "j",
            Self::Size => "z",
            Self::PtrDiff => "t",
            Self::LongDouble => "L",
        }
    }
}

impl fmt::Display for LengthModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer widths selectable by a length modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntKind {
    Char,
    Short,
    Int,
    Long,
    LongLong,
    IntMax,
    Size,
    PtrDiff,
}

/// Target type of an integer or byte-count conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntType {
    pub kind: IntKind,
    pub signed: bool,
}

impl IntType {
    /// Maps a length modifier to an integer type. `L` is not an integer
    /// modifier and yields `None`.
    #[must_use]
    pub const fn from_length(length: LengthModifier, signed: bool) -> Option<Self> {
        let kind = match length {
            LengthModifier::None => IntKind::Int,
            LengthModifier::Char => IntKind::Char,
            LengthModifier::Short => IntKind::Short,
            LengthModifier::Long => IntKind::Long,
            LengthModifier::LongLong => IntKind::LongLong,
            LengthModifier::IntMax => IntKind::IntMax,
            LengthModifier::Size => IntKind::Size,
            LengthModifier::PtrDiff => IntKind::PtrDiff,
            LengthModifier::LongDouble => return None,
        };
        Some(IntType { kind, signed })
    }

    /// Declaration specifiers for this type, e.g. `unsigned long int`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::conv::{IntKind, IntType};
    /// use scanf_sim::TypeSpecifier;
    ///
    /// let ty = IntType { kind: IntKind::Char, signed: true };
    /// assert_eq!(ty.specifiers(), vec![TypeSpecifier::Signed, TypeSpecifier::Char]);
    /// ```
    #[must_use]
    pub fn specifiers(&self) -> Vec<TypeSpecifier> {
        use TypeSpecifier::{Char, Int, Long, Short, Signed, Typedef, Unsigned};

        let mut specs = match (self.kind, self.signed) {
            (IntKind::Char, true) => return vec![Signed, Char],
            (IntKind::IntMax, true) => return vec![Typedef("intmax_t".to_string())],
            (IntKind::IntMax, false) => return vec![Typedef("uintmax_t".to_string())],
            (IntKind::Size, _) => return vec![Typedef("size_t".to_string())],
            (IntKind::PtrDiff, _) => return vec![Typedef("ptrdiff_t".to_string())],
            (_, true) => Vec::new(),
            (_, false) => vec![Unsigned],
        };
        specs.extend(match self.kind {
            IntKind::Char => vec![Char],
            IntKind::Short => vec![Short, Int],
            IntKind::Long => vec![Long, Int],
            IntKind::LongLong => vec![Long, Long, Int],
            _ => vec![Int],
        });
        specs
    }
}

/// Target type of a floating conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FloatType {
    Float,
    Double,
    LongDouble,
}

impl FloatType {
    /// `""` is `float`, `l` is `double`, `L` is `long double`.
    #[must_use]
    pub const fn from_length(length: LengthModifier) -> Option<Self> {
        match length {
            LengthModifier::None => Some(FloatType::Float),
            LengthModifier::Long => Some(FloatType::Double),
            LengthModifier::LongDouble => Some(FloatType::LongDouble),
            _ => None,
        }
    }

    #[must_use]
    pub fn specifiers(&self) -> Vec<TypeSpecifier> {
        match self {
            FloatType::Float => vec![TypeSpecifier::Float],
            FloatType::Double => vec![TypeSpecifier::Double],
            FloatType::LongDouble => vec![TypeSpecifier::Long, TypeSpecifier::Double],
        }
    }
}

/// How a string, character or scanlist conversion consumes input.
///
/// Consumption stops at the first character `ch` for which
/// `scanset.contains(&ch) == negated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringSpec {
    /// `m` modifier: the deposit is a freshly allocated buffer.
    pub alloc: bool,
    /// A null terminator is stored after the consumed text.
    pub terminate: bool,
    /// Wide characters (`wchar_t`).
    pub wide: bool,
    pub scanset: Scanset,
    pub negated: bool,
}

impl StringSpec {
    /// Returns `true` if `ch` ends the consumed run.
    #[inline]
    #[must_use]
    pub fn stops_at(&self, ch: char) -> bool {
        self.scanset.contains(&ch) == self.negated
    }
}

/// A classified conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConvSpec {
    /// `d i o u x X`. `base` 0 means auto-detect.
    Integer { base: u32, ty: IntType },
    /// `a A e E f F g G`
    Float { ty: FloatType },
    /// `s S c C [`
    String(StringSpec),
    /// `p`. Recognized but never simulated.
    Pointer,
    /// `n`. Always a signed type.
    ByteCount { ty: IntType },
}

/// The conversion letter, or a parsed bracket scanlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    Letter(char),
    Scanlist { negated: bool, set: Scanset },
}

fn base_for(letter: char) -> u32 {
    match letter {
        'o' => 8,
        'u' => 10,
        'x' | 'X' => 16,
        _ => 0,
    }
}

fn unsupported_length(letter: char, length: LengthModifier) -> Error {
    Error::contract(format!(
        "length modifier '{}' is not valid for %{}",
        length, letter
    ))
}

/// Classifies a conversion.
///
/// # Errors
///
/// Returns [`Error::Contract`] for a letter that is not a scanf conversion,
/// or a length modifier the conversion does not accept. The tokenizer
/// validates both before calling this, so neither occurs for directives
/// produced by [`parse_format`](crate::parse_format).
pub fn classify(specifier: Specifier, length: LengthModifier, alloc: bool) -> Result<ConvSpec> {
    let letter = match specifier {
        Specifier::Scanlist { negated, set } => {
            return Ok(ConvSpec::String(StringSpec {
                alloc,
                terminate: true,
                wide: length == LengthModifier::Long,
                scanset: set,
                negated,
            }))
        }
        Specifier::Letter(letter) => letter,
    };

    match letter {
        'd' | 'i' | 'o' | 'u' | 'x' | 'X' => {
            let signed = matches!(letter, 'd' | 'i');
            let ty = IntType::from_length(length, signed)
                .ok_or_else(|| unsupported_length(letter, length))?;
            Ok(ConvSpec::Integer {
                base: base_for(letter),
                ty,
            })
        }
        'a' | 'A' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G' => {
            let ty = FloatType::from_length(length).ok_or_else(|| unsupported_length(letter, length))?;
            Ok(ConvSpec::Float { ty })
        }
        's' | 'S' | 'c' | 'C' => {
            let terminate = matches!(letter, 's' | 'S');
            let scanset = if terminate {
                C_WHITESPACE.iter().copied().collect()
            } else {
                Scanset::new()
            };
            Ok(ConvSpec::String(StringSpec {
                alloc,
                terminate,
                wide: length == LengthModifier::Long || matches!(letter, 'S' | 'C'),
                scanset,
                negated: true,
            }))
        }
        'p' => Ok(ConvSpec::Pointer),
        'n' => {
            let ty =
                IntType::from_length(length, true).ok_or_else(|| unsupported_length(letter, length))?;
            Ok(ConvSpec::ByteCount { ty })
        }
        other => Err(Error::contract(format!("unknown conversion %{}", other))),
    }
}
