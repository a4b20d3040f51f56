//! Declaration vocabulary for simulated argument deposits.
//!
//! A scan does not write memory. It describes each deposit as the pieces
//! of a C declaration that would hold the same value:
//!
//! - [`TypeSpecifier`]: the declaration specifiers (`unsigned`, `long`, `char`, typedef names)
//! - [`Layer`]: an optional pointer or array wrapper
//! - [`Expression`]: the initializer (constants, string literals, allocation calls)
//! - [`Argument`]: the bundle of all three plus how the argument is passed
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::{sscanf, Expression, TypeSpecifier};
//! use num_bigint::BigInt;
//!
//! let result = sscanf("%hu", "42").unwrap();
//! let arg = result.args.get(0).unwrap();
//!
//! assert_eq!(
//!     arg.specifiers,
//!     vec![TypeSpecifier::Unsigned, TypeSpecifier::Short, TypeSpecifier::Int]
//! );
//! assert_eq!(arg.initializer, Expression::IntegerConstant(BigInt::from(42)));
//! ```

use num_bigint::BigInt;
use serde::{Serialize, Serializer};

fn serialize_decimal<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// A single C declaration specifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TypeSpecifier {
    Signed,
    Unsigned,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// A typedef name such as `size_t` or `wchar_t`.
    Typedef(String),
}

/// Compound type wrapper around the declared object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Layer {
    /// `T *name`
    Pointer,
    /// `T name[N]`
    Array(usize),
}

/// A floating literal as read from input.
///
/// Finite values keep their sign in the `f64`, including `-0.0`.
///
/// # Examples
///
/// ```rust
/// use scanf_sim::FloatLiteral;
///
/// let nan = FloatLiteral::NaN { negative: false, payload: Some("123".into()) };
/// assert!(nan.as_f64().is_nan());
/// assert_eq!(FloatLiteral::Finite(12.0).as_f64(), 12.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FloatLiteral {
    Finite(f64),
    Infinity { negative: bool },
    NaN { negative: bool, payload: Option<String> },
}

impl FloatLiteral {
    /// Wraps a computed value. Overflow to infinity becomes
    /// [`FloatLiteral::Infinity`] so the literal renders the same as `inf`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_infinite() {
            FloatLiteral::Infinity {
                negative: value.is_sign_negative(),
            }
        } else if value.is_nan() {
            FloatLiteral::NaN {
                negative: value.is_sign_negative(),
                payload: None,
            }
        } else {
            FloatLiteral::Finite(value)
        }
    }

    /// Returns the value as an `f64`. NaN payloads are dropped.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            FloatLiteral::Finite(value) => *value,
            FloatLiteral::Infinity { negative: false } => f64::INFINITY,
            FloatLiteral::Infinity { negative: true } => f64::NEG_INFINITY,
            FloatLiteral::NaN { negative: false, .. } => f64::NAN,
            FloatLiteral::NaN { negative: true, .. } => -f64::NAN,
        }
    }

    /// Returns this literal with its sign flipped.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            FloatLiteral::Finite(value) => FloatLiteral::Finite(-value),
            FloatLiteral::Infinity { negative } => FloatLiteral::Infinity { negative: !negative },
            FloatLiteral::NaN { negative, payload } => FloatLiteral::NaN {
                negative: !negative,
                payload,
            },
        }
    }
}

/// An initializer expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expression {
    /// An exact integer value; never truncated to the target type.
    /// Serialized as a decimal string.
    IntegerConstant(#[serde(serialize_with = "serialize_decimal")] BigInt),
    FloatingConstant(FloatLiteral),
    CharacterConstant { value: char, wide: bool },
    StringLiteral { value: String, wide: bool },
    /// A call such as `strdup("text")`.
    Call { function: String, args: Vec<Expression> },
}

impl Expression {
    /// Returns the integer value of an integer constant.
    #[must_use]
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Expression::IntegerConstant(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the literal of a floating constant.
    #[must_use]
    pub fn as_float(&self) -> Option<&FloatLiteral> {
        match self {
            Expression::FloatingConstant(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text carried by a character constant, a string literal,
    /// or the string argument of an allocation call.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Expression::CharacterConstant { value, .. } => Some(value.to_string()),
            Expression::StringLiteral { value, .. } => Some(value.clone()),
            Expression::Call { args, .. } => args.first().and_then(Expression::text),
            _ => None,
        }
    }
}

/// The simulated deposit into one caller-supplied variable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Argument {
    pub specifiers: Vec<TypeSpecifier>,
    pub layer: Option<Layer>,
    pub initializer: Expression,
    /// `true` when the caller passes the address of the variable (`&x`);
    /// `false` when the variable itself is passed (arrays decay to a pointer).
    pub by_reference: bool,
}

impl Argument {
    /// Creates a scalar deposit with no compound wrapper.
    #[must_use]
    pub fn scalar(specifiers: Vec<TypeSpecifier>, initializer: Expression) -> Self {
        Argument {
            specifiers,
            layer: None,
            initializer,
            by_reference: true,
        }
    }

    /// Returns `true` for scalar deposits.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.layer.is_none()
    }
}
