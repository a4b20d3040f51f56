//! C source rendering of simulated deposits.
//!
//! Code generators usually want simulated deposits as C text. This module
//! provides `Display` for the declaration vocabulary, plus
//! [`Argument::declaration`] and [`ScanfResult::declarations`] for whole
//! declarations.
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::sscanf;
//!
//! let result = sscanf("%d %4c %ms %lf", "12 abcd hi 2.5").unwrap();
//! assert_eq!(
//!     result.declarations("v"),
//!     vec![
//!         "int v0 = 12;",
//!         "char v1[4] = \"abcd\";",
//!         "char *v2 = strdup(\"hi\");",
//!         "double v3 = 2.5;",
//!     ]
//! );
//! ```
//!
//! Literal text is escaped for C. Control characters use octal escapes,
//! which never absorb a following digit. Non-ASCII characters are emitted
//! as UTF-8.

use crate::decl::{Argument, Expression, FloatLiteral, Layer, TypeSpecifier};
use crate::ScanfResult;
use std::fmt::{self, Write};

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            TypeSpecifier::Signed => "signed",
            TypeSpecifier::Unsigned => "unsigned",
            TypeSpecifier::Char => "char",
            TypeSpecifier::Short => "short",
            TypeSpecifier::Int => "int",
            TypeSpecifier::Long => "long",
            TypeSpecifier::Float => "float",
            TypeSpecifier::Double => "double",
            TypeSpecifier::Typedef(name) => name.as_str(),
        };
        f.write_str(keyword)
    }
}

/// Floating suffix implied by a specifier list: `f`, `L` or none.
fn float_suffix(specifiers: &[TypeSpecifier]) -> &'static str {
    match specifiers {
        [TypeSpecifier::Float] => "f",
        [TypeSpecifier::Long, TypeSpecifier::Double] => "L",
        _ => "",
    }
}

fn write_float(f: &mut impl Write, literal: &FloatLiteral, suffix: &str) -> fmt::Result {
    match literal {
        // `{:?}` is the shortest round-trip form and always has a `.` or exponent.
        FloatLiteral::Finite(value) => write!(f, "{:?}{}", value, suffix),
        FloatLiteral::Infinity { negative } => {
            write!(f, "{}INFINITY", if *negative { "-" } else { "" })
        }
        FloatLiteral::NaN { negative, payload } => {
            let sign = if *negative { "-" } else { "" };
            match payload {
                None => write!(f, "{}NAN", sign),
                Some(payload) => {
                    let builtin = match suffix {
                        "f" => "__builtin_nanf",
                        "L" => "__builtin_nanl",
                        _ => "__builtin_nan",
                    };
                    write!(f, "{}{}(\"{}\")", sign, builtin, payload)
                }
            }
        }
    }
}

fn write_escaped(f: &mut impl Write, ch: char, quote: char) -> fmt::Result {
    match ch {
        '\\' => f.write_str("\\\\"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\t' => f.write_str("\\t"),
        '\u{07}' => f.write_str("\\a"),
        '\u{08}' => f.write_str("\\b"),
        '\u{0b}' => f.write_str("\\v"),
        '\u{0c}' => f.write_str("\\f"),
        c if c == quote => write!(f, "\\{}", c),
        c if c.is_ascii_control() => write!(f, "\\{:03o}", c as u32),
        c => f.write_char(c),
    }
}

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_float(f, self, "")
    }
}

fn write_expression(f: &mut impl Write, expr: &Expression, float_suffix: &str) -> fmt::Result {
    match expr {
        Expression::IntegerConstant(value) => write!(f, "{}", value),
        Expression::FloatingConstant(literal) => write_float(f, literal, float_suffix),
        Expression::CharacterConstant { value, wide } => {
            if *wide {
                f.write_char('L')?;
            }
            f.write_char('\'')?;
            write_escaped(f, *value, '\'')?;
            f.write_char('\'')
        }
        Expression::StringLiteral { value, wide } => {
            if *wide {
                f.write_char('L')?;
            }
            f.write_char('"')?;
            for ch in value.chars() {
                write_escaped(f, ch, '"')?;
            }
            f.write_char('"')
        }
        Expression::Call { function, args } => {
            write!(f, "{}(", function)?;
            for (index, arg) in args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write_expression(f, arg, float_suffix)?;
            }
            f.write_char(')')
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expression(f, self, "")
    }
}

/// An argument paired with the variable name it is declared under.
struct Declaration<'a> {
    arg: &'a Argument,
    name: &'a str,
}

impl fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for specifier in &self.arg.specifiers {
            write!(f, "{} ", specifier)?;
        }
        match self.arg.layer {
            None => f.write_str(self.name)?,
            Some(Layer::Pointer) => write!(f, "*{}", self.name)?,
            Some(Layer::Array(len)) => write!(f, "{}[{}]", self.name, len)?,
        }
        f.write_str(" = ")?;
        write_expression(f, &self.arg.initializer, float_suffix(&self.arg.specifiers))?;
        f.write_char(';')
    }
}

impl Argument {
    /// Renders the deposit as a C declaration of a variable called `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::sscanf;
    ///
    /// let result = sscanf("%f %lc", "1.5 x").unwrap();
    /// assert_eq!(result.args.get(0).unwrap().declaration("a"), "float a = 1.5f;");
    /// assert_eq!(result.args.get(1).unwrap().declaration("b"), "wchar_t b = L'x';");
    /// ```
    #[must_use]
    pub fn declaration(&self, name: &str) -> String {
        Declaration { arg: self, name }.to_string()
    }

    /// The expression passed to `scanf` for a variable called `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::sscanf;
    ///
    /// let result = sscanf("%d %s", "1 two").unwrap();
    /// assert_eq!(result.args.get(0).unwrap().address_expr("n"), "&n");
    /// assert_eq!(result.args.get(1).unwrap().address_expr("buf"), "buf");
    /// ```
    #[must_use]
    pub fn address_expr(&self, name: &str) -> String {
        if self.by_reference {
            format!("&{}", name)
        } else {
            name.to_string()
        }
    }
}

impl ScanfResult {
    /// Declarations for every written argument, named `{prefix}{position}`.
    #[must_use]
    pub fn declarations(&self, prefix: &str) -> Vec<String> {
        self.args
            .assigned()
            .map(|(position, arg)| arg.declaration(&format!("{}{}", prefix, position)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn string(value: &str) -> Expression {
        Expression::StringLiteral {
            value: value.to_string(),
            wide: false,
        }
    }

    #[test]
    fn test_escapes() {
        assert_eq!(string("a\"b\\c\n").to_string(), r#""a\"b\\c\n""#);
        assert_eq!(string("\u{1}7").to_string(), r#""\0017""#);
        assert_eq!(string("it's").to_string(), r#""it's""#);
        assert_eq!(
            Expression::CharacterConstant {
                value: '\'',
                wide: false
            }
            .to_string(),
            r"'\''"
        );
        assert_eq!(
            Expression::StringLiteral {
                value: "é".to_string(),
                wide: true
            }
            .to_string(),
            "L\"é\""
        );
    }

    #[test]
    fn test_float_forms() {
        assert_eq!(FloatLiteral::Finite(12.0).to_string(), "12.0");
        assert_eq!(FloatLiteral::Finite(1e300).to_string(), "1e300");
        assert_eq!(FloatLiteral::Infinity { negative: true }.to_string(), "-INFINITY");
        assert_eq!(
            FloatLiteral::NaN {
                negative: false,
                payload: None
            }
            .to_string(),
            "NAN"
        );
        assert_eq!(
            FloatLiteral::NaN {
                negative: false,
                payload: Some("123".to_string())
            }
            .to_string(),
            "__builtin_nan(\"123\")"
        );
    }

    #[test]
    fn test_declarations() {
        let arg = Argument {
            specifiers: vec![TypeSpecifier::Long, TypeSpecifier::Double],
            layer: None,
            initializer: Expression::FloatingConstant(FloatLiteral::NaN {
                negative: true,
                payload: Some("1".to_string()),
            }),
            by_reference: true,
        };
        assert_eq!(arg.declaration("x"), "long double x = -__builtin_nanl(\"1\");");

        let arg = Argument::scalar(
            vec![TypeSpecifier::Unsigned, TypeSpecifier::Long, TypeSpecifier::Long, TypeSpecifier::Int],
            Expression::IntegerConstant(BigInt::from(u64::MAX) * 2u32),
        );
        assert_eq!(
            arg.declaration("big"),
            "unsigned long long int big = 36893488147419103230;"
        );
    }

    #[test]
    fn test_call_rendering() {
        let call = Expression::Call {
            function: "wcsdup".to_string(),
            args: vec![Expression::StringLiteral {
                value: "ab".to_string(),
                wide: true,
            }],
        };
        assert_eq!(call.to_string(), "wcsdup(L\"ab\")");
    }
}
