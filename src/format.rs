//! Format string tokenizing.
//!
//! [`parse_format`] turns a scanf format string into an ordered list of
//! [`Directive`]s for the matching engine. Its output is already in the
//! shape the engine uses:
//!
//! - Each run of format whitespace becomes one explicit
//!   [`Directive::Whitespace`].
//! - Each ordinary character, including `%%`, becomes a
//!   [`Directive::Literal`] with an implicit whitespace skip in front of it.
//! - Each conversion becomes a [`Directive::Conversion`]. Every conversion
//!   except `%c`, `%C`, `%[` and `%n` also gets an implicit whitespace skip
//!   in front of it.
//!
//! Argument positions are resolved while tokenizing. A format either uses
//! `%N$` on every assigning conversion or on none of them. Mixing the two
//! styles makes the whole format invalid.
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::{parse_format, Directive, Position};
//!
//! let directives = parse_format("%2$d:%1$s").unwrap();
//! let positions: Vec<Position> = directives
//!     .iter()
//!     .filter_map(Directive::as_conversion)
//!     .map(|conv| conv.position)
//!     .collect();
//! assert_eq!(positions, vec![Position::Index(1), Position::Index(0)]);
//! ```

use crate::conv::{classify, is_c_space, ConvSpec, LengthModifier, Scanset, Specifier};
use crate::{Error, Result};
use serde::{Serialize, Serializer};

/// Highest `N` accepted in `%N$`. Matches glibc's `NL_ARGMAX`.
pub const MAX_ARGUMENT_POSITION: usize = 4096;

/// Where a conversion deposits its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// `%*...`: input is consumed, nothing is stored.
    Discard,
    /// 0-based argument index.
    Index(usize),
}

impl Position {
    /// Returns the argument index, or `None` for [`Position::Discard`].
    #[inline]
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Position::Discard => None,
            Position::Index(index) => Some(*index),
        }
    }

    /// The index as a signed number, `-1` for discard.
    #[must_use]
    pub fn as_signed(&self) -> i64 {
        match self {
            Position::Discard => -1,
            Position::Index(index) => i64::try_from(*index).unwrap_or(i64::MAX),
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_signed())
    }
}

/// A conversion directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionDirective {
    /// Byte offset of the `%` in the format string.
    pub start: usize,
    /// Byte offset just past the conversion.
    pub end: usize,
    pub position: Position,
    /// Maximum characters to examine; 0 means unbounded.
    pub width: usize,
    pub spec: ConvSpec,
}

/// One step of the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Directive {
    /// Skip any amount of input whitespace. `explicit` is `true` for
    /// whitespace written in the format, `false` for the automatic skip in
    /// front of literals and most conversions.
    Whitespace { explicit: bool },
    /// Match exactly this character.
    Literal(char),
    Conversion(ConversionDirective),
}

impl Directive {
    #[must_use]
    pub fn as_conversion(&self) -> Option<&ConversionDirective> {
        match self {
            Directive::Conversion(conv) => Some(conv),
            _ => None,
        }
    }
}

/// Tracks which positional style the format has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    /// The next sequential index to hand out.
    Sequential(usize),
    /// A `%N$` conversion has been seen.
    Positional,
}

/// A conversion as written, before validation and position resolution.
#[derive(Debug)]
struct RawConversion {
    start: usize,
    explicit: Option<usize>,
    suppress: bool,
    width: Option<usize>,
    alloc: bool,
    length: LengthModifier,
    specifier: Specifier,
}

struct FormatParser<'a> {
    input: &'a str,
    position: usize,
    numbering: Numbering,
    directives: Vec<Directive>,
}

impl<'a> FormatParser<'a> {
    fn new(input: &'a str) -> Self {
        FormatParser {
            input,
            position: 0,
            numbering: Numbering::Sequential(0),
            directives: Vec::new(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn push(&mut self, directive: Directive) {
        log::trace!("format directive at {}: {:?}", self.position, directive);
        self.directives.push(directive);
    }

    fn parse(mut self) -> Result<Vec<Directive>> {
        while let Some(ch) = self.peek_char() {
            if is_c_space(ch) {
                while self.peek_char().is_some_and(is_c_space) {
                    self.next_char();
                }
                self.push(Directive::Whitespace { explicit: true });
            } else if ch == '%' && !self.input[self.position..].starts_with("%%") {
                let raw = self.lex_conversion()?;
                self.push_conversion(raw)?;
            } else {
                // `%%` is a literal percent sign.
                self.position += if ch == '%' { 2 } else { ch.len_utf8() };
                self.push(Directive::Whitespace { explicit: false });
                self.push(Directive::Literal(ch));
            }
        }
        Ok(self.directives)
    }

    /// Reads a positive decimal number. A leading zero is rejected.
    fn number(&mut self, start: usize) -> Result<Option<usize>> {
        match self.peek_char() {
            Some('1'..='9') => {}
            Some('0') => return Err(Error::invalid_format(start, "zero width or position")),
            _ => return Ok(None),
        }
        let mut value: usize = 0;
        while let Some(digit) = self.peek_char().and_then(|ch| ch.to_digit(10)) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as usize))
                .ok_or_else(|| Error::invalid_format(start, "number too large"))?;
            self.next_char();
        }
        Ok(Some(value))
    }

    fn length_modifier(&mut self) -> LengthModifier {
        match self.peek_char() {
            Some('h') => {
                self.next_char();
                if self.eat('h') {
                    LengthModifier::Char
                } else {
                    LengthModifier::Short
                }
            }
            Some('l') => {
                self.next_char();
                if self.eat('l') {
                    LengthModifier::LongLong
                } else {
                    LengthModifier::Long
                }
            }
            Some(ch @ ('j' | 'z' | 't' | 'L')) => {
                self.next_char();
                match ch {
                    'j' => LengthModifier::IntMax,
                    'z' => LengthModifier::Size,
                    't' => LengthModifier::PtrDiff,
                    _ => LengthModifier::LongDouble,
                }
            }
            _ => LengthModifier::None,
        }
    }

    /// Reads the members of a scanlist; the `[` has been consumed.
    fn scanlist(&mut self, start: usize) -> Result<Specifier> {
        let negated = self.eat('^');
        let mut set = Scanset::new();
        // A `]` right after `[` or `[^` is a member, not the terminator.
        if self.eat(']') {
            set.insert(']');
        }
        loop {
            match self.next_char() {
                Some(']') => return Ok(Specifier::Scanlist { negated, set }),
                Some(ch) => {
                    set.insert(ch);
                }
                None => return Err(Error::invalid_format(start, "unterminated scanlist")),
            }
        }
    }

    fn lex_conversion(&mut self) -> Result<RawConversion> {
        let start = self.position;
        self.next_char();

        let mut explicit = None;
        let mut suppress = false;
        let mut width = None;
        if self.eat('*') {
            suppress = true;
        } else if let Some(n) = self.number(start)? {
            if self.eat('$') {
                if n > MAX_ARGUMENT_POSITION {
                    log::debug!("argument position {} above {}", n, MAX_ARGUMENT_POSITION);
                    return Err(Error::invalid_format(start, "argument position too large"));
                }
                explicit = Some(n);
            } else {
                width = Some(n);
            }
        }
        if width.is_none() {
            width = self.number(start)?;
        }

        let alloc = self.eat('m');
        let length = self.length_modifier();

        let specifier = match self.next_char() {
            Some('[') => self.scanlist(start)?,
            Some(ch) if "diouxXaAeEfFgGsScCpn".contains(ch) => Specifier::Letter(ch),
            Some(_) => return Err(Error::invalid_format(start, "unknown conversion")),
            None => return Err(Error::invalid_format(start, "incomplete conversion")),
        };

        Ok(RawConversion {
            start,
            explicit,
            suppress,
            width,
            alloc,
            length,
            specifier,
        })
    }

    fn resolve_position(&mut self, raw: &RawConversion) -> Result<Position> {
        if raw.suppress {
            return Ok(Position::Discard);
        }
        match (raw.explicit, self.numbering) {
            (Some(n), Numbering::Sequential(0) | Numbering::Positional) => {
                self.numbering = Numbering::Positional;
                Ok(Position::Index(n - 1))
            }
            (None, Numbering::Sequential(next)) => {
                self.numbering = Numbering::Sequential(next + 1);
                Ok(Position::Index(next))
            }
            _ => Err(Error::invalid_format(
                raw.start,
                "positional and sequential conversions are mixed",
            )),
        }
    }

    fn push_conversion(&mut self, raw: RawConversion) -> Result<()> {
        validate(&raw)?;
        let position = self.resolve_position(&raw)?;
        let letter = match raw.specifier {
            Specifier::Letter(ch) => Some(ch),
            Specifier::Scanlist { .. } => None,
        };
        let skips_whitespace = !matches!(letter, None | Some('c' | 'C' | 'n'));
        let default_width = usize::from(matches!(letter, Some('c' | 'C')));

        let spec = classify(raw.specifier, raw.length, raw.alloc)?;
        if skips_whitespace {
            self.push(Directive::Whitespace { explicit: false });
        }
        self.push(Directive::Conversion(ConversionDirective {
            start: raw.start,
            end: self.position,
            position,
            width: raw.width.unwrap_or(default_width),
            spec,
        }));
        Ok(())
    }
}

/// Rejects modifier and letter combinations outside the C grammar.
fn validate(raw: &RawConversion) -> Result<()> {
    use LengthModifier as L;

    let letter = match raw.specifier {
        Specifier::Letter(ch) => ch,
        Specifier::Scanlist { .. } => '[',
    };
    let length_ok = match letter {
        'd' | 'i' | 'o' | 'u' | 'x' | 'X' | 'n' => raw.length != L::LongDouble,
        'a' | 'A' | 'e' | 'E' | 'f' | 'F' | 'g' | 'G' => {
            matches!(raw.length, L::None | L::Long | L::LongDouble)
        }
        's' | 'c' | '[' => matches!(raw.length, L::None | L::Long),
        _ => raw.length == L::None,
    };
    if !length_ok {
        return Err(Error::invalid_format(
            raw.start,
            &format!("length modifier '{}' does not apply to %{}", raw.length, letter),
        ));
    }
    if raw.alloc && !matches!(letter, 's' | 'S' | 'c' | 'C' | '[') {
        return Err(Error::invalid_format(
            raw.start,
            "'m' only applies to string conversions",
        ));
    }
    if letter == 'n' && (raw.suppress || raw.width.is_some()) {
        return Err(Error::invalid_format(
            raw.start,
            "%n takes no width or assignment suppression",
        ));
    }
    Ok(())
}

/// Tokenizes a scanf format string.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] when a `%` does not start a valid
/// conversion (and is not `%%`), or when `%N$` and sequential conversions
/// are mixed. `%*` conversions take no position and never count as
/// either style.
///
/// # Examples
///
/// ```rust
/// use scanf_sim::{parse_format, Directive};
///
/// let directives = parse_format("%%").unwrap();
/// assert_eq!(
///     directives,
///     vec![Directive::Whitespace { explicit: false }, Directive::Literal('%')]
/// );
/// assert!(parse_format("%d %2$d").is_err());
/// ```
pub fn parse_format(format: &str) -> Result<Vec<Directive>> {
    FormatParser::new(format).parse().map_err(|err| {
        log::debug!("rejected format {:?}: {}", format, err);
        err
    })
}
