//! Scan simulation.
//!
//! [`simulate`] replays a directive list from [`parse_format`](crate::parse_format)
//! against an input buffer. No memory is written. The result is a
//! [`ScanfResult`] describing what `sscanf` would have done:
//!
//! - `ret`: what `sscanf` would return. `-1` means input ran out before the
//!   first conversion; otherwise it is the number of assigned conversions.
//! - `length`: bytes of input consumed
//! - `convs`: one record per conversion, in format order, with the input
//!   range it matched (or `None` if scanning stopped before it)
//! - `args`: the deposits, indexed by argument position
//!
//! Stops caused by end-of-input or mismatched input are normal results.
//! Only constructs the simulator does not model come back as errors.
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::{parse_format, simulate};
//!
//! let directives = parse_format("%d %d").unwrap();
//! let result = simulate("12 34", &directives).unwrap();
//! assert_eq!(result.ret, 2);
//! assert_eq!(result.length, 5);
//! assert_eq!(result.convs[1].matched, Some(3..5));
//! ```

use crate::args::Arguments;
use crate::conv::{is_c_space, ConvSpec, StringSpec};
use crate::decl::{Argument, Expression, Layer, TypeSpecifier};
use crate::format::{ConversionDirective, Directive, Position, MAX_ARGUMENT_POSITION};
use crate::number::{parse_float_seq, parse_int_seq};
use crate::{Error, Result, ScanfOptions};
use num_bigint::BigInt;
use serde::Serialize;
use std::ops::Range;

/// Report record for one conversion directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Byte range of the conversion in the format string.
    pub start: usize,
    pub end: usize,
    /// Byte range of input attributed to the conversion, including any
    /// whitespace it skipped implicitly. `None` if it was never matched.
    pub matched: Option<Range<usize>>,
    pub position: Position,
}

/// The outcome of a simulated scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanfResult {
    pub ret: i32,
    pub length: usize,
    pub convs: Vec<Conversion>,
    pub args: Arguments,
}

impl ScanfResult {
    /// Returns `true` if `sscanf` would have returned `EOF`.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        self.ret < 0
    }

    /// Conversions that were never matched.
    pub fn unmatched(&self) -> impl Iterator<Item = &Conversion> {
        self.convs.iter().filter(|conv| conv.matched.is_none())
    }
}

/// Why scanning stopped before the end of the directive list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// No input left for a literal or conversion.
    Input,
    /// A conversion found input it cannot consume.
    Matching,
    /// A literal character did not match.
    Literal,
}

enum Flow {
    Continue,
    Stop(Failure),
}

struct Matcher<'a> {
    input: &'a str,
    options: &'a ScanfOptions,
    offset: usize,
    last_offset: usize,
    ret: i32,
    convs: Vec<Conversion>,
    args: Arguments,
}

impl<'a> Matcher<'a> {
    fn new(input: &'a str, options: &'a ScanfOptions) -> Self {
        Matcher {
            input,
            options,
            offset: 0,
            last_offset: 0,
            ret: 0,
            convs: Vec::new(),
            args: Arguments::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// The unread input, cut to `width` characters when `width > 0`.
    fn window(&self, width: usize) -> &'a str {
        let rest = self.rest();
        if width == 0 {
            return rest;
        }
        rest.char_indices()
            .nth(width)
            .map_or(rest, |(end, _)| &rest[..end])
    }

    fn run(mut self, directives: &[Directive]) -> Result<ScanfResult> {
        let mut stopped_at = directives.len();
        for (index, directive) in directives.iter().enumerate() {
            log::trace!("offset {}: {:?}", self.offset, directive);
            if let Flow::Stop(failure) = self.step(directive)? {
                log::debug!("scan stopped at offset {}: {:?}", self.offset, failure);
                if failure == Failure::Input && self.ret == 0 {
                    self.ret = -1;
                }
                stopped_at = index;
                break;
            }
        }

        for conv in directives[stopped_at..]
            .iter()
            .filter_map(Directive::as_conversion)
        {
            self.convs.push(Conversion {
                start: conv.start,
                end: conv.end,
                matched: None,
                position: conv.position,
            });
        }

        Ok(ScanfResult {
            ret: self.ret,
            length: self.offset,
            convs: self.convs,
            args: self.args,
        })
    }

    fn step(&mut self, directive: &Directive) -> Result<Flow> {
        match directive {
            Directive::Whitespace { explicit } => {
                let skipped: usize = self
                    .rest()
                    .chars()
                    .take_while(|ch| is_c_space(*ch))
                    .map(char::len_utf8)
                    .sum();
                self.offset += skipped;
                if *explicit {
                    self.last_offset = self.offset;
                }
                Ok(Flow::Continue)
            }
            Directive::Literal(expected) => match self.rest().chars().next() {
                None => Ok(Flow::Stop(Failure::Input)),
                Some(ch) if ch == *expected => {
                    self.offset += ch.len_utf8();
                    self.last_offset = self.offset;
                    Ok(Flow::Continue)
                }
                Some(_) => Ok(Flow::Stop(Failure::Literal)),
            },
            Directive::Conversion(conv) => self.convert(conv),
        }
    }

    fn convert(&mut self, conv: &ConversionDirective) -> Result<Flow> {
        let (arg, assigns) = match &conv.spec {
            ConvSpec::Pointer => {
                log::debug!("pointer conversion at format offset {}", conv.start);
                return Err(Error::unimplemented(
                    conv.start,
                    "pointer conversions are not simulated",
                ));
            }
            ConvSpec::ByteCount { ty } => {
                let count = Expression::IntegerConstant(BigInt::from(self.offset));
                (Argument::scalar(ty.specifiers(), count), false)
            }
            spec => {
                let window = self.window(conv.width);
                if window.is_empty() {
                    return Ok(Flow::Stop(Failure::Input));
                }
                let Some((arg, consumed)) = self.match_value(spec, window) else {
                    return Ok(Flow::Stop(Failure::Matching));
                };
                self.offset += consumed;
                (arg, true)
            }
        };

        if let Position::Index(position) = conv.position {
            if position >= MAX_ARGUMENT_POSITION {
                return Err(Error::contract(format!(
                    "argument position {} is outside the format grammar",
                    position + 1
                )));
            }
            if self.args.try_insert(position, arg).is_err() {
                log::debug!("argument {} written twice", position + 1);
                return Err(Error::unimplemented(
                    conv.start,
                    &format!("argument {} is assigned more than once", position + 1),
                ));
            }
            if assigns {
                self.ret = self.ret.saturating_add(1);
            }
        }

        self.convs.push(Conversion {
            start: conv.start,
            end: conv.end,
            matched: Some(self.last_offset..self.offset),
            position: conv.position,
        });
        self.last_offset = self.offset;
        Ok(Flow::Continue)
    }

    /// Matches `spec` at the front of `window`, returning the deposit and
    /// the number of bytes consumed.
    fn match_value(&self, spec: &ConvSpec, window: &str) -> Option<(Argument, usize)> {
        match spec {
            ConvSpec::Integer { base, ty } => {
                let (value, consumed) = parse_int_seq(window, *base)?;
                let arg = Argument::scalar(ty.specifiers(), Expression::IntegerConstant(value));
                Some((arg, consumed))
            }
            ConvSpec::Float { ty } => {
                let (value, consumed) = parse_float_seq(window)?;
                let arg = Argument::scalar(ty.specifiers(), Expression::FloatingConstant(value));
                Some((arg, consumed))
            }
            ConvSpec::String(string) => {
                let consumed = window
                    .char_indices()
                    .find(|(_, ch)| string.stops_at(*ch))
                    .map_or(window.len(), |(index, _)| index);
                if consumed == 0 {
                    return None;
                }
                Some((self.string_argument(string, &window[..consumed]), consumed))
            }
            ConvSpec::Pointer | ConvSpec::ByteCount { .. } => None,
        }
    }

    fn string_argument(&self, spec: &StringSpec, text: &str) -> Argument {
        let wide = spec.wide;
        let units = if wide { text.chars().count() } else { text.len() } + usize::from(spec.terminate);
        let element = if wide {
            vec![TypeSpecifier::Typedef(self.options.wide_char_type.clone())]
        } else {
            vec![TypeSpecifier::Char]
        };

        if let (1, false, Some(value)) = (units, spec.alloc, text.chars().next()) {
            return Argument::scalar(element, Expression::CharacterConstant { value, wide });
        }

        let literal = Expression::StringLiteral {
            value: text.to_string(),
            wide,
        };
        if spec.alloc {
            let function = if wide {
                &self.options.wide_alloc_function
            } else {
                &self.options.alloc_function
            };
            Argument {
                specifiers: element,
                layer: Some(Layer::Pointer),
                initializer: Expression::Call {
                    function: function.clone(),
                    args: vec![literal],
                },
                by_reference: true,
            }
        } else {
            Argument {
                specifiers: element,
                layer: Some(Layer::Array(units)),
                initializer: literal,
                by_reference: false,
            }
        }
    }
}

/// Simulates a scan of `buffer` with default options.
///
/// # Errors
///
/// Returns [`Error::Unimplemented`] if scanning reaches a `%p` conversion or
/// writes one argument position twice. A partial result is not returned in
/// that case.
pub fn simulate(buffer: &str, directives: &[Directive]) -> Result<ScanfResult> {
    simulate_with_options(buffer, directives, &ScanfOptions::default())
}

/// Simulates a scan of `buffer` with custom options.
///
/// # Errors
///
/// See [`simulate`].
pub fn simulate_with_options(
    buffer: &str,
    directives: &[Directive],
    options: &ScanfOptions,
) -> Result<ScanfResult> {
    Matcher::new(buffer, options).run(directives)
}
