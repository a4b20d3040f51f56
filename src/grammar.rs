//! Accepted format grammar
//!
//! This module documents the scanf format grammar accepted by
//! [`parse_format`](crate::parse_format) and how each piece is simulated.
//!
//! # Directives
//!
//! A format string is read left to right:
//!
//! | Text | Directive |
//! |------|-----------|
//! | run of ` \t\n\r\v\f` | one explicit whitespace skip |
//! | `%%` | implicit skip, then literal `%` |
//! | `%` conversion | implicit skip (most letters), then the conversion |
//! | any other character | implicit skip, then that literal character |
//!
//! Whitespace skips never fail. They consume zero or more whitespace
//! characters from the input.
//!
//! # Conversion syntax
//!
//! ```text
//! % [ N$ | * ] [ width ] [ m ] [ length ] ( letter | '[' scanlist ']' )
//! ```
//!
//! - `N$`: store into argument `N` (1-based). `N` is a positive decimal
//!   number without leading zeros and at most
//!   [`MAX_ARGUMENT_POSITION`](crate::format::MAX_ARGUMENT_POSITION).
//! - `*`: consume the input and store nothing.
//! - `width`: a positive decimal number giving the maximum characters
//!   examined. The default is unbounded, or 1 for `%c`/`%C`.
//! - `m`: allocate the destination buffer (string conversions only).
//! - `length`: `hh h l ll j z t L`
//!
//! ## Letters and accepted length modifiers
//!
//! | Letters | Conversion | Length modifiers | Skips whitespace |
//! |---------|------------|------------------|------------------|
//! | `d i` | signed integer, base auto-detected (0) for both | none `hh h l ll j z t` | yes |
//! | `o u x X` | unsigned integer, base 8/10/16 | none `hh h l ll j z t` | yes |
//! | `a A e E f F g G` | floating | none `l L` | yes |
//! | `s` | string up to whitespace, null-terminated | none `l` | yes |
//! | `S` | wide `%s` | none | yes |
//! | `c` | exactly `width` characters, not terminated | none `l` | no |
//! | `C` | wide `%c` | none | no |
//! | `[...]` | characters in (or, with `^`, not in) the set, null-terminated | none `l` | no |
//! | `p` | pointer: recognized, never simulated | none | yes |
//! | `n` | bytes consumed so far; no width, no `*` | none `hh h l ll j z t` | no |
//!
//! `%d` shares the auto-detecting base with `%i`. The integer parser
//! detects `0x` and a leading `0` for both.
//!
//! ## Scanlists
//!
//! The members are the literal characters between the brackets. A `]`
//! immediately after `[` or `[^` is a member. `-` has no range meaning.
//!
//! ```text
//! %[abc]    a, b or c
//! %[^,]     anything but a comma
//! %[]x]     ] or x
//! ```
//!
//! # Argument positions
//!
//! Without `N$`, assigning conversions take positions 0, 1, 2, ... in order.
//! With `N$`, each conversion takes position `N - 1`. A format uses
//! one style or the other throughout, and `%*` conversions count as
//! neither. A position written twice during a scan stops the simulation
//! with [`Error::Unimplemented`](crate::Error::Unimplemented).
//!
//! # Deposits
//!
//! | Conversion | Declaration |
//! |------------|-------------|
//! | integer | `int x = 42;` (type from length modifier) |
//! | floating | `double x = 2.5;` |
//! | one narrow byte / one wide char, no `m` | `char x = 'a';` |
//! | string without `m` | `char x[N] = "text";` |
//! | string with `m` | `char *x = strdup("text");` |
//! | `%n` | `int x = 7;` |
//!
//! `N` counts UTF-8 bytes for narrow conversions and characters for wide
//! ones, plus one for the terminator of `%s` and `%[`.
//!
//! # Offsets
//!
//! Format ranges, input ranges, `length` and `%n` values are byte offsets.
//! Field widths count characters.

// This module contains only documentation; no implementation code
