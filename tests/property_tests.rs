//! Property-based tests over generated formats and inputs.
//!
//! These check the bounds every simulation must respect, whatever the
//! input, plus agreement of the integer parser with the standard library.

use proptest::prelude::*;
use scanf_sim::number::parse_int_seq;
use scanf_sim::{parse_format, simulate, Directive, Position};

fn conversion_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("%d".to_string()),
        Just("%*d".to_string()),
        Just("%3s".to_string()),
        Just("%s".to_string()),
        Just("%c".to_string()),
        Just("%2c".to_string()),
        Just("%lf".to_string()),
        Just("%x".to_string()),
        Just("%[a-c]".to_string()),
        Just("%[^,]".to_string()),
        Just("%n".to_string()),
        Just("%ms".to_string()),
        Just(",".to_string()),
        Just(" ".to_string()),
        Just("%%".to_string()),
    ]
}

fn format_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(conversion_piece(), 0..8).prop_map(|pieces| pieces.concat())
}

fn input_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-c0-9x., %é\t-]{0,24}").unwrap()
}

fn assigning_count(directives: &[Directive]) -> usize {
    directives
        .iter()
        .filter_map(Directive::as_conversion)
        .filter(|conv| conv.position != Position::Discard)
        .count()
}

proptest! {
    #[test]
    fn prop_length_within_input(format in format_strategy(), input in input_strategy()) {
        let directives = parse_format(&format).unwrap();
        let result = simulate(&input, &directives).unwrap();
        prop_assert!(result.length <= input.len());
        prop_assert!(input.is_char_boundary(result.length));
    }

    #[test]
    fn prop_ret_bounded_by_conversions(format in format_strategy(), input in input_strategy()) {
        let directives = parse_format(&format).unwrap();
        let result = simulate(&input, &directives).unwrap();
        prop_assert!(result.ret >= -1);
        prop_assert!(result.ret as i64 <= assigning_count(&directives) as i64);
    }

    #[test]
    fn prop_one_record_per_conversion(format in format_strategy(), input in input_strategy()) {
        let directives = parse_format(&format).unwrap();
        let result = simulate(&input, &directives).unwrap();
        let expected = directives.iter().filter_map(Directive::as_conversion).count();
        prop_assert_eq!(result.convs.len(), expected);

        // Matched records come first and their spans stay ordered.
        let matched: Vec<_> = result.convs.iter().map_while(|conv| conv.matched.clone()).collect();
        prop_assert_eq!(matched.len() + result.unmatched().count(), result.convs.len());
        for pair in matched.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start);
        }
        if let Some(last) = matched.last() {
            prop_assert!(last.end <= result.length);
        }
    }

    #[test]
    fn prop_mixed_positional_is_rejected(n in 1usize..50, positional_first in any::<bool>()) {
        let format = if positional_first {
            format!("%{}$d %d", n)
        } else {
            format!("%d %{}$d", n)
        };
        prop_assert!(parse_format(&format).is_err());
    }

    #[test]
    fn prop_positional_only_is_accepted(positions in prop::collection::vec(1usize..20, 1..6)) {
        let format: String = positions.iter().map(|n| format!("%{}$d ", n)).collect();
        let convs = parse_format(&format).unwrap();
        let resolved: Vec<Position> = convs
            .iter()
            .filter_map(Directive::as_conversion)
            .map(|conv| conv.position)
            .collect();
        let expected: Vec<Position> = positions.iter().map(|n| Position::Index(n - 1)).collect();
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn prop_int_parser_agrees_with_std(value in any::<i64>(), base in 2u32..=36) {
        let text = if value < 0 {
            format!("-{}", radix_string(value.unsigned_abs(), base))
        } else {
            radix_string(value.unsigned_abs(), base)
        };
        let (parsed, consumed) = parse_int_seq(&text, base).unwrap();
        prop_assert_eq!(consumed, text.len());
        prop_assert_eq!(i64::try_from(parsed).ok(), i64::from_str_radix(&text, base).ok());
    }

    #[test]
    fn prop_int_parser_stops_at_non_digit(value in any::<u32>(), suffix in "[g-z!]{1,4}") {
        let text = format!("{}{}", value, suffix);
        let (parsed, consumed) = parse_int_seq(&text, 10).unwrap();
        prop_assert_eq!(consumed, value.to_string().len());
        prop_assert_eq!(u32::try_from(parsed).ok(), Some(value));
    }
}

fn radix_string(mut value: u64, base: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = (value % u64::from(base)) as u32;
        digits.push(std::char::from_digit(digit, base).unwrap());
        value /= u64::from(base);
    }
    digits.iter().rev().collect()
}
