use num_bigint::BigInt;
use scanf_sim::{
    parse_format, simulate, sscanf, sscanf_with_options, Error, Expression, FloatLiteral, Layer,
    Position, ScanfOptions, TypeSpecifier,
};

fn decls(format: &str, input: &str) -> Vec<String> {
    sscanf(format, input).unwrap().declarations("v")
}

#[test]
fn test_mixed_record() {
    let result = sscanf("%s %d %lf %c", "name 42 3.25 xyz").unwrap();
    println!("{:?}", result);

    assert_eq!(result.ret, 4);
    assert_eq!(result.length, 14);
    assert_eq!(
        result.declarations("v"),
        vec![
            "char v0[5] = \"name\";",
            "int v1 = 42;",
            "double v2 = 3.25;",
            "char v3 = 'x';",
        ]
    );
}

#[test]
fn test_integer_types_follow_length_modifiers() {
    assert_eq!(decls("%hhd", "-5"), vec!["signed char v0 = -5;"]);
    assert_eq!(decls("%hhu", "5"), vec!["unsigned char v0 = 5;"]);
    assert_eq!(decls("%hi", "5"), vec!["short int v0 = 5;"]);
    assert_eq!(decls("%lo", "17"), vec!["unsigned long int v0 = 15;"]);
    assert_eq!(decls("%lld", "5"), vec!["long long int v0 = 5;"]);
    assert_eq!(decls("%jd", "5"), vec!["intmax_t v0 = 5;"]);
    assert_eq!(decls("%ju", "5"), vec!["uintmax_t v0 = 5;"]);
    assert_eq!(decls("%zu", "5"), vec!["size_t v0 = 5;"]);
    assert_eq!(decls("%td", "5"), vec!["ptrdiff_t v0 = 5;"]);
}

#[test]
fn test_integer_values_are_not_truncated() {
    assert_eq!(
        decls("%llu", "18446744073709551616"),
        vec!["unsigned long long int v0 = 18446744073709551616;"]
    );
    let result = sscanf("%hhd", "1000").unwrap();
    assert_eq!(
        result.args.get(0).unwrap().initializer,
        Expression::IntegerConstant(BigInt::from(1000))
    );
}

#[test]
fn test_float_types_and_forms() {
    assert_eq!(decls("%f", "0.5"), vec!["float v0 = 0.5f;"]);
    assert_eq!(decls("%Lg", "2"), vec!["long double v0 = 2.0L;"]);
    assert_eq!(decls("%le", "-inf"), vec!["double v0 = -INFINITY;"]);
    assert_eq!(decls("%lf", "NaN"), vec!["double v0 = NAN;"]);
    assert_eq!(decls("%f", "nan(7)"), vec!["float v0 = __builtin_nanf(\"7\");"]);
}

#[test]
fn test_hex_float_extremes() {
    assert_eq!(decls("%la", "0x1p-1074"), vec!["double v0 = 5e-324;"]);
    assert_eq!(decls("%la", "0x1p-1075"), vec!["double v0 = 0.0;"]);
    assert_eq!(decls("%la", "0x1p1024"), vec!["double v0 = INFINITY;"]);
    assert_eq!(decls("%lf", "-1e400"), vec!["double v0 = -INFINITY;"]);
}

#[test]
fn test_float_stops_before_dangling_exponent() {
    let result = sscanf("%lf%s", "1e+x").unwrap();
    assert_eq!(result.ret, 2);
    assert_eq!(result.convs[0].matched, Some(0..1));
    assert_eq!(result.declarations("v")[1], "char v1[4] = \"e+x\";");
}

#[test]
fn test_eof_versus_matching_failure() {
    assert_eq!(sscanf("%d", "").unwrap().ret, -1);
    assert_eq!(sscanf("%d", " \n\t").unwrap().ret, -1);
    assert_eq!(sscanf("%d", "abc").unwrap().ret, 0);
    assert_eq!(sscanf("%d %d", "1").unwrap().ret, 1);
    assert_eq!(sscanf("x%d", "").unwrap().ret, -1);
    assert_eq!(sscanf("x%d", "y").unwrap().ret, 0);
}

#[test]
fn test_empty_format_consumes_nothing() {
    let result = sscanf("", "anything").unwrap();
    assert_eq!(result.ret, 0);
    assert_eq!(result.length, 0);
    assert!(result.convs.is_empty());
}

#[test]
fn test_trailing_whitespace_is_consumed() {
    let result = sscanf("%d ", "7   ").unwrap();
    assert_eq!(result.ret, 1);
    assert_eq!(result.length, 4);
}

#[test]
fn test_percent_literal() {
    let result = sscanf("%d%%", "100%").unwrap();
    assert_eq!(result.ret, 1);
    assert_eq!(result.length, 4);

    let result = sscanf("%d%%", "100 %").unwrap();
    assert_eq!(result.length, 5);
}

#[test]
fn test_suppressed_conversions_are_recorded_but_not_stored() {
    let result = sscanf("%*s %*d %d", "skip 1 2").unwrap();
    assert_eq!(result.ret, 1);
    assert_eq!(result.convs.len(), 3);
    assert_eq!(result.convs[0].position, Position::Discard);
    assert_eq!(result.convs[1].position, Position::Discard);
    assert_eq!(result.convs[2].position, Position::Index(0));
    assert_eq!(result.args.len(), 1);
}

#[test]
fn test_byte_counts() {
    let result = sscanf("%s%n %s%n", "ab cde").unwrap();
    assert_eq!(result.ret, 2);
    assert_eq!(
        result.declarations("v"),
        vec![
            "char v0[3] = \"ab\";",
            "int v1 = 2;",
            "char v2[4] = \"cde\";",
            "int v3 = 6;",
        ]
    );
}

#[test]
fn test_byte_count_uses_bytes() {
    let result = sscanf("%3c%n", "héllo").unwrap();
    assert_eq!(result.declarations("v")[1], "int v1 = 4;");
    assert_eq!(result.length, 4);
}

#[test]
fn test_byte_count_with_length_modifier() {
    assert_eq!(decls("%d%hhn", "12"), vec!["int v0 = 12;", "signed char v1 = 2;"]);
    assert_eq!(decls("%d%zn", "12"), vec!["int v0 = 12;", "size_t v1 = 2;"]);
}

#[test]
fn test_strings_and_widths() {
    assert_eq!(decls("%3s", "abcdef"), vec!["char v0[4] = \"abc\";"]);
    assert_eq!(decls("%s", "a"), vec!["char v0[2] = \"a\";"]);
    assert_eq!(decls("%2c", "abc"), vec!["char v0[2] = \"ab\";"]);
    assert_eq!(decls("%S", "ab"), vec!["wchar_t v0[3] = L\"ab\";"]);
    assert_eq!(decls("%C", "é"), vec!["wchar_t v0 = L'é';"]);
}

#[test]
fn test_width_counts_characters() {
    let result = sscanf("%2s", "éèx").unwrap();
    assert_eq!(result.length, 4);
    assert_eq!(result.declarations("v"), vec!["char v0[5] = \"éè\";"]);
}

#[test]
fn test_allocated_strings() {
    assert_eq!(decls("%ms", "hello"), vec!["char *v0 = strdup(\"hello\");"]);
    assert_eq!(decls("%m[a-z]", "a-z"), vec!["char *v0 = strdup(\"a-z\");"]);
    assert_eq!(decls("%mls", "hi"), vec!["wchar_t *v0 = wcsdup(L\"hi\");"]);

    let result = sscanf("%ms", "x").unwrap();
    let arg = result.args.get(0).unwrap();
    assert_eq!(arg.address_expr("p"), "&p");
    assert_eq!(arg.layer, Some(Layer::Pointer));
}

#[test]
fn test_scanlists() {
    assert_eq!(decls("%[]a]", "a]b"), vec!["char v0[3] = \"a]\";"]);
    assert_eq!(decls("%[^\n]", "line one\nline two"), vec!["char v0[9] = \"line one\";"]);
    assert_eq!(decls("%[^]]", "ab]"), vec!["char v0[3] = \"ab\";"]);

    // A scanlist does not skip leading whitespace.
    let result = sscanf("%[a]", " a").unwrap();
    assert_eq!(result.ret, 0);
}

#[test]
fn test_scanlist_is_null_terminated() {
    // C stores a terminator after `%[` the same as after `%s`, unlike `%c`.
    assert_eq!(decls("%[^abc]", "xyzabc"), vec!["char v0[4] = \"xyz\";"]);
    assert_eq!(decls("%3c", "xyz"), vec!["char v0[3] = \"xyz\";"]);
    assert_eq!(decls("%l[x]", "xx"), vec!["wchar_t v0[3] = L\"xx\";"]);
}

#[test]
fn test_scanlist_members_are_literal() {
    let result = sscanf("%[a-c]", "b").unwrap();
    assert_eq!(result.ret, 0);
    assert_eq!(decls("%[a-c]", "c-a"), vec!["char v0[4] = \"c-a\";"]);
}

#[test]
fn test_positional_arguments() {
    let result = sscanf("%2$s %1$d", "word 9").unwrap();
    assert_eq!(result.ret, 2);
    assert_eq!(
        result.declarations("v"),
        vec!["int v0 = 9;", "char v1[5] = \"word\";"]
    );
    assert_eq!(result.convs[0].position, Position::Index(1));
}

#[test]
fn test_positional_gap_after_early_stop() {
    let result = sscanf("%3$d %1$d", "5 x").unwrap();
    assert_eq!(result.ret, 1);
    assert_eq!(result.args.len(), 3);
    assert_eq!(result.args.count(), 1);
    assert!(result.args.get(2).is_some());
    assert_eq!(result.unmatched().count(), 1);
}

#[test]
fn test_positional_with_discard() {
    let result = sscanf("%*d %1$d", "1 2").unwrap();
    assert_eq!(result.ret, 1);
    assert_eq!(result.declarations("v"), vec!["int v0 = 2;"]);
}

#[test]
fn test_unimplemented_constructs() {
    let err = sscanf("%p", "0x1").unwrap_err();
    assert!(err.is_unimplemented());
    assert!(matches!(err, Error::Unimplemented { offset: 0, .. }));

    let err = sscanf("%d %2$d", "1 2").unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { .. }));

    let err = sscanf("%1$d %1$d", "1 2").unwrap_err();
    assert!(matches!(err, Error::Unimplemented { offset: 5, .. }));
}

#[test]
fn test_huge_argument_position_is_rejected() {
    let err = sscanf(&format!("%{}$d", usize::MAX), "1").unwrap_err();
    assert!(matches!(err, Error::InvalidFormat { offset: 0, .. }));
    assert!(sscanf("%1000000000$d", "1").is_err());
}

#[test]
fn test_directives_are_reusable() {
    let directives = parse_format("%d,%d").unwrap();
    let inputs = [("1,2", 2), ("1;2", 1), ("", -1), ("x", 0)];
    for (input, ret) in inputs {
        assert_eq!(simulate(input, &directives).unwrap().ret, ret, "input {:?}", input);
    }
}

#[test]
fn test_custom_options() {
    let options = ScanfOptions::new()
        .with_alloc_function("xstrdup")
        .with_wide_alloc_function("xwcsdup")
        .with_wide_char_type("char32_t");
    let result = sscanf_with_options("%ms %mls %lc", "a b c", &options).unwrap();
    assert_eq!(
        result.declarations("v"),
        vec![
            "char *v0 = xstrdup(\"a\");",
            "char32_t *v1 = xwcsdup(L\"b\");",
            "char32_t v2 = L'c';",
        ]
    );
}

#[test]
fn test_deposit_shapes() {
    let result = sscanf("%u %lf %4s", "3 1.5 text").unwrap();
    let args: Vec<_> = result.args.assigned().map(|(_, arg)| arg.clone()).collect();

    assert_eq!(args[0].specifiers, vec![TypeSpecifier::Unsigned, TypeSpecifier::Int]);
    assert!(args[0].is_scalar());
    assert_eq!(
        args[1].initializer,
        Expression::FloatingConstant(FloatLiteral::Finite(1.5))
    );
    assert_eq!(args[2].layer, Some(Layer::Array(5)));
    assert!(!args[2].by_reference);
}

#[test]
fn test_json_report() {
    let result = sscanf("%d %ms", "4 abc").unwrap();
    let json = serde_json::to_value(&result).unwrap();
    println!("{}", serde_json::to_string_pretty(&json).unwrap());

    assert_eq!(json["ret"], 2);
    assert_eq!(json["length"], 5);
    assert_eq!(json["convs"][0]["start"], 0);
    assert_eq!(json["convs"][0]["end"], 2);
    assert_eq!(json["convs"][1]["start"], 3);
    assert_eq!(json["convs"][1]["end"], 6);
    assert_eq!(json["args"][0]["specifiers"][0], "Int");
    assert_eq!(json["args"][1]["layer"], "Pointer");
    assert_eq!(
        json["args"][1]["initializer"]["Call"]["function"],
        "strdup"
    );
}
