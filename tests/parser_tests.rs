// tests/parser_tests.rs

use infa_expr::config::DEFAULT_MAX_DEPTH;
use infa_expr::{Config, Error, Node, ParseError, Variable, parse, parse_with};

fn num(canonical: &str) -> Node {
    Node::number(canonical)
}

fn parse_ok(input: &str) -> Node {
    parse(input, &[]).unwrap_or_else(|e| panic!("failed to parse {}: {}", input, e))
}

fn parse_err(input: &str, vars: &[Variable]) -> ParseError {
    match parse(input, vars) {
        Err(Error::Parse(e)) => e,
        other => panic!("expected a parse error for {}, got {:?}", input, other),
    }
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn test_number_is_canonical() {
    assert_eq!(parse_ok("1"), num("1.000000"));
    assert_eq!(parse_ok("-1.1"), num("-1.100000"));
}

#[test]
fn test_string_leaf() {
    assert_eq!(parse_ok("' a '"), Node::string(" a "));
}

#[test]
fn test_null_keyword_is_null_leaf() {
    let node = parse_ok("NULL");
    assert_eq!(node, Node::null());
    assert!(node.is_leaf());
}

// ============================================================================
// Precedence and associativity
// ============================================================================

#[test]
fn test_single_operator() {
    assert_eq!(
        parse_ok("1 + 2"),
        Node::binary("+", num("1.000000"), num("2.000000"))
    );
}

#[test]
fn test_left_associative() {
    // Should be: Add(Add(1, 2), 3)
    assert_eq!(
        parse_ok("1 + 2 + 3"),
        Node::binary(
            "+",
            Node::binary("+", num("1.000000"), num("2.000000")),
            num("3.000000")
        )
    );
}

#[test]
fn test_multiplication_binds_tighter() {
    // Should be: Add(1, Multiply(2, 3))
    let node = parse_ok("1 + 2 * 3");
    assert_eq!(node.tag, "+");
    assert_eq!(
        node,
        Node::binary(
            "+",
            num("1.000000"),
            Node::binary("*", num("2.000000"), num("3.000000"))
        )
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        parse_ok("8 + (5 - 2) * 8"),
        Node::binary(
            "+",
            num("8.000000"),
            Node::binary(
                "*",
                Node::binary("-", num("5.000000"), num("2.000000")),
                num("8.000000")
            )
        )
    );
}

#[test]
fn test_group_on_the_left_of_same_operator() {
    assert_eq!(
        parse_ok("(1 + 2) + 3"),
        Node::binary(
            "+",
            Node::binary("+", num("1.000000"), num("2.000000")),
            num("3.000000")
        )
    );
}

#[test]
fn test_nested_parentheses() {
    assert_eq!(parse_ok("((1))"), num("1.000000"));
    assert_eq!(
        parse_ok("(2 * (3 + 4))"),
        Node::binary(
            "*",
            num("2.000000"),
            Node::binary("+", num("3.000000"), num("4.000000"))
        )
    );
}

#[test]
fn test_full_precedence_ladder() {
    // OR < AND < equality < ordering < || < additive < multiplicative
    let node = parse_ok("1 OR 2 AND 3 = 4 < 5 || 6 + 7 * 8");
    let n = |v: &str| num(&format!("{}.000000", v));

    let expected = Node::binary(
        "OR",
        n("1"),
        Node::binary(
            "AND",
            n("2"),
            Node::binary(
                "=",
                n("3"),
                Node::binary(
                    "<",
                    n("4"),
                    Node::binary(
                        "||",
                        n("5"),
                        Node::binary("+", n("6"), Node::binary("*", n("7"), n("8"))),
                    ),
                ),
            ),
        ),
    );
    assert_eq!(node, expected);
}

#[test]
fn test_not_equal_spellings() {
    for op in ["<>", "!=", "^="] {
        let node = parse_ok(&format!("1 {} 2", op));
        assert_eq!(node.tag, op);
        assert_eq!(node.children().count(), 2);
    }
}

#[test]
fn test_string_concatenation_operator() {
    assert_eq!(
        parse_ok("'a' || 'b' || 'c'"),
        Node::binary(
            "||",
            Node::binary("||", Node::string("a"), Node::string("b")),
            Node::string("c")
        )
    );
}

// ============================================================================
// Function calls
// ============================================================================

#[test]
fn test_function_call() {
    assert_eq!(parse_ok("ABS(1)"), Node::call("ABS", vec![num("1.000000")]));
}

#[test]
fn test_function_in_operator() {
    assert_eq!(
        parse_ok("1 + ABS(-1)"),
        Node::binary(
            "+",
            num("1.000000"),
            Node::call("ABS", vec![num("-1.000000")])
        )
    );
}

#[test]
fn test_function_arguments() {
    assert_eq!(
        parse_ok("RTRIM(' a ', ' ')"),
        Node::call("RTRIM", vec![Node::string(" a "), Node::string(" ")])
    );
}

#[test]
fn test_function_arguments_are_folded() {
    assert_eq!(
        parse_ok("IIF(1 + 2, ABS(5), 'b')"),
        Node::call(
            "IIF",
            vec![
                Node::binary("+", num("1.000000"), num("2.000000")),
                Node::call("ABS", vec![num("5.000000")]),
                Node::string("b"),
            ]
        )
    );
}

#[test]
fn test_function_without_arguments() {
    assert_eq!(parse_ok("SYSTIMESTAMP()"), Node::call("SYSTIMESTAMP", vec![]));
}

#[test]
fn test_unimplemented_function_still_parses() {
    let node = parse_ok("UPPER('a')");
    assert_eq!(node.tag, "UPPER");
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_number_variable_is_canonicalised() {
    let vars = [Variable::number("in_AMT", "2")];
    assert_eq!(
        parse("ABS(in_AMT)", &vars).unwrap(),
        Node::call("ABS", vec![num("2.000000")])
    );
}

#[test]
fn test_nested_calls_with_variable() {
    let vars = [Variable::number("in_AMT", "2")];
    assert_eq!(
        parse("SUBSTR(LTRIM(RTRIM(in_AMT)), 1, 7)", &vars).unwrap(),
        Node::call(
            "SUBSTR",
            vec![
                Node::call("LTRIM", vec![Node::call("RTRIM", vec![num("2.000000")])]),
                num("1.000000"),
                num("7.000000"),
            ]
        )
    );
}

#[test]
fn test_string_and_null_variables_keep_raw_value() {
    let vars = [
        Variable::string("name", " Bender "),
        Variable::null("missing"),
    ];
    assert_eq!(
        parse("CONCAT(name, missing)", &vars).unwrap(),
        Node::call("CONCAT", vec![Node::string(" Bender "), Node::null()])
    );
}

#[test]
fn test_first_matching_variable_wins() {
    let vars = [Variable::string("x", "first"), Variable::string("x", "second")];
    assert_eq!(parse("x", &vars).unwrap(), Node::string("first"));
}

#[test]
fn test_param_outside_string() {
    let vars = [Variable::number("$$Limit", "10")];
    assert_eq!(parse("$$Limit", &vars).unwrap(), num("10.000000"));
}

#[test]
fn test_params_replaced_inside_strings() {
    let vars = [
        Variable::string("$$Region", "EU"),
        Variable::string("$PMSessionName", "s_load"),
        Variable::string("not_a_param", "ignored"),
    ];
    assert_eq!(
        parse("'$PMSessionName/$$Region/not_a_param'", &vars).unwrap(),
        Node::string("s_load/EU/not_a_param")
    );
}

#[test]
fn test_param_replacement_is_order_sensitive() {
    // earlier replacements are visible to later parameters
    let vars = [Variable::string("$a", "$b"), Variable::string("$b", "x")];
    assert_eq!(parse("'$a'", &vars).unwrap(), Node::string("x"));

    let vars = [Variable::string("$b", "x"), Variable::string("$a", "$b")];
    assert_eq!(parse("'$a'", &vars).unwrap(), Node::string("$b"));
}

// ============================================================================
// Placeholders that survive folding
// ============================================================================

#[test]
fn test_keyword_placeholder() {
    let node = parse_ok("TRUE");
    assert_eq!(node.tag, "TRUE");
    assert_eq!(node.value(), Some("TRUE"));
    assert!(!node.is_leaf());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_undefined_identifier() {
    let err = parse_err("foo", &[]);
    assert!(matches!(err, ParseError::UndefinedIdentifier { ref name, .. } if name == "foo"));
}

#[test]
fn test_lowercase_function_name_is_an_identifier() {
    let err = parse_err("abs(1)", &[]);
    assert!(matches!(err, ParseError::UndefinedIdentifier { ref name, .. } if name == "abs"));
}

#[test]
fn test_function_without_paren() {
    let err = parse_err("ABS 1", &[]);
    assert!(matches!(err, ParseError::ExpectedParen { ref name, .. } if name == "ABS"));

    let err = parse_err("1 + ABS", &[]);
    assert!(matches!(err, ParseError::ExpectedParen { .. }));
}

#[test]
fn test_unclosed_paren() {
    assert!(matches!(parse_err("(1 + 2", &[]), ParseError::UnclosedParen { .. }));
    assert!(matches!(
        parse_err("LTRIM(RTRIM(' a ')", &[]),
        ParseError::UnclosedParen { .. }
    ));
}

#[test]
fn test_trailing_tokens() {
    let err = parse_err("1 + 2)", &[]);
    match err {
        ParseError::TrailingTokens { end, total, token, .. } => {
            assert_eq!(end, 3);
            assert_eq!(total, 4);
            assert_eq!(token, ")");
        }
        other => panic!("expected TrailingTokens, got {:?}", other),
    }
}

#[test]
fn test_not_single_node() {
    assert_eq!(parse_err("1 2", &[]), ParseError::NotSingleNode { count: 2 });
    assert_eq!(parse_err("5 -2", &[]), ParseError::NotSingleNode { count: 2 });
    assert_eq!(parse_err("", &[]), ParseError::NotSingleNode { count: 0 });
    assert_eq!(parse_err("-- only a comment", &[]), ParseError::NotSingleNode { count: 0 });
}

#[test]
fn test_missing_operand() {
    assert!(matches!(
        parse_err("* 2", &[]),
        ParseError::MissingOperand { side: "left", .. }
    ));
    assert!(matches!(
        parse_err("1 +", &[]),
        ParseError::MissingOperand { side: "right", .. }
    ));
}

#[test]
fn test_invalid_number_variable() {
    let vars = [Variable::number("in_AMT", "two")];
    let err = parse_err("ABS(in_AMT)", &vars);
    assert!(matches!(err, ParseError::InvalidNumber { ref text, .. } if text == "two"));
}

#[test]
fn test_lex_errors_propagate() {
    assert!(matches!(parse("'abc", &[]), Err(Error::Lex(_))));
    assert!(matches!(parse("1 ? 2", &[]), Err(Error::Lex(_))));
}

#[test]
fn test_nesting_limit() {
    let config = Config::default().with_max_depth(3);
    assert!(parse_with("(((1)))", &[], &config).is_ok());

    let err = parse_with("((((1))))", &[], &config).unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::NestingTooDeep { limit: 3 }));
}

#[test]
fn test_deep_nesting_fails_without_crashing() {
    let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse(&input, &[]).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::NestingTooDeep { .. })));
}

#[test]
fn test_long_operator_chain_fails_without_crashing() {
    // each operator in a chain nests the tree one level deeper
    for op in ["+", "*", "||", "<", "=", "AND", "OR"] {
        let input = format!("1{}", format!(" {} 1", op).repeat(10_000));
        let err = parse(&input, &[]).unwrap_err();
        assert_eq!(
            err,
            Error::Parse(ParseError::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            }),
            "operator: {}",
            op
        );
    }
}

#[test]
fn test_operator_chain_counts_toward_nesting_limit() {
    let config = Config::default().with_max_depth(3);
    let parse_err = |input: &str| parse_with(input, &[], &config).unwrap_err();
    let too_deep = Error::Parse(ParseError::NestingTooDeep { limit: 3 });

    assert!(parse_with("1 + 2 + 3 + 4", &[], &config).is_ok());
    assert_eq!(parse_err("1 + 2 + 3 + 4 + 5"), too_deep);

    // precedence keeps the tree shallow
    assert!(parse_with("1 * 2 + 3 * 4 = 5", &[], &config).is_ok());

    // calls and operators share the same limit
    assert!(parse_with("ABS(1 + 2) + 3", &[], &config).is_ok());
    assert_eq!(parse_err("ABS(1 + 2 + 3) + 4"), too_deep);
    assert_eq!(parse_err("1 + ABS(ABS(2 + 3))"), too_deep);
}
