//! End-to-end pipeline tests.
//!
//! Tests verify the full pipeline: source → lex → check → parenthesize →
//! parse → evaluate, for both the compiled and the one-shot entry points,
//! and that every error stage is reached with the right payload.

use calcex::{
    compile, compile_with_limits, evaluate_once, evaluate_once_with_limits, front_end, CalcError,
    ErrorCategory, ErrorCode, LimitKind, Limits, ParenFault, SyntaxFault,
};

const NONE: [(&str, f64); 0] = [];

fn value(expression: &str) -> f64 {
    evaluate_once(expression, &NONE).unwrap_or_else(|e| panic!("{expression}: {e}"))
}

fn compile_err(expression: &str) -> CalcError {
    match compile(expression) {
        Ok(_) => panic!("expected {expression:?} to fail"),
        Err(e) => e,
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Values
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reference_values() {
    assert_eq!(value("2 + 3 * 4"), 14.0);
    assert_eq!(value("(2 + 3) * 4"), 20.0);
    assert_eq!(value("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(value("-3 + 4"), 1.0);
    assert_eq!(value("-(3 + 4)"), -7.0);
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(value("2+3*4"), value("  2 +\t3 *\n4  "));
}

#[test]
fn test_compiled_with_variables() {
    let eval = compile("x + y * 2").unwrap();
    assert_eq!(eval.unknowns(), ["x", "y"]);
    assert_eq!(eval.calc(&[("x", 1.0), ("y", 3.0)]).unwrap(), 7.0);
    assert_eq!(eval.calc(&[("y", 0.5), ("x", -1.0)]).unwrap(), 0.0);
}

#[test]
fn test_unknowns_in_first_appearance_order() {
    let eval = compile("beta * alpha + beta - gamma_2").unwrap();
    assert_eq!(eval.unknowns(), ["beta", "alpha", "gamma_2"]);
}

#[test]
fn test_front_end_exposes_ast() {
    let parsed = front_end("(a + 1) * 2", &Limits::default()).unwrap();
    assert_eq!(parsed.unknowns, ["a"]);
    assert_eq!(parsed.ast.to_string(), "(a + 1) * 2");
}

// ══════════════════════════════════════════════════════════════════════════════
// Binding errors
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_arity_error() {
    let eval = compile("x + y * 2").unwrap();
    let err = eval.calc(&[("x", 1.0)]).unwrap_err();
    assert_eq!(err, CalcError::Arity { expected: 2, got: 1 });
    assert_eq!(err.category(), ErrorCategory::Binding);
}

#[test]
fn test_missing_variable_error() {
    let eval = compile("x + y * 2").unwrap();
    let err = eval.calc(&[("x", 1.0), ("z", 3.0)]).unwrap_err();
    assert_eq!(err, CalcError::MissingVariable { name: "y".into() });
    assert_eq!(err.code(), ErrorCode::MISSING_VARIABLE);
}

#[test]
fn test_evaluate_once_binding_errors() {
    assert_eq!(
        evaluate_once("x", &NONE).unwrap_err(),
        CalcError::Arity { expected: 1, got: 0 }
    );
    assert_eq!(
        evaluate_once("x", &[("y", 1.0)]).unwrap_err(),
        CalcError::MissingVariable { name: "x".into() }
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Front-end errors
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_lex_error() {
    assert_eq!(
        compile_err("2 % 3"),
        CalcError::Lex {
            character: '%',
            position: 2
        }
    );
}

#[test]
fn test_dangling_operator() {
    assert_eq!(
        compile_err("2 + + "),
        CalcError::Syntax {
            fault: SyntaxFault::DanglingOperator,
            token: 2,
            position: 4
        }
    );
}

#[test]
fn test_unclosed_paren() {
    assert_eq!(
        compile_err("(2 + 3"),
        CalcError::UnbalancedParen {
            fault: ParenFault::Unclosed,
            token: 0,
            position: 0
        }
    );
}

#[test]
fn test_excess_close_paren() {
    assert_eq!(
        compile_err("(2 + 3))"),
        CalcError::UnbalancedParen {
            fault: ParenFault::UnmatchedClose,
            token: 5,
            position: 7
        }
    );
}

#[test]
fn test_excess_close_reported_before_adjacency_faults() {
    for (source, token, position) in [("(1))(2)", 3, 3), ("1)2", 1, 1), (")1", 0, 0)] {
        assert_eq!(
            compile_err(source),
            CalcError::UnbalancedParen {
                fault: ParenFault::UnmatchedClose,
                token,
                position
            },
            "{source}"
        );
    }
}

#[test]
fn test_excess_close_outranks_earlier_syntax_fault() {
    assert!(matches!(
        compile_err("2 3)"),
        CalcError::UnbalancedParen {
            fault: ParenFault::UnmatchedClose,
            token: 2,
            ..
        }
    ));
}

#[test]
fn test_empty_expression() {
    assert!(matches!(
        compile_err("   "),
        CalcError::Syntax {
            fault: SyntaxFault::EmptyExpression,
            ..
        }
    ));
}

#[test]
fn test_lex_runs_before_syntax() {
    // Both a bad character and a syntax fault; the lexer reports first
    assert!(matches!(compile_err("* $"), CalcError::Lex { character: '$', .. }));
}

#[test]
fn test_syntax_runs_before_paren_resolution() {
    assert!(matches!(compile_err("(2 3"), CalcError::Syntax { .. }));
}

#[test]
fn test_evaluate_once_reports_front_end_errors() {
    assert!(matches!(
        evaluate_once("2 +", &NONE),
        Err(CalcError::Syntax {
            fault: SyntaxFault::DanglingOperator,
            ..
        })
    ));
}

// ══════════════════════════════════════════════════════════════════════════════
// Limits
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_token_limit() {
    let limits = Limits::default().with_max_tokens(5);
    assert!(compile_with_limits("1 + 2 + 3", &limits).is_ok());
    let err = compile_with_limits("1 + 2 + 3 + 4", &limits).unwrap_err();
    assert_eq!(
        err,
        CalcError::LimitExceeded {
            limit: LimitKind::TokenCount,
            actual: 7,
            max: 5,
            position: 10
        }
    );
}

#[test]
fn test_depth_limit() {
    let limits = Limits::default().with_max_depth(2);
    assert_eq!(
        evaluate_once_with_limits("((1))", &NONE, &limits).unwrap(),
        1.0
    );
    assert!(matches!(
        evaluate_once_with_limits("(((1)))", &NONE, &limits),
        Err(CalcError::LimitExceeded {
            limit: LimitKind::NestingDepth,
            actual: 3,
            max: 2,
            ..
        })
    ));
}

#[test]
fn test_default_depth_admits_deep_nesting() {
    let depth = 100;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(value(&source), 1.0);
}

#[test]
fn test_sum_chain_bounded_by_default_depth() {
    let at_limit = vec!["1"; 129].join("+");
    assert_eq!(value(&at_limit), 129.0);

    let over = vec!["1"; 130].join("+");
    assert!(matches!(
        compile_err(&over),
        CalcError::LimitExceeded {
            limit: LimitKind::NestingDepth,
            actual: 129,
            max: 128,
            ..
        }
    ));
}

#[test]
fn test_chain_at_token_limit_rejected_on_small_stack() {
    // 4095 tokens, just under the default token limit
    let source = vec!["1"; 2048].join("+");
    let handle = std::thread::spawn(move || {
        let expected = CalcError::LimitExceeded {
            limit: LimitKind::NestingDepth,
            actual: 129,
            max: 128,
            position: 257,
        };
        assert_eq!(compile_err(&source), expected);
        assert_eq!(evaluate_once(&source, &NONE).unwrap_err(), expected);
    });
    handle.join().unwrap();
}

#[test]
fn test_widest_tree_under_token_limit_evaluates_on_small_stack() {
    // 33 blocks of 60 factors: 4025 tokens, tree height 92
    let block = format!("({})", vec!["2"; 60].join(" * "));
    let source = vec![block; 33].join(" + ");
    let handle = std::thread::spawn(move || {
        let expected = 33.0 * 2f64.powi(60);
        let eval = compile(&source).unwrap();
        assert!(eval.ast().height() <= calcex::DEFAULT_MAX_DEPTH as usize);
        assert_eq!(eval.calc(&NONE).unwrap(), expected);
        assert_eq!(evaluate_once(&source, &NONE).unwrap(), expected);
        assert!(eval.ast().to_string().starts_with("(2 * 2"));
    });
    handle.join().unwrap();
}

#[test]
fn test_limits_from_json() {
    let limits: Limits = serde_json::from_str(r#"{ "max_depth": 1 }"#).unwrap();
    assert_eq!(limits.max_tokens, calcex::DEFAULT_MAX_TOKENS);
    assert!(compile_with_limits("(1)", &limits).is_ok());
    assert!(compile_with_limits("((1))", &limits).is_err());
}

// ══════════════════════════════════════════════════════════════════════════════
// Diagnostics
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_error_serializes_to_json() {
    let err = compile_err("2 + + ");
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "syntax");
    assert_eq!(json["fault"], "dangling_operator");
    assert_eq!(json["position"], 4);
}

#[test]
fn test_render_points_at_error() {
    let source = "1 + (2";
    let err = compile_err(source);
    let rendered = err.render(source);
    assert!(rendered.starts_with("error[E301]"), "{rendered}");
    assert!(rendered.contains("\n |     ^"), "{rendered}");
}
