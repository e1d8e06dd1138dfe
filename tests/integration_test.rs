// Integration tests for the LOLCODE front end

use lolfront::parser::ast::*;
use lolfront::parser::lexer::{Lexer, TokenKind};
use lolfront::parser::parse::Expected;
use lolfront::parser::{parse_source, ParseError, Parser};

#[test]
fn test_hello_world() {
    let source = r#"
        HAI 1.2
        VISIBLE "HI"
        KTHXBYE
    "#;

    let program = parse_source(source, "hello.lol").expect("Parsing failed");

    assert_eq!(program.body.len(), 1);
    match &program.body.stmts[0] {
        Statement::Print(print) => {
            assert_eq!(print.args(), &[Expression::Constant(Constant::String("HI".to_string()))]);
            assert!(!print.nonl());
        }
        other => panic!("Expected print statement, got {:?}", other),
    }
}

#[test]
fn test_lexer_and_parser_separately() {
    let mut lexer = Lexer::new("HAI\nGTFO\nKTHXBYE", "split.lol");
    let tokens = lexer.tokenize().expect("Lexing failed");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

    let mut parser = Parser::new(&tokens).expect("Parser creation failed");
    let program = parser.parse_program().expect("Parsing failed");
    assert_eq!(program.body.stmts, vec![Statement::Break]);
}

#[test]
fn test_version_must_be_a_float() {
    assert!(parse_source("HAI 1.2\nKTHXBYE\n", "v.lol").is_ok());
    assert!(parse_source("HAI\nKTHXBYE\n", "v.lol").is_ok());
    assert!(matches!(
        parse_source("HAI 12\nKTHXBYE\n", "v.lol"),
        Err(ParseError::Syntax {
            expected: Expected::Token(TokenKind::Newline),
            found: TokenKind::Integer,
            ..
        })
    ));
}

#[test]
fn test_nothing_after_kthxbye() {
    let err = parse_source("HAI 1.2\nKTHXBYE\nVISIBLE 1\n", "tail.lol").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Syntax {
            expected: Expected::Token(TokenKind::Eof),
            found: TokenKind::Visible,
            ..
        }
    ));
}

#[test]
fn test_function_program() {
    let source = r#"
        HAI 1.2
        HOW IZ I fib YR n
            BOTH SAEM n AN BIGGR OF n AN 2, O RLY?
                YA RLY
                    FOUND YR SUM OF I IZ fib YR DIFF OF n AN 1 MKAY ...
                        AN I IZ fib YR DIFF OF n AN 2 MKAY
                NO WAI
                    FOUND YR n
            OIC
        IF U SAY SO
        VISIBLE I IZ fib YR 10 MKAY
        KTHXBYE
    "#;

    let program = parse_source(source, "fib.lol").expect("Parsing failed");
    assert_eq!(program.body.len(), 2);

    match &program.body.stmts[0] {
        Statement::FuncDef(def) => {
            assert_eq!(def.name.name(), Some("fib"));
            assert_eq!(def.body.len(), 2);
            match &def.body.stmts[1] {
                Statement::IfThenElse(cond) => {
                    assert!(cond.guards().is_empty());
                    match &cond.yes().stmts[0] {
                        Statement::Return(ret) => match &ret.value {
                            Expression::Op(op) => {
                                assert_eq!(op.op(), OpType::Add);
                                assert!(op.args().iter().all(|a| matches!(a, Expression::FuncCall(_))));
                            }
                            other => panic!("Expected operator, got {:?}", other),
                        },
                        other => panic!("Expected return, got {:?}", other),
                    }
                }
                other => panic!("Expected if statement, got {:?}", other),
            }
        }
        other => panic!("Expected function definition, got {:?}", other),
    }
}

#[test]
fn test_arrays_and_slots() {
    let source = r#"
        HAI 1.2
        O HAI IM animal
            I HAS A legs ITZ 4
        KTHX
        I HAS A kitteh ITZ LIEK A animal
        kitteh'Z legs R 3
        VISIBLE SMOOSH "legs: " AN kitteh'Z legs MKAY
        I HAS A name ITZ "legs"
        VISIBLE kitteh'Z SRS name
        kitteh R NOOB
        KTHXBYE
    "#;

    let stmts = parse_source(source, "array.lol").expect("Parsing failed").body.stmts;
    assert_eq!(stmts.len(), 7);

    assert!(matches!(&stmts[0], Statement::AltArrayDef(def) if def.parent.is_none() && def.body.len() == 1));
    match &stmts[1] {
        Statement::Declaration(decl) => {
            assert_eq!(decl.parent().and_then(Identifier::name), Some("animal"));
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
    match &stmts[5] {
        Statement::Print(print) => match &print.args()[0] {
            Expression::Identifier(ident) => {
                assert!(matches!(ident.kind, IdentifierKind::Indirect(_)));
                assert_eq!(ident.slot.as_deref().and_then(Identifier::name), Some("kitteh"));
            }
            other => panic!("Expected identifier, got {:?}", other),
        },
        other => panic!("Expected print, got {:?}", other),
    }
    assert!(matches!(&stmts[6], Statement::Deallocation(_)));
}

#[test]
fn test_identifier_locations() {
    let source = "HAI 1.2\nI HAS A x\n\nx R 1\nKTHXBYE\n";
    let stmts = parse_source(source, "where.lol").expect("Parsing failed").body.stmts;

    match &stmts[1] {
        Statement::Assignment(assign) => {
            assert_eq!(assign.target.location.line, 4);
            assert_eq!(&*assign.target.location.file, "where.lol");
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_guard_lists_stay_paired() {
    let source = r#"
        HAI 1.2
        WTF?
            OMG "a"
                VISIBLE 1
            OMG "b"
            OMG "c"
                VISIBLE 3
                GTFO
            OMGWTF
                VISIBLE 0
        OIC
        KTHXBYE
    "#;

    let stmts = parse_source(source, "switch.lol").expect("Parsing failed").body.stmts;
    match &stmts[0] {
        Statement::Switch(switch) => {
            assert_eq!(switch.guards().len(), 3);
            assert_eq!(switch.blocks().len(), 3);
            assert!(switch.default().is_some());
        }
        other => panic!("Expected switch, got {:?}", other),
    }
}

#[test]
fn test_error_reports_file_and_line() {
    let err = parse_source("HAI 1.2\nI HAS A x ITZ\nKTHXBYE\n", "bad.lol").unwrap_err();
    let location = err.location().expect("syntax errors carry a location");
    assert_eq!(location.line, 2);
    assert_eq!(&*location.file, "bad.lol");
    assert_eq!(
        err.to_string(),
        "Parse error at bad.lol:2: expected expression (one of 'MAEK', integer literal, float literal, ...), found newline"
    );
}

#[test]
fn test_unexpected_identifier_text_in_error() {
    let err = parse_source("HAI 1.2\nGIMMEH\nKTHXBYE\n", "bad.lol").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at bad.lol:2: expected identifier (one of identifier, 'SRS'), found newline"
    );

    let err = parse_source("HAI 1.2\nx IS NOW A foo\nKTHXBYE\n", "bad.lol").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at bad.lol:2: expected type (one of 'NOOB', 'TROOF', 'NUMBR', ...), found identifier 'foo'"
    );
}

#[test]
fn test_loop_close_must_match() {
    let err = parse_source(
        "HAI 1.2\nIM IN YR outer\nIM IN YR inner\nGTFO\nIM OUTTA YR outer\nIM OUTTA YR outer\nKTHXBYE\n",
        "loops.lol",
    )
    .unwrap_err();

    match err {
        ParseError::NameMismatch {
            opened,
            closed,
            location,
        } => {
            assert_eq!(opened, "inner");
            assert_eq!(closed, "outer");
            assert_eq!(location.line, 5);
        }
        other => panic!("Expected name mismatch, got {:?}", other),
    }
}
