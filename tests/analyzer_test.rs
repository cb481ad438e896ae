// Integration tests for the Jack syntax analyzer

use jack_analyzer::xml::{tokens_document, tree_document};
use jack_analyzer::{
    analyze, parse_tokens, tokenize, AnalyzerError, LexErrorKind, ParseNode,
    TokenKind,
};
use pretty_assertions::assert_eq;

const SQUARE_GAME: &str = r#"
/** Implements a square game. */
class SquareGame {
   field Square square; // the square of this game
   field int direction;

   /* Constructs a new square game. */
   constructor SquareGame new() {
      let square = Square.new(0, 0, 30);
      let direction = 0;
      return this;
   }

   method void dispose() {
      do square.dispose();
      do Memory.deAlloc(this);
      return;
   }

   method void run() {
      var char key;
      var boolean exit;
      var Array history;
      let exit = false;
      let history = Array.new(8);
      while (~exit) {
         while (key = 0) {
            let key = Keyboard.keyPressed();
            do moveSquare();
         }
         if (key = 81)  { let exit = true; }
         if (key = 90)  { do square.decSize(); }
         else { let history[key & 7] = (key * 2) + (-1); }
         let direction = (direction ^ 1) # 2;
      }
      do Output.printString("bye <3 & ciao");
      return;
   }
}
"#;

/// Strip indentation and blank lines, as the grading comparison does.
fn normalized(xml: &str) -> Vec<String> {
    xml.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn find_all<'a>(node: &'a ParseNode, tag: &str, out: &mut Vec<&'a ParseNode>) {
    if matches!(node, ParseNode::Branch { tag: t, .. } if *t == tag) {
        out.push(node);
    }
    for child in node.children() {
        find_all(child, tag, out);
    }
}

#[test]
fn test_empty_class_document() {
    let tree = analyze("class Main {}").expect("analysis failed");
    assert_eq!(
        tree_document(&tree),
        "<class>\n  <keyword> class </keyword>\n  <identifier> Main </identifier>\n  <symbol> { </symbol>\n  <symbol> } </symbol>\n</class>\n"
    );
}

#[test]
fn test_comment_before_class_tokens_document() {
    let tokens = tokenize("// comment\nclass Main {}").expect("tokenize failed");
    assert_eq!(
        tokens_document(&tokens),
        "<tokens>\n<keyword> class </keyword>\n<identifier> Main </identifier>\n<symbol> { </symbol>\n<symbol> } </symbol>\n</tokens>\n"
    );
}

#[test]
fn test_full_class_document() {
    let source = "class Main {\n  field int x;\n  method int get() {\n    if (x < 0) { return -x; }\n    return x;\n  }\n}\n";
    let tree = analyze(source).expect("analysis failed");

    let expected = r#"
<class>
  <keyword> class </keyword>
  <identifier> Main </identifier>
  <symbol> { </symbol>
  <classVarDec>
    <keyword> field </keyword>
    <keyword> int </keyword>
    <identifier> x </identifier>
    <symbol> ; </symbol>
  </classVarDec>
  <subroutineDec>
    <keyword> method </keyword>
    <keyword> int </keyword>
    <identifier> get </identifier>
    <symbol> ( </symbol>
    <symbol> ) </symbol>
    <subroutineBody>
      <symbol> { </symbol>
      <statements>
        <ifStatement>
          <keyword> if </keyword>
          <symbol> ( </symbol>
          <expression>
            <term>
              <identifier> x </identifier>
            </term>
            <symbol> &lt; </symbol>
            <term>
              <integerConstant> 0 </integerConstant>
            </term>
          </expression>
          <symbol> ) </symbol>
          <symbol> { </symbol>
          <statements>
            <returnStatement>
              <keyword> return </keyword>
              <expression>
                <term>
                  <symbol> - </symbol>
                  <term>
                    <identifier> x </identifier>
                  </term>
                </term>
              </expression>
              <symbol> ; </symbol>
            </returnStatement>
          </statements>
          <symbol> } </symbol>
        </ifStatement>
        <returnStatement>
          <keyword> return </keyword>
          <expression>
            <term>
              <identifier> x </identifier>
            </term>
          </expression>
          <symbol> ; </symbol>
        </returnStatement>
      </statements>
      <symbol> } </symbol>
    </subroutineBody>
  </subroutineDec>
  <symbol> } </symbol>
</class>
"#;

    assert_eq!(normalized(&tree_document(&tree)), normalized(expected));
}

#[test]
fn test_every_token_becomes_exactly_one_leaf() {
    let tokens = tokenize(SQUARE_GAME).expect("tokenize failed");
    let tree = parse_tokens(tokens.clone()).expect("parse failed");

    let leaves: Vec<_> = tree.leaves().into_iter().cloned().collect();
    assert_eq!(leaves, tokens);
}

#[test]
fn test_retokenizing_lexemes_reproduces_tokens() {
    let tokens = tokenize(SQUARE_GAME).expect("tokenize failed");
    let respelled = tokens
        .iter()
        .map(|t| t.lexeme())
        .collect::<Vec<_>>()
        .join(" ");
    let again = tokenize(&respelled).expect("re-tokenize failed");

    let shape = |ts: &[jack_analyzer::Token]| {
        ts.iter()
            .map(|t| (t.kind, t.text.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&again), shape(&tokens));
}

#[test]
fn test_tokenizer_is_restartable() {
    let first = tokenize(SQUARE_GAME).expect("tokenize failed");
    let second = tokenize(SQUARE_GAME).expect("tokenize failed");
    assert_eq!(first, second);
}

#[test]
fn test_no_empty_branches_anywhere() {
    let tree = analyze(SQUARE_GAME).expect("analysis failed");
    let mut branches = Vec::new();
    for tag in ["parameterList", "expressionList", "statements", "expression"] {
        find_all(&tree, tag, &mut branches);
    }
    assert!(!branches.is_empty());
    assert!(branches.iter().all(|b| !b.children().is_empty()));

    // `new()`, `dispose()`, `run()` and the argument-less calls contribute nothing.
    let mut params = Vec::new();
    find_all(&tree, "parameterList", &mut params);
    assert!(params.is_empty());

    let mut lists = Vec::new();
    find_all(&tree, "expressionList", &mut lists);
    assert_eq!(lists.len(), 4);

    let xml = tree_document(&tree);
    assert!(!xml.contains("<parameterList>"));
    assert!(xml.contains("<stringConstant> bye &lt;3 &amp; ciao </stringConstant>"));
}

#[test]
fn test_statement_counts() {
    let tree = analyze(SQUARE_GAME).expect("analysis failed");
    let count = |tag: &str| {
        let mut found = Vec::new();
        find_all(&tree, tag, &mut found);
        found.len()
    };
    assert_eq!(count("classVarDec"), 2);
    assert_eq!(count("subroutineDec"), 3);
    assert_eq!(count("varDec"), 3);
    assert_eq!(count("whileStatement"), 2);
    assert_eq!(count("ifStatement"), 2);
    assert_eq!(count("doStatement"), 5);
    assert_eq!(count("returnStatement"), 3);
    assert_eq!(count("letStatement"), 8);
}

#[test]
fn test_out_of_range_integer() {
    let err = analyze("class Main { function void f() { return 32768; } }")
        .unwrap_err();
    match err {
        AnalyzerError::Lex(err) => {
            assert_eq!(
                err.kind,
                LexErrorKind::IntegerOutOfRange("32768".to_string())
            );
        }
        other => panic!("expected lexical error, got {other:?}"),
    }
}

#[test]
fn test_string_spanning_newline() {
    let err = analyze("class Main { function void f() { do g(\"abc\ndef\"); } }")
        .unwrap_err();
    assert!(matches!(
        err,
        AnalyzerError::Lex(ref e) if e.kind == LexErrorKind::UnterminatedString
    ));
    assert_eq!(err.location().map(|l| l.line), Some(1));
}

#[test]
fn test_syntax_error_reports_rule_and_token() {
    let source = "class Main {\n  function void f() {\n    let x = ;\n  }\n}";
    let err = analyze(source).unwrap_err();
    let AnalyzerError::Syntax(syntax) = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(syntax.production, "term");
    let found = syntax.found.as_ref().expect("token expected");
    assert_eq!(found.kind, TokenKind::Symbol);
    assert_eq!(found.text, ";");
    assert_eq!(err.location().map(|l| (l.line, l.column)), Some((3, 13)));
    assert!(err.to_string().starts_with("syntax error in term: expected a term"));
}

#[test]
fn test_deep_nesting_is_a_syntax_error() {
    for depth in [5_000, 200_000] {
        let source = format!(
            "class Main {{ function int f() {{ return {}1{}; }} }}",
            "(".repeat(depth),
            ")".repeat(depth)
        );
        let err = analyze(&source).unwrap_err();
        assert!(matches!(err, AnalyzerError::Syntax(_)));
        assert!(err.to_string().contains("nesting depth"), "got: {err}");
    }

    let unary = format!(
        "class Main {{ function int f() {{ return {}1; }} }}",
        "-".repeat(5_000)
    );
    let err = analyze(&unary).unwrap_err();
    assert!(err.to_string().contains("nesting depth"), "got: {err}");
}

#[test]
fn test_units_analyze_independently_in_parallel() {
    let sources = [
        SQUARE_GAME.to_string(),
        "class A { }".to_string(),
        "class B { field int x; }".to_string(),
        "class Broken {".to_string(),
    ];

    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || analyze(source).is_ok()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(results, vec![true, true, true, false]);
}
