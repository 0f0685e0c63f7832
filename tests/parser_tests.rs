//! Integration tests for the properties parser

use proptree::model::Construct;
use proptree::{ParseError, ParseOptions, Parser, Value};

const SAMPLE: &str = r#"
 ##### comments1
top.sub.key0 = a string value
top.sub.key1 = "a string value"
/* comments 1.1 */
top.sub.key2 = 234
/*
multi line
comments
*/
top.sub.key2-other = has-char
# comments 2
top.sub.key3 = false
top.sub.key4[0] = abc
top.sub.key4[1] = def
## --- comments 3 ---
top.sub.key5[0].f1 = ab
top.sub.key5[1].f2 = de
top.sub2.mline1 = """multi line
value
"""
"#;

fn parse(text: &str) -> Parser {
    let mut parser = Parser::new();
    parser.parse(text).unwrap();
    parser
}

fn parse_with(text: &str, options: ParseOptions) -> Parser {
    let mut parser = Parser::with_options(options);
    parser.parse(text).unwrap();
    parser
}

#[test]
fn test_sample_flat_map() {
    let p = parse(SAMPLE);
    let flat = p.flat_map();

    assert_eq!(flat["top.sub.key0"], "a string value");
    assert_eq!(flat["top.sub.key1"], "a string value");
    assert_eq!(flat["top.sub.key2"], "234");
    assert_eq!(flat["top.sub.key2-other"], "has-char");
    assert_eq!(flat["top.sub.key4[1]"], "def");
    assert_eq!(flat["top.sub2.mline1"], "multi line\nvalue\n");
}

#[test]
fn test_sample_tree() {
    let p = parse(SAMPLE);

    let key4 = p.get("top.sub.key4").and_then(Value::as_list).unwrap();
    assert_eq!(key4, &[Value::from("abc"), Value::from("def")][..]);

    assert_eq!(p.get_str("top.sub.key5[0].f1"), Some("ab"));
    assert_eq!(p.get_str("top.sub.key5[1].f2"), Some("de"));
    assert!(p.get("top.sub.key5[1].f1").is_none());

    let top = p.value_tree()["top"].as_map().unwrap();
    assert_eq!(top.len(), 2);
}

#[test]
fn test_sample_comments() {
    let p = parse(SAMPLE);
    let comments = p.comments();

    assert_eq!(comments["top.sub.key0"], "##### comments1");
    assert_eq!(comments["top.sub.key2"], "/* comments 1.1 */");
    assert_eq!(
        comments["top.sub.key2-other"],
        "/*\nmulti line\ncomments\n*/"
    );
    assert_eq!(comments["top.sub.key3"], "# comments 2");
    assert_eq!(comments["top.sub.key5[0].f1"], "## --- comments 3 ---");
    assert!(!comments.contains_key("top.sub.key1"));
}

#[test]
fn test_multiline_quoted_values() {
    let p = parse("key0 = val1\na = \"\"\"x\ny\n\"\"\"\nb = '''\n  indented\n'''\nkey1 = val2\n");
    assert_eq!(p.get_str("a"), Some("x\ny\n"));
    // Lines are trimmed before accumulation
    assert_eq!(p.get_str("b"), Some("\nindented\n"));
    assert_eq!(p.get_str("key0"), Some("val1"));
    assert_eq!(p.get_str("key1"), Some("val2"));
}

#[test]
fn test_quoted_value_with_trailing_backslash_line() {
    let p = parse("script = '''echo a \\\n&& echo b\n'''\nnext = 1");
    assert_eq!(p.get_str("script"), Some("echo a \\\n&& echo b\n"));
    assert_eq!(p.get_str("next"), Some("1"));
}

#[test]
fn test_comment_overwritten_on_reassignment() {
    let p = parse("# first\nk = 1\n# second\nk = 2\n");
    assert_eq!(p.comments()["k"], "# second");

    let p = parse("# first\nk = 1\nk = 2\n");
    assert_eq!(p.comments()["k"], "# first");
}

#[test]
fn test_list_index_gap_limit() {
    let p = parse("arr[1024] = last\n");
    assert_eq!(p.get("arr").and_then(Value::as_list).map(|l| l.len()), Some(1025));

    let mut p = Parser::new();
    let err = p.parse("ok = 1\narr[100000000000] = x\n").unwrap_err();
    assert!(matches!(err, ParseError::IndexOutOfRange { line: 2, .. }));
    assert_eq!(err.line(), 2);
    assert_eq!(p.get_str("ok"), Some("1"));
}

#[test]
fn test_trim_multiline_value() {
    let options = ParseOptions {
        trim_value: true,
        ..ParseOptions::default()
    };
    let p = parse_with("a = '''\nx\ny\n'''", options);
    assert_eq!(p.get_str("a"), Some("x\ny"));
}

#[test]
fn test_backslash_continuation() {
    let p = parse("a = foo \\\n    bar\nb = one\\\ntwo\\\nthree\n");
    assert_eq!(p.get_str("a"), Some("foo bar"));
    assert_eq!(p.get_str("b"), Some("onetwothree"));
}

#[test]
fn test_escaped_backslash_does_not_continue() {
    let p = parse("path = C:\\\\\nnext = 1");
    assert_eq!(p.get_str("path"), Some("C:\\\\"));
    assert_eq!(p.get_str("next"), Some("1"));
}

#[test]
fn test_variable_references() {
    let p = parse(
        "before = ${top.sub.key0}\ntop.sub.key0 = value0\nref = ${top.sub.key0}\nmissing = ${no.such | fallback}\n",
    );
    assert_eq!(p.get_str("ref"), Some("value0"));
    assert_eq!(p.get_str("before"), Some("${top.sub.key0}"));
    assert_eq!(p.get_str("missing"), Some("fallback"));
}

#[test]
fn test_reference_chain_uses_resolved_value() {
    let p = parse("a = 1\nb = ${a}\nc = ${b}\n");
    assert_eq!(p.get_str("c"), Some("1"));
}

#[test]
fn test_reference_to_indexed_key() {
    let p = parse("list[0] = first\npick = ${list[0]}\n");
    assert_eq!(p.get_str("pick"), Some("first"));
}

#[test]
fn test_env_interpolation() {
    std::env::set_var("PROPTREE_IT_HOME", "/home/it");
    let text = "home = ${PROPTREE_IT_HOME}\nbin = ${PROPTREE_IT_HOME}/bin\nshell = ${PROPTREE_IT_NOPE | /bin/sh}\n";

    let p = parse(text);
    assert_eq!(p.get_str("home"), Some("${PROPTREE_IT_HOME}"));

    let options = ParseOptions {
        parse_env_vars: true,
        ..ParseOptions::default()
    };
    let p = parse_with(text, options);
    assert_eq!(p.get_str("home"), Some("/home/it"));
    assert_eq!(p.get_str("bin"), Some("/home/it/bin"));
    assert_eq!(p.get_str("shell"), Some("/bin/sh"));
}

#[test]
fn test_inline_comments() {
    let text = "top.sub.key4[0] = abc # comments at end1\nurl = http://example.com # site\nquoted = \"a # b\" // why\n";
    let options = ParseOptions {
        allow_inline_comments: true,
        ..ParseOptions::default()
    };
    let p = parse_with(text, options);

    assert_eq!(p.get_str("top.sub.key4[0]"), Some("abc"));
    assert_eq!(p.comments()["top.sub.key4[0]"], "# comments at end1");
    assert_eq!(p.get_str("url"), Some("http://example.com"));
    assert_eq!(p.get_str("quoted"), Some("a # b"));
    assert_eq!(p.comments()["quoted"], "// why");

    let p = parse(text);
    assert_eq!(p.get_str("top.sub.key4[0]"), Some("abc # comments at end1"));
}

#[test]
fn test_inline_and_leading_comments_merge() {
    let options = ParseOptions {
        allow_inline_comments: true,
        ..ParseOptions::default()
    };
    let p = parse_with("# leading\nk = v # trailing\n", options);
    assert_eq!(p.comments()["k"], "# leading\n# trailing");
}

#[test]
fn test_inline_lists() {
    let options = ParseOptions {
        allow_inline_lists: true,
        ..ParseOptions::default()
    };
    let p = parse_with("ids = [23, 34, 45]\nempty = []\nplain = 1, 2\n", options);

    let ids = p.get("ids").and_then(Value::as_list).unwrap();
    assert_eq!(ids.len(), 3);
    assert_eq!(p.get_str("ids[2]"), Some("45"));
    assert_eq!(p.flat_map()["ids"], "[23, 34, 45]");
    assert_eq!(p.get("empty").and_then(Value::as_list).map(|l| l.len()), Some(0));
    assert_eq!(p.get_str("plain"), Some("1, 2"));
}

#[test]
fn test_list_gaps_are_null() {
    let p = parse("arr[0] = x\narr[2] = z\n");
    assert!(p.get("arr[1]").unwrap().is_null());
    assert_eq!(p.get_str("arr[2]"), Some("z"));
}

#[test]
fn test_escaped_equals_in_key() {
    let p = parse("a\\=b = c\n");
    assert_eq!(p.get_str("a=b"), Some("c"));
}

#[test]
fn test_value_keeps_extra_equals() {
    let p = parse("query = a=b&c=d\n");
    assert_eq!(p.get_str("query"), Some("a=b&c=d"));
}

#[test]
fn test_malformed_line_stops_scan() {
    let mut p = Parser::new();
    let err = p.parse("a = 1\nno-equals-sign\nb = 2\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::MalformedLine {
            line: 2,
            content: "no-equals-sign".into(),
            reason: "invalid format(key=value)",
        }
    );
    assert_eq!(p.flat_map().len(), 1);
    assert_eq!(p.err(), Some(&err));
}

#[test]
fn test_path_collision() {
    let mut p = Parser::new();
    let err = p.parse("a.b.c = 1\na.b.d = 2\na.b = 3\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::PathCollision {
            line: 3,
            path: "a.b".into(),
            at: "a.b".into(),
        }
    );

    let err = p.parse("a = 1\na.b = 2\n").unwrap_err();
    assert!(matches!(err, ParseError::PathCollision { ref at, .. } if at == "a"));
}

#[test]
fn test_unterminated_block_comment() {
    let mut p = Parser::new();
    let err = p.parse("a = 1\n/*\nnever closed\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnterminatedBlockConstruct {
            line: 2,
            construct: Construct::BlockComment,
        }
    );
    assert_eq!(p.get_str("a"), Some("1"));
}

#[test]
fn test_before_collect_hook() {
    let mut p = Parser::new().before_collect(|key, value| match value {
        Value::String(s) if key.starts_with("upper.") => Value::String(s.to_uppercase()),
        other => other,
    });
    p.parse("upper.name = inhere\nname = inhere\n").unwrap();
    assert_eq!(p.get_str("upper.name"), Some("INHERE"));
    assert_eq!(p.get_str("name"), Some("inhere"));
}

#[test]
fn test_parse_helper() {
    let p = proptree::parse("k = v", ParseOptions::default()).unwrap();
    assert_eq!(p.get_str("k"), Some("v"));
    assert_eq!(
        proptree::parse("", ParseOptions::default()).unwrap_err(),
        ParseError::EmptyInput
    );
}
