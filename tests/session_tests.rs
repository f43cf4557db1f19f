use projql::cli::{CliError, OutputFormat, Session};
use projql::{Dataset, Grammar, Row, Value};

fn dataset() -> Dataset {
    Dataset {
        headers: vec!["id".into(), "name".into(), "age".into()],
        rows: vec![
            Row::from_iter([
                ("id", Value::from(1.0)),
                ("name", Value::from("Alberto")),
                ("age", Value::from(25.0)),
            ]),
            Row::from_iter([
                ("id", Value::from(2.0)),
                ("name", Value::from("Maria")),
                ("age", Value::from(30.0)),
            ]),
        ],
    }
}

fn repl(session: &Session, input: &str) -> (String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    session
        .repl(input.as_bytes(), &mut out, &mut err, false)
        .unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn test_wildcard_uses_dataset_headers() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let output = session.run_query("PROJECT * FILTER age > 26").unwrap();
    assert_eq!(output.headers, vec!["id", "name", "age"]);
    assert_eq!(output.rows.len(), 1);
    assert_eq!(output.rows[0].get("name"), &Value::from("Maria"));
}

#[test]
fn test_named_fields_set_headers() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let output = session.run_query("PROJECT age, name, age").unwrap();
    assert_eq!(output.headers, vec!["age", "name"]);
}

#[test]
fn test_unknown_fields_are_reported() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());

    let err = session.run_query("PROJECT name, height").unwrap_err();
    assert!(matches!(&err, CliError::UnknownFields(names) if names == &["height"]));
    assert_eq!(err.to_string(), "Unknown field: height");

    let err = session
        .run_query("PROJECT weight FILTER height > 1")
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown fields: weight, height");
}

#[test]
fn test_syntax_error_surfaces() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let err = session.run_query("PROJECT").unwrap_err();
    assert!(matches!(err, CliError::Syntax(_)));
}

#[test]
fn test_json_rendering() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset()).with_format(OutputFormat::Json);
    let output = session.run_query("PROJECT name FILTER id = 1").unwrap();
    let json: serde_json::Value = serde_json::from_str(&session.render(&output).unwrap()).unwrap();
    assert_eq!(json, serde_json::json!([{ "name": "Alberto" }]));
}

#[test]
fn test_repl_keeps_going_after_errors() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let (out, err) = repl(
        &session,
        "PROJECT\n\nPROJECT nope\nPROJECT name FILTER name = `Maria`\n",
    );

    assert!(err.contains("Expected \"*\" or an identifier"));
    assert!(err.contains("Unknown field: nope"));
    assert!(out.contains(" Maria "));
    assert!(out.contains("1 row found"));
}

#[test]
fn test_repl_exit_stops_reading() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let (out, err) = repl(&session, "exit\nPROJECT *\n");
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_repl_commands() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let (out, _) = repl(&session, "fields\nhelp\nquit\n");
    assert!(out.starts_with("id, name, age\n"));
    assert!(out.contains(grammar.describe()));
}

#[test]
fn test_repl_prompt() {
    let grammar = Grammar::new();
    let session = Session::new(&grammar, dataset());
    let mut out = Vec::new();
    let mut err = Vec::new();
    session
        .repl("PROJECT id\n".as_bytes(), &mut out, &mut err, true)
        .unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("> "));
    assert!(out.ends_with("> "));
}
