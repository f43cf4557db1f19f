use std::io::Write;

use projql::{LoadError, LoadOptions, Value, load_csv};
use tempfile::NamedTempFile;

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_rows_and_headers() {
    let file = csv_file(
        "id,name,age,email
      1,Alberto,25,alberto@gmail.com
      2,Maria,30,maria@gmail.com",
    );
    let dataset = load_csv(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(dataset.headers, vec!["id", "name", "age", "email"]);
    assert_eq!(dataset.rows.len(), 2);

    let first: Vec<_> = dataset.rows[0].iter().collect();
    assert_eq!(
        first,
        vec![
            ("id", &Value::Number(1.0)),
            ("name", &Value::from("Alberto")),
            ("age", &Value::Number(25.0)),
            ("email", &Value::from("alberto@gmail.com")),
        ]
    );
    assert_eq!(dataset.rows[1].get("age"), &Value::Number(30.0));
}

#[test]
fn test_alphanumeric_cells_stay_text() {
    let file = csv_file("a,b,c,d\n1,a1,1a,36.5\n");
    let dataset = load_csv(file.path(), &LoadOptions::default()).unwrap();
    let row = &dataset.rows[0];
    assert_eq!(row.get("a"), &Value::Number(1.0));
    assert_eq!(row.get("b"), &Value::from("a1"));
    assert_eq!(row.get("c"), &Value::from("1a"));
    assert_eq!(row.get("d"), &Value::Number(36.5));
}

#[test]
fn test_semicolon_delimiter() {
    let file = csv_file("city;population\nTurin;848885\n");
    let options = LoadOptions {
        delimiter: b';',
        ..LoadOptions::default()
    };
    let dataset = load_csv(file.path(), &options).unwrap();
    assert_eq!(dataset.headers, vec!["city", "population"]);
    assert_eq!(dataset.rows[0].get("population"), &Value::Number(848885.0));
}

#[test]
fn test_quoted_cells() {
    let file = csv_file("name,note\n\"Rossi, Mario\",\"said \"\"hi\"\"\"\n");
    let dataset = load_csv(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.rows[0].get("name"), &Value::from("Rossi, Mario"));
    assert_eq!(dataset.rows[0].get("note"), &Value::from("said \"hi\""));
}

#[test]
fn test_quoted_spaces_are_kept() {
    let file = csv_file(" a , b \n\" x \", 2\n");
    let dataset = load_csv(file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.headers, vec!["a", "b"]);
    assert_eq!(dataset.rows[0].get("a"), &Value::from(" x "));
    assert_eq!(dataset.rows[0].get("b"), &Value::Number(2.0));
}

#[test]
fn test_trim_strips_cells() {
    let file = csv_file("a,b\n x ,  \n");
    let options = LoadOptions {
        trim: true,
        ..LoadOptions::default()
    };
    let dataset = load_csv(file.path(), &options).unwrap();
    assert_eq!(dataset.rows[0].get("a"), &Value::from("x"));
    assert_eq!(dataset.rows[0].get("b"), &Value::from(""));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_csv(dir.path().join("nope.csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn test_empty_file() {
    let file = csv_file("");
    let err = load_csv(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput));
}
