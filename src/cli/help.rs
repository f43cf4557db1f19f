//! REPL help content

use crate::Grammar;

/// Help shown for the `help` command.
pub fn help_text(grammar: &Grammar) -> String {
    format!(
        r#"QUERIES

  PROJECT <fields> [FILTER <field> <comparator> <value>]

  PROJECT *                          every field of every row
  PROJECT name, age                  only these fields, in this order
  PROJECT * FILTER age > 26          rows where age is greater than 26
  PROJECT age FILTER name = `Maria`  strings go between backticks

  Comparators: =  >  >=  <  <=
  Numbers compare numerically, strings lexicographically. A number never
  matches a string (and the reverse), and a row without the field never
  matches.

GRAMMAR

{}

COMMANDS

  help          Show this help
  fields        List the dataset's fields
  exit, quit    Leave
"#,
        grammar.describe()
    )
}
