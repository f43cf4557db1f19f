use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// A single cell of a row.
///
/// # Examples
///
/// ```
/// use projql::Value;
///
/// assert_eq!(Value::coerce("36.5"), Value::Number(36.5));
/// assert_eq!(Value::coerce("a1"), Value::String("a1".to_string()));
/// assert_eq!(Value::coerce(""), Value::String(String::new()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Double-precision number
    Number(f64),

    /// UTF-8 text, possibly empty
    String(String),

    /// The row has no such field
    Absent,
}

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$|^[+-]?Infinity$")
        .unwrap_or_else(|e| panic!("invalid number pattern: {e}"))
});

static RADIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^0(?:[xX](?P<hex>[0-9a-fA-F]+)|[oO](?P<oct>[0-7]+)|[bB](?P<bin>[01]+))$")
        .unwrap_or_else(|e| panic!("invalid radix pattern: {e}"))
});

impl Value {
    /// Best-effort conversion of a raw cell.
    ///
    /// The whole (trimmed) text must be a number for it to become one;
    /// empty or blank text stays a string rather than becoming zero.
    pub fn coerce(raw: &str) -> Value {
        let text = raw.trim();
        if text.is_empty() {
            return Value::String(raw.to_string());
        }

        if DECIMAL.is_match(text) {
            let parsed = match text.trim_start_matches(['+', '-']) {
                "Infinity" => Some(f64::INFINITY),
                _ => text.trim_start_matches('+').parse::<f64>().ok().map(f64::abs),
            };
            if let Some(magnitude) = parsed {
                let negative = text.starts_with('-');
                return Value::Number(if negative { -magnitude } else { magnitude });
            }
        }

        if let Some(caps) = RADIX.captures(text) {
            let (digits, radix) = match (caps.name("hex"), caps.name("oct"), caps.name("bin")) {
                (Some(d), _, _) => (d.as_str(), 16),
                (_, Some(d), _) => (d.as_str(), 8),
                (_, _, Some(d)) => (d.as_str(), 2),
                _ => return Value::String(raw.to_string()),
            };
            let number = digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
            return Value::Number(number);
        }

        Value::String(raw.to_string())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable kind name
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Absent => "absent",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Absent => f.write_str("undefined"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

static ABSENT: Value = Value::Absent;

/// One record: field names mapped to values, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping its original position if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// The field's value, or [`Value::Absent`] if the row has no such field.
    pub fn get(&self, name: &str) -> &Value {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .unwrap_or(&ABSENT)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// A new row with exactly `names`, in that order. Names missing here
    /// become [`Value::Absent`]; a repeated name keeps its first position.
    pub fn project(&self, names: &[String]) -> Row {
        let mut projected = Row {
            fields: Vec::with_capacity(names.len()),
        };
        for name in names {
            if !projected.contains(name) {
                projected.fields.push((name.clone(), self.get(name).clone()));
            }
        }
        projected
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}
