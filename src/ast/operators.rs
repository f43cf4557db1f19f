use std::cmp::Ordering;
use std::fmt;

/// Comparison operators allowed in a `FILTER` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Equal (`=`)
    Equal,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
}

impl Comparator {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equal => "=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterEqual => ">=",
            Comparator::LessThan => "<",
            Comparator::LessEqual => "<=",
        }
    }

    /// Whether an ordering between a row value and a literal satisfies the
    /// comparator. `None` (incomparable) satisfies nothing.
    pub fn accepts(self, ordering: Option<Ordering>) -> bool {
        let Some(ordering) = ordering else {
            return false;
        };
        match self {
            Comparator::Equal => ordering == Ordering::Equal,
            Comparator::GreaterThan => ordering == Ordering::Greater,
            Comparator::GreaterEqual => ordering != Ordering::Less,
            Comparator::LessThan => ordering == Ordering::Less,
            Comparator::LessEqual => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
