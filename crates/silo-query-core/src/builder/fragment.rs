//! SQL text paired with the values bound to its placeholders.

use crate::ident::placeholder;

/// A piece of SQL text and its bindings, in placeholder order.
///
/// Literals only ever enter through [`Fragment::bind`], which writes the
/// placeholder and records the value in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    sql: String,
    bindings: Vec<String>,
}

impl Fragment {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fragment from trusted SQL text with no bindings.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: vec![],
        }
    }

    /// Appends trusted SQL text.
    pub fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Appends a placeholder and binds `value` to it.
    pub fn bind(&mut self, value: impl Into<String>) {
        self.sql.push_str(placeholder());
        self.bindings.push(value.into());
    }

    /// Appends another fragment, text and bindings alike.
    pub fn append(&mut self, other: Self) {
        self.sql.push_str(&other.sql);
        self.bindings.extend(other.bindings);
    }

    /// Joins fragments with a separator, keeping bindings in order.
    #[must_use]
    pub fn join(fragments: impl IntoIterator<Item = Self>, separator: &str) -> Self {
        let mut joined = Self::new();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined.push_str(separator);
            }
            joined.append(fragment);
        }
        joined
    }

    /// Returns the SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the bound values.
    #[must_use]
    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    /// Returns whether the fragment carries no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Splits the fragment into its text and bindings.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.sql, self.bindings)
    }
}
