//! Statement value: SQL text plus its positional parameters.

use crate::sql::params::SqlParam;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub sql: &'static str,
    pub params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: &'static str) -> Self {
        Statement {
            sql,
            params: Vec::new(),
        }
    }

    /// Append the next positional parameter (`$1`, `$2`, ...).
    pub fn bind(mut self, v: impl Into<SqlParam>) -> Self {
        self.params.push(v.into());
        self
    }

    /// Number of distinct `$n` placeholders in the SQL text.
    #[cfg(test)]
    pub fn placeholder_count(&self) -> usize {
        let mut highest = 0usize;
        let bytes = self.sql.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if let Some(n) = self.sql.get(start..end).and_then(|d| d.parse::<usize>().ok()) {
                    highest = highest.max(n);
                }
                i = end.max(start);
            } else {
                i += 1;
            }
        }
        highest
    }
}
