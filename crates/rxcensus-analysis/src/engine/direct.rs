//! Direct call-site matching: `.operator(` with optional non-word padding.

use regex::Regex;
use rxcensus_core::errors::CatalogError;

use super::matcher::{CountStrategy, OperatorCounts};

/// Counts `receiver.operator(args)` call sites.
///
/// Pattern per operator: `.` + name + any run of characters that are not a
/// word character, `;` or `.` + `(`. Matches never overlap. Named generic
/// arguments (`.map<String>(`) contain word characters and are not matched.
#[derive(Debug, Clone)]
pub struct DirectStrategy {
    patterns: Vec<(String, Regex)>,
}

impl DirectStrategy {
    pub fn new<'a, I>(operators: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let patterns = operators
            .into_iter()
            .map(|op| {
                let pattern = format!(r"\.{}[^\w;.]*\(", regex::escape(op));
                Regex::new(&pattern)
                    .map(|re| (op.clone(), re))
                    .map_err(|_| CatalogError::InvalidOperatorName {
                        operator: op.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl CountStrategy for DirectStrategy {
    fn count(&self, text: &str) -> OperatorCounts {
        self.patterns
            .iter()
            .map(|(op, re)| (op.clone(), re.find_iter(text).count() as u64))
            .collect()
    }

    fn operators(&self) -> Vec<&str> {
        self.patterns.iter().map(|(op, _)| op.as_str()).collect()
    }
}
