//! The operator catalog: which operator names are counted per dialect.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::dialect::Dialect;
use crate::errors::CatalogError;

/// Dialect → operator names. Loaded once per run, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorCatalog {
    operators: BTreeMap<Dialect, BTreeSet<String>>,
}

impl OperatorCatalog {
    /// Build a catalog from explicit entries, validating operator names.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (Dialect, Vec<S>)>,
        S: Into<String>,
    {
        let mut operators: BTreeMap<Dialect, BTreeSet<String>> = BTreeMap::new();
        for (dialect, names) in entries {
            let set = operators.entry(dialect).or_default();
            for name in names {
                let name = name.into();
                validate_operator_name(&name)?;
                set.insert(name);
            }
        }
        Ok(Self { operators })
    }

    /// Parse the catalog document: `{ dialect: { operator: <placeholder>, ... }, ... }`.
    ///
    /// Only the key structure is read. Placeholders may be empty objects, numbers,
    /// or previously accumulated counts.
    pub fn from_json_str(json: &str, source_name: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(json).map_err(|e| CatalogError::Malformed {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
        let Value::Object(dialects) = root else {
            return Err(CatalogError::Malformed {
                source_name: source_name.to_string(),
                message: "top level must be an object keyed by dialect".to_string(),
            });
        };

        let mut operators = BTreeMap::new();
        for (key, entry) in dialects {
            let dialect = parse_dialect_key(&key, source_name)?;
            let Value::Object(ops) = entry else {
                return Err(CatalogError::Malformed {
                    source_name: source_name.to_string(),
                    message: format!("entry for '{key}' must be an object keyed by operator"),
                });
            };
            let mut set = BTreeSet::new();
            for name in ops.keys() {
                validate_operator_name(name)?;
                set.insert(name.clone());
            }
            operators.insert(dialect, set);
        }
        Ok(Self { operators })
    }

    /// Operators for a dialect, if the dialect is catalogued.
    pub fn operators(&self, dialect: Dialect) -> Option<&BTreeSet<String>> {
        self.operators.get(&dialect)
    }

    /// Operators for a dialect, failing loudly if it is missing.
    pub fn require(&self, dialect: Dialect) -> Result<&BTreeSet<String>, CatalogError> {
        self.operators
            .get(&dialect)
            .ok_or_else(|| CatalogError::MissingDialect {
                dialect: dialect.to_string(),
            })
    }

    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.operators.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dialect, &BTreeSet<String>)> {
        self.operators.iter().map(|(d, ops)| (*d, ops))
    }

    /// Total number of (dialect, operator) pairs.
    pub fn len(&self) -> usize {
        self.operators.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Restrict the catalog to the given dialects.
    pub fn restricted_to(&self, dialects: &[Dialect]) -> Self {
        Self {
            operators: self
                .operators
                .iter()
                .filter(|(d, _)| dialects.contains(d))
                .map(|(d, ops)| (*d, ops.clone()))
                .collect(),
        }
    }
}

pub(crate) fn parse_dialect_key(key: &str, source_name: &str) -> Result<Dialect, CatalogError> {
    key.parse::<Dialect>()
        .map_err(|_| CatalogError::UnknownDialect {
            name: key.to_string(),
            source_name: source_name.to_string(),
        })
}

/// Operator names are spliced into match patterns, so they must be plain identifiers.
fn validate_operator_name(name: &str) -> Result<(), CatalogError> {
    let mut chars = name.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if valid_head && valid_tail {
        Ok(())
    } else {
        Err(CatalogError::InvalidOperatorName {
            operator: name.to_string(),
        })
    }
}
