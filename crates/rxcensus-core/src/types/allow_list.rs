//! Repositories eligible for aggregation, per dialect.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::catalog::parse_dialect_key;
use super::dialect::Dialect;
use super::identifiers::RepositoryId;
use crate::errors::CatalogError;

/// Dialect → repository identifiers. Repositories absent from a dialect's set
/// may be scanned but never reach the usage table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowList {
    repositories: BTreeMap<Dialect, BTreeSet<RepositoryId>>,
}

impl AllowList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `{ dialect: [repository_id, ...], ... }`.
    pub fn from_json_str(json: &str, source_name: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| CatalogError::Malformed {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        let mut list = Self::new();
        for (key, ids) in raw {
            let dialect = parse_dialect_key(&key, source_name)?;
            // Registering the dialect even when its list is empty keeps
            // "nothing eligible" distinct from "dialect not mentioned".
            list.register(dialect);
            for id in ids {
                list.insert(dialect, RepositoryId::new(id));
            }
        }
        Ok(list)
    }

    /// Mention `dialect` without making any repository eligible.
    pub fn register(&mut self, dialect: Dialect) {
        self.repositories.entry(dialect).or_default();
    }

    pub fn insert(&mut self, dialect: Dialect, repository: RepositoryId) {
        self.repositories.entry(dialect).or_default().insert(repository);
    }

    pub fn contains(&self, dialect: Dialect, repository: &str) -> bool {
        self.repositories
            .get(&dialect)
            .is_some_and(|repos| repos.contains(repository))
    }

    pub fn repositories(&self, dialect: Dialect) -> impl Iterator<Item = &RepositoryId> {
        self.repositories.get(&dialect).into_iter().flatten()
    }

    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.repositories.keys().copied()
    }

    /// Number of eligible repositories for a dialect.
    pub fn len_for(&self, dialect: Dialect) -> usize {
        self.repositories.get(&dialect).map_or(0, BTreeSet::len)
    }
}

impl FromIterator<(Dialect, RepositoryId)> for AllowList {
    fn from_iter<T: IntoIterator<Item = (Dialect, RepositoryId)>>(iter: T) -> Self {
        let mut list = Self::new();
        for (dialect, repository) in iter {
            list.insert(dialect, repository);
        }
        list
    }
}
