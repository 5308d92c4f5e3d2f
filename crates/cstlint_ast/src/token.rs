//! Token kinds and the per-format catalog that maps them to symbolic names.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;

use thiserror::Error;

/// A format's closed set of token kinds.
///
/// Implemented by the per-format enums in [`crate::tokens`]. Ids start at 1
/// and follow declaration order.
pub trait TokenKind: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every kind of the format, in id order.
    const ALL: &'static [Self];

    /// Symbolic name, e.g. `VALUE_TEXT`.
    fn name(self) -> &'static str;

    /// Numeric id.
    fn id(self) -> u32;

    /// The format's shared catalog, built on first use.
    fn catalog() -> &'static TokenCatalog<Self>;
}

/// Failed catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No kind carries this id.
    #[error("unknown token id '{0}'")]
    UnknownId(u32),

    /// No kind carries this name.
    #[error("unknown token name '{0}'")]
    UnknownName(String),
}

/// Bidirectional id/name lookup for one format.
#[derive(Debug)]
pub struct TokenCatalog<K: 'static> {
    by_name: HashMap<&'static str, K>,
    by_id: BTreeMap<u32, K>,
}

impl<K: TokenKind> TokenCatalog<K> {
    /// Builds the catalog from `K::ALL`.
    pub fn build() -> Self {
        let by_name = K::ALL.iter().map(|&kind| (kind.name(), kind)).collect();
        let by_id = K::ALL.iter().map(|&kind| (kind.id(), kind)).collect();
        Self { by_name, by_id }
    }

    pub fn name_to_id(&self, name: &str) -> Result<u32, CatalogError> {
        self.kind_of_name(name).map(TokenKind::id)
    }

    pub fn id_to_name(&self, id: u32) -> Result<&'static str, CatalogError> {
        self.kind_of_id(id).map(TokenKind::name)
    }

    pub fn kind_of_name(&self, name: &str) -> Result<K, CatalogError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    pub fn kind_of_id(&self, id: u32) -> Result<K, CatalogError> {
        self.by_id
            .get(&id)
            .copied()
            .ok_or(CatalogError::UnknownId(id))
    }

    /// Snapshot of every known id, ascending.
    pub fn all_ids(&self) -> Vec<u32> {
        self.by_id.keys().copied().collect()
    }

    /// Every known kind, in id order.
    pub fn all_kinds(&self) -> &'static [K] {
        K::ALL
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
