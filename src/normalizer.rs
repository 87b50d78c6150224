use crate::catalog::ALIASES;
use crate::model::{ModelKey, ResolveError};
use std::collections::HashMap;

/// Immutable alias table built once at startup.
#[derive(Debug, Clone)]
pub struct AliasTable {
    aliases: HashMap<String, ModelKey>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::from_entries(ALIASES)
    }

    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let aliases = entries
            .iter()
            .map(|(alias, key)| (alias.to_uppercase(), ModelKey::new(*key)))
            .collect();
        Self { aliases }
    }

    /// Maps a user typed query to its canonical model key. Exact match only.
    pub fn resolve(&self, query: &str) -> Result<ModelKey, ResolveError> {
        let folded = query.trim().to_uppercase();

        self.aliases
            .get(&folded)
            .cloned()
            .ok_or_else(|| ResolveError::UndefinedModel {
                query: query.to_string(),
            })
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}
