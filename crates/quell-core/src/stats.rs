use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::MessageCategory;

/// Counters updated for every accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterStats {
    pub by_category: BTreeMap<MessageCategory, u64>,
    pub by_module: BTreeMap<String, BTreeMap<MessageCategory, u64>>,
    /// Symbol -> occurrences.
    pub by_msg: BTreeMap<String, u64>,
}

impl LinterStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increase_category(&mut self, category: MessageCategory, n: u64) {
        *self.by_category.entry(category).or_insert(0) += n;
    }

    pub fn increase_module_category(&mut self, module: &str, category: MessageCategory, n: u64) {
        *self
            .by_module
            .entry(module.to_string())
            .or_default()
            .entry(category)
            .or_insert(0) += n;
    }

    pub fn increase_symbol(&mut self, symbol: &str) {
        *self.by_msg.entry(symbol.to_string()).or_insert(0) += 1;
    }

    pub fn category_count(&self, category: MessageCategory) -> u64 {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn module_count(&self, module: &str, category: MessageCategory) -> u64 {
        self.by_module
            .get(module)
            .and_then(|cats| cats.get(&category))
            .copied()
            .unwrap_or(0)
    }

    pub fn symbol_count(&self, symbol: &str) -> u64 {
        self.by_msg.get(symbol).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.by_category.values().sum()
    }
}
