use std::collections::{BTreeMap, HashMap};

use crate::definition::{is_numeric_msgid, MessageDefinition};
use crate::types::{MessageCategory, MessageError};

/// Resolves message ids, symbols and old names to definitions.
///
/// Hosts with their own message registry implement this; [`MessageStore`]
/// is the in-memory implementation used by default.
pub trait MessageCatalog {
    /// All definitions a token resolves to, in registration order.
    /// Old names can resolve to more than one definition.
    fn definitions_for(&self, id_or_symbol: &str) -> Result<Vec<MessageDefinition>, MessageError>;

    /// Current symbol for a message id (old ids resolve to the new symbol).
    fn symbol_for(&self, msgid: &str) -> Result<String, MessageError>;

    /// Message ids in a category, sorted.
    fn ids_by_category(&self, category: MessageCategory) -> Vec<String>;

    /// Message ids owned by a checker (case-insensitive name), sorted.
    fn ids_by_checker(&self, checker: &str) -> Vec<String>;

    fn has_checker(&self, checker: &str) -> bool;

    /// `symbol (msgid)` for every definition the token resolves to, or the
    /// token itself when it is unknown.
    fn display_string(&self, id_or_symbol: &str) -> String {
        match self.definitions_for(id_or_symbol) {
            Ok(defs) => defs
                .iter()
                .map(MessageDefinition::display_string)
                .collect::<Vec<_>>()
                .join(", "),
            Err(_) => id_or_symbol.to_string(),
        }
    }
}

/// In-memory message registry.
#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    definitions: BTreeMap<String, MessageDefinition>,
    registration_order: Vec<String>,
    /// Lookup key (msgid, symbol, or old name) -> msgids.
    aliases: HashMap<String, Vec<String>>,
    by_category: BTreeMap<MessageCategory, Vec<String>>,
    by_checker: BTreeMap<String, Vec<String>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from definitions, rejecting conflicting ids or symbols.
    pub fn with_definitions(
        definitions: impl IntoIterator<Item = MessageDefinition>,
    ) -> Result<Self, MessageError> {
        let mut store = Self::new();
        for def in definitions {
            store.register(def)?;
        }
        Ok(store)
    }

    pub fn register(&mut self, def: MessageDefinition) -> Result<(), MessageError> {
        if self.definitions.contains_key(&def.msgid) {
            return Err(MessageError::InvalidDefinition(format!(
                "message id {} is already registered",
                def.msgid
            )));
        }
        if let Some(owner) = self.primary_owner(&def.symbol) {
            return Err(MessageError::InvalidDefinition(format!(
                "symbol {} is already used by {owner}",
                def.symbol
            )));
        }

        let msgid = def.msgid.clone();
        self.add_alias(&def.msgid, &msgid);
        self.add_alias(&def.symbol, &msgid);
        for (old_msgid, old_symbol) in &def.old_names {
            self.add_alias(&old_msgid.to_uppercase(), &msgid);
            self.add_alias(old_symbol, &msgid);
        }
        insert_sorted(self.by_category.entry(def.category).or_default(), &msgid);
        insert_sorted(self.by_checker.entry(def.checker.clone()).or_default(), &msgid);
        self.registration_order.push(msgid.clone());
        self.definitions.insert(msgid, def);
        Ok(())
    }

    /// Every registered definition, in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &MessageDefinition> {
        self.registration_order
            .iter()
            .filter_map(|id| self.definitions.get(id))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    fn primary_owner(&self, symbol: &str) -> Option<&str> {
        self.definitions
            .values()
            .find(|d| d.symbol == symbol)
            .map(|d| d.msgid.as_str())
    }

    fn add_alias(&mut self, key: &str, msgid: &str) {
        let ids = self.aliases.entry(key.to_string()).or_default();
        if !ids.iter().any(|i| i == msgid) {
            ids.push(msgid.to_string());
        }
    }

    fn lookup_key(id_or_symbol: &str) -> String {
        if is_numeric_msgid(id_or_symbol) {
            id_or_symbol.to_uppercase()
        } else {
            id_or_symbol.to_string()
        }
    }
}

fn insert_sorted(ids: &mut Vec<String>, msgid: &str) {
    if let Err(pos) = ids.binary_search_by(|probe| probe.as_str().cmp(msgid)) {
        ids.insert(pos, msgid.to_string());
    }
}

impl MessageCatalog for MessageStore {
    fn definitions_for(&self, id_or_symbol: &str) -> Result<Vec<MessageDefinition>, MessageError> {
        let key = Self::lookup_key(id_or_symbol);
        let ids = self
            .aliases
            .get(&key)
            .ok_or_else(|| MessageError::UnknownMessage(id_or_symbol.to_string()))?;
        Ok(ids
            .iter()
            .filter_map(|id| self.definitions.get(id))
            .cloned()
            .collect())
    }

    fn symbol_for(&self, msgid: &str) -> Result<String, MessageError> {
        let key = msgid.to_uppercase();
        self.aliases
            .get(&key)
            .and_then(|ids| ids.first())
            .and_then(|id| self.definitions.get(id))
            .map(|d| d.symbol.clone())
            .ok_or_else(|| MessageError::UnknownMessage(msgid.to_string()))
    }

    fn ids_by_category(&self, category: MessageCategory) -> Vec<String> {
        self.by_category.get(&category).cloned().unwrap_or_default()
    }

    fn ids_by_checker(&self, checker: &str) -> Vec<String> {
        self.by_checker
            .get(&checker.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    fn has_checker(&self, checker: &str) -> bool {
        self.by_checker.contains_key(&checker.to_lowercase())
    }
}
