//! Text-style formatters (chat markup wrappers) and the pluggable registry.

use std::collections::HashMap;
use std::sync::Arc;

/// A pluggable text transformation, selectable by name through the registry.
///
/// `Arc` keeps registered callables shared and identity-comparable
/// (`Arc::ptr_eq`): `get` hands back the exact object that was registered.
pub type Formatter = Arc<dyn Fn(&str) -> String + Send + Sync>;

pub fn bold(s: &str) -> String {
    format!("*{s}*")
}

pub fn italic(s: &str) -> String {
    format!("_{s}_")
}

pub fn monospace(s: &str) -> String {
    format!("```{s}```")
}

pub fn stroke(s: &str) -> String {
    format!("~{s}~")
}

/// Name-keyed lookup table for formatters.
///
/// Registration is last-write-wins and there is no removal: the registry is
/// populated once at startup and read many times after. A missing name is a
/// normal outcome (`None`), not an error.
pub struct FormatterRegistry {
    formatters: HashMap<String, Formatter>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in formatters under their
    /// conventional names.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("bold", Arc::new(bold));
        registry.register("italic", Arc::new(italic));
        registry.register("monospace", Arc::new(monospace));
        registry.register("stroke", Arc::new(stroke));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, formatter: Formatter) {
        self.formatters.insert(name.into(), formatter);
    }

    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.formatters.get(name)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
