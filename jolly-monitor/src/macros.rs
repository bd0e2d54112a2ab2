//! Recorded command macros
//!
//! A macro is a name plus the verbatim tokens of a command line. Running it
//! hands the re-joined line back to the caller's dispatcher, so a macro may
//! call other macros. There is no cycle detection.

use std::collections::BTreeMap;

use crate::error::{MonitorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub name: String,
    pub tokens: Vec<String>,
}

impl Macro {
    pub fn new(name: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            name: name.into(),
            tokens,
        }
    }

    /// Tokens joined by single spaces
    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn run<R>(&self, dispatch: impl FnOnce(&str) -> R) -> R {
        dispatch(&self.command_line())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MacroRegistry {
    macros: BTreeMap<String, Macro>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a macro, returning the one it replaces
    pub fn define(&mut self, name: impl Into<String>, tokens: Vec<String>) -> Option<Macro> {
        let name = name.into();
        tracing::debug!("defining macro {:?} = {:?}", name, tokens.join(" "));
        self.macros.insert(name.clone(), Macro::new(name, tokens))
    }

    pub fn get(&self, name: &str) -> Result<&Macro> {
        self.macros
            .get(name)
            .ok_or_else(|| MonitorError::UnknownMacro(name.to_string()))
    }

    /// Look up `name` and pass its command line to `dispatch`
    pub fn invoke<R>(&self, name: &str, dispatch: impl FnOnce(&str) -> R) -> Result<R> {
        Ok(self.get(name)?.run(dispatch))
    }

    /// Macros sorted by name
    pub fn list(&self) -> impl Iterator<Item = &Macro> {
        self.macros.values()
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_invoke_dispatches_joined_line() {
        let mut registry = MacroRegistry::new();
        registry.define("m", tokens("A B C"));

        let mut seen = Vec::new();
        registry
            .invoke("m", |line| seen.push(line.to_string()))
            .unwrap();
        assert_eq!(seen, vec!["A B C"]);
    }

    #[test]
    fn test_invoke_unknown() {
        let registry = MacroRegistry::new();
        let result = registry.invoke("nope", |_| ());
        assert!(matches!(result, Err(MonitorError::UnknownMacro(name)) if name == "nope"));
    }

    #[test]
    fn test_define_overwrites() {
        let mut registry = MacroRegistry::new();
        assert!(registry.define("m", tokens("next")).is_none());
        let previous = registry.define("m", tokens("next 10")).unwrap();

        assert_eq!(previous.command_line(), "next");
        assert_eq!(registry.get("m").unwrap().command_line(), "next 10");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tokens_are_kept_verbatim() {
        let mut registry = MacroRegistry::new();
        registry.define("m", tokens("readb pc 0x0A"));
        assert_eq!(registry.get("m").unwrap().tokens, vec!["readb", "pc", "0x0A"]);
    }

    #[test]
    fn test_list_sorted() {
        let mut registry = MacroRegistry::new();
        registry.define("zeta", tokens("pc"));
        registry.define("alpha", tokens("pc"));
        let names: Vec<&str> = registry.list().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_empty_macro() {
        let m = Macro::new("empty", vec![]);
        assert_eq!(m.command_line(), "");
    }
}
