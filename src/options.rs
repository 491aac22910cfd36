//! Typed option sets: a strict, closed schema over named values.
//!
//! An [`OptionResolver`] knows exactly which keys may appear. Resolving a value
//! map fails on unknown keys, missing required keys and values of the wrong
//! shape. Defaults fill in optional keys that were not supplied.

use crate::error::OptionValidationError;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Shape of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Object,
}

impl OptionType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => OptionType::Null,
            Value::Bool(_) => OptionType::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => OptionType::Int,
            Value::Number(_) => OptionType::Float,
            Value::String(_) => OptionType::String,
            Value::Array(_) => OptionType::Array,
            Value::Object(_) => OptionType::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Null => "null",
            OptionType::Bool => "bool",
            OptionType::Int => "int",
            OptionType::Float => "float",
            OptionType::String => "string",
            OptionType::Array => "array",
            OptionType::Object => "object",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative option schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionResolver {
    defined: BTreeSet<String>,
    required: BTreeSet<String>,
    defaults: BTreeMap<String, Value>,
    allowed_types: BTreeMap<String, Vec<OptionType>>,
}

impl OptionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare keys that may appear, without defaults or requirements.
    pub fn set_defined<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defined.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Declare keys that must be supplied (or defaulted).
    pub fn set_required<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            let key = key.into();
            self.defined.insert(key.clone());
            self.required.insert(key);
        }
        self
    }

    pub fn set_default(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        let key = key.into();
        self.defined.insert(key.clone());
        self.defaults.insert(key, value);
        self
    }

    /// Restrict the shapes a key accepts.
    pub fn set_allowed_types(&mut self, key: impl Into<String>, types: &[OptionType]) -> &mut Self {
        let key = key.into();
        self.defined.insert(key.clone());
        self.allowed_types.insert(key, types.to_vec());
        self
    }

    pub fn is_defined(&self, key: &str) -> bool {
        self.defined.contains(key)
    }

    pub fn is_required(&self, key: &str) -> bool {
        self.required.contains(key)
    }

    pub fn defined_options(&self) -> impl Iterator<Item = &str> {
        self.defined.iter().map(String::as_str)
    }

    /// Validate `values` against the schema and apply defaults.
    pub fn resolve(
        &self,
        values: &BTreeMap<String, Value>,
    ) -> Result<ResolvedOptions, OptionValidationError> {
        if let Some(key) = values.keys().find(|key| !self.defined.contains(*key)) {
            return Err(OptionValidationError::UndefinedOption {
                key: key.clone(),
                defined: self.defined.iter().cloned().collect(),
            });
        }

        if let Some(key) = self
            .required
            .iter()
            .find(|key| !values.contains_key(*key) && !self.defaults.contains_key(*key))
        {
            return Err(OptionValidationError::MissingRequired { key: key.clone() });
        }

        let mut resolved = self.defaults.clone();
        resolved.extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));

        for (key, value) in &resolved {
            let Some(allowed) = self.allowed_types.get(key) else {
                continue;
            };
            let actual = OptionType::of(value);
            if !allowed.contains(&actual) {
                return Err(OptionValidationError::InvalidType {
                    key: key.clone(),
                    expected: allowed
                        .iter()
                        .map(OptionType::as_str)
                        .collect::<Vec<_>>()
                        .join("|"),
                    actual: actual.to_string(),
                });
            }
        }

        Ok(ResolvedOptions(resolved))
    }
}

/// Values that passed an [`OptionResolver`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions(BTreeMap<String, Value>);

impl ResolvedOptions {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    // ==================== Closed Schema Tests ====================

    #[test]
    fn test_defined_keys_resolve_as_given() {
        let mut resolver = OptionResolver::new();
        resolver.set_defined(["id", "path"]);

        let resolved = resolver
            .resolve(&values(&[("id", json!(4)), ("path", json!("/a"))]))
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.get_str("path"), Some("/a"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut resolver = OptionResolver::new();
        resolver.set_defined(["id"]);

        let err = resolver
            .resolve(&values(&[("slug", json!("x"))]))
            .unwrap_err();

        assert_eq!(
            err,
            OptionValidationError::UndefinedOption {
                key: "slug".to_string(),
                defined: vec!["id".to_string()],
            }
        );
    }

    #[test]
    fn test_empty_schema_accepts_empty_values() {
        let resolved = OptionResolver::new().resolve(&BTreeMap::new()).unwrap();
        assert!(resolved.is_empty());
    }

    // ==================== Required / Default Tests ====================

    #[test]
    fn test_missing_required_key() {
        let mut resolver = OptionResolver::new();
        resolver.set_required(["document_id"]);

        let err = resolver.resolve(&BTreeMap::new()).unwrap_err();
        assert_eq!(
            err,
            OptionValidationError::MissingRequired {
                key: "document_id".to_string()
            }
        );
    }

    #[test]
    fn test_default_fills_missing_key() {
        let mut resolver = OptionResolver::new();
        resolver.set_required(["path"]).set_default("path", json!(""));

        let resolved = resolver.resolve(&BTreeMap::new()).unwrap();
        assert_eq!(resolved.get_str("path"), Some(""));
        assert!(resolver.is_required("path"));
    }

    // ==================== Type Tests ====================

    #[test]
    fn test_allowed_types_are_enforced() {
        let mut resolver = OptionResolver::new();
        resolver.set_allowed_types("document_id", &[OptionType::Int]);

        let err = resolver
            .resolve(&values(&[("document_id", json!("12"))]))
            .unwrap_err();

        assert_eq!(
            err,
            OptionValidationError::InvalidType {
                key: "document_id".to_string(),
                expected: "int".to_string(),
                actual: "string".to_string(),
            }
        );
    }

    #[test]
    fn test_any_of_several_types() {
        let mut resolver = OptionResolver::new();
        resolver.set_allowed_types("path", &[OptionType::String, OptionType::Null]);

        assert!(resolver.resolve(&values(&[("path", json!(null))])).is_ok());
        assert!(resolver.resolve(&values(&[("path", json!("/x"))])).is_ok());
        assert!(resolver.resolve(&values(&[("path", json!(1.5))])).is_err());
    }

    #[test]
    fn test_option_type_of_numbers() {
        assert_eq!(OptionType::of(&json!(3)), OptionType::Int);
        assert_eq!(OptionType::of(&json!(3.5)), OptionType::Float);
    }
}
