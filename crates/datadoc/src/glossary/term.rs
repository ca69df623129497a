//! Business glossary terms and the term dictionary.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DatadocError, Result};

/// A curated business-meaning record for one technical column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Data type label, e.g. `integer` or `string`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub pii: bool,
    #[serde(default, deserialize_with = "scalar_strings")]
    pub examples: Vec<String>,
    /// Expected value format, e.g. `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_terms: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "scalar_strings"
    )]
    pub valid_values: Vec<String>,
}

impl GlossaryTerm {
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            ..Self::default()
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_pii(mut self, pii: bool) -> Self {
        self.pii = pii;
        self
    }
}

/// Accept a list of scalars (strings, numbers, booleans) as strings, so
/// `examples: [1001, 1002]` loads the same as `examples: ["1001", "1002"]`.
fn scalar_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// Read-only mapping from technical column name to glossary term.
///
/// Files hold a top-level `terms` mapping, in YAML or JSON:
///
/// ```yaml
/// terms:
///   customer_id:
///     business_name: Customer Identifier
///     definition: Unique identifier for a customer
///     data_type: integer
///     owner: Sales
///     pii: false
///     examples: [1001, 1002]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermDictionary {
    #[serde(default)]
    terms: IndexMap<String, GlossaryTerm>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(key, term)` pairs. Later duplicates replace
    /// earlier ones.
    pub fn from_terms<K: Into<String>>(terms: impl IntoIterator<Item = (K, GlossaryTerm)>) -> Self {
        Self {
            terms: terms.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }

    /// Load a dictionary, choosing the format from the file extension.
    /// Anything other than `.json` is read as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DatadocError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let dictionary = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };

        tracing::debug!(path = %path.display(), terms = dictionary.len(), "loaded term dictionary");
        Ok(dictionary)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let dictionary: Self = serde_yaml::from_str(text)?;
        dictionary.check_business_names()?;
        Ok(dictionary)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let dictionary: Self = serde_json::from_str(text)?;
        dictionary.check_business_names()?;
        Ok(dictionary)
    }

    fn check_business_names(&self) -> Result<()> {
        match self.terms.iter().find(|(_, t)| t.business_name.trim().is_empty()) {
            Some((key, _)) => Err(DatadocError::Configuration(format!(
                "glossary term '{}' has an empty business_name",
                key
            ))),
            None => Ok(()),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, term: GlossaryTerm) {
        self.terms.insert(key.into(), term);
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, key: &str) -> Option<&GlossaryTerm> {
        self.terms.get(key)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&String, &GlossaryTerm)> {
        self.terms.get_key_value(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GlossaryTerm)> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const YAML: &str = r#"
terms:
  customer_id:
    business_name: Customer Identifier
    definition: Unique identifier for a customer
    data_type: integer
    owner: Sales
    pii: false
    examples: [1001, 1002]
  email:
    business_name: Email Address
    pii: true
    format: user@domain
    related_terms: [customer_id]
"#;

    #[test]
    fn test_yaml_dictionary() {
        let dictionary = TermDictionary::from_yaml_str(YAML).unwrap();

        assert_eq!(dictionary.len(), 2);
        let term = dictionary.get("customer_id").unwrap();
        assert_eq!(term.business_name, "Customer Identifier");
        assert_eq!(term.owner.as_deref(), Some("Sales"));
        assert_eq!(term.examples, vec!["1001", "1002"]);

        let email = dictionary.get("email").unwrap();
        assert!(email.pii);
        assert_eq!(email.definition, None);
        assert_eq!(email.related_terms, vec!["customer_id"]);
        assert!(dictionary.get("Email").is_none());
    }

    #[test]
    fn test_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"terms": {{"order_id": {{"business_name": "Order Number", "examples": ["ORD001"]}}}}}}"#
        )
        .unwrap();

        let dictionary = TermDictionary::load(file.path()).unwrap();
        assert_eq!(dictionary.get("order_id").unwrap().business_name, "Order Number");
    }

    #[test]
    fn test_empty_business_name_rejected() {
        let err = TermDictionary::from_yaml_str("terms:\n  x:\n    business_name: ''\n").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_file_is_empty_dictionary() {
        assert!(TermDictionary::from_yaml_str("").unwrap().is_empty());
    }
}
