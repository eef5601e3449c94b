//! View model handed to the rendering collaborator.

use super::flash::FlashAttributes;
use super::{WorkflowError, WorkflowResult};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Named attributes a view renders; values are opaque JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ModelMap {
    attributes: BTreeMap<String, Value>,
}

impl ModelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` under `name`, replacing any previous value.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: &T) -> WorkflowResult<()>
    where
        T: Serialize + ?Sized,
    {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|source| WorkflowError::Model {
            name: name.clone(),
            source,
        })?;
        self.attributes.insert(name, value);
        Ok(())
    }

    /// Sets `name` to `true`.
    pub fn flag(&mut self, name: impl Into<String>) {
        self.attributes.insert(name.into(), Value::Bool(true));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn is_flagged(&self, name: &str) -> bool {
        matches!(self.attributes.get(name), Some(Value::Bool(true)))
    }

    /// Returns the attribute as text when it is a JSON string.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Copies flash notices into the model.
    pub(crate) fn merge_flash(&mut self, flash: FlashAttributes) {
        for (name, text) in flash {
            self.attributes.insert(name, Value::String(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModelMap;

    #[test]
    fn flags_and_values_are_distinguishable() {
        let mut model = ModelMap::new();
        model.flag("title_error");
        model
            .insert("albums", &vec!["Debut"])
            .expect("list should serialize");

        assert!(model.is_flagged("title_error"));
        assert!(!model.is_flagged("albums"));
        assert!(!model.is_flagged("missing"));
        assert_eq!(model.names().collect::<Vec<_>>(), ["albums", "title_error"]);
    }
}
