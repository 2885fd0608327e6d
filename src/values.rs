//! Fill files: field values and selections declared in TOML
//!
//! Lets non-interactive callers (the CLI, scripts) fill a template by
//! naming fields by label and options by value or label. Selections
//! pass through [`Choices`], so the exclusivity rules hold exactly as
//! they would in a form.
//!
//! ```toml
//! [fields]
//! topic = "dogs"
//!
//! [selections]
//! Tone = ["formal"]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::choices::Choices;
use crate::error::FillError;
use crate::parser::Extraction;
use crate::render::{FieldValues, Selections};

/// Values for one fill of a template.
#[derive(Debug, Clone, Default)]
pub struct FillFile {
    /// Field values keyed by field label.
    pub fields: HashMap<String, String>,
    /// Option names (value or label) keyed by region title.
    pub selections: HashMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct TomlFill {
    #[serde(default)]
    fields: HashMap<String, String>,
    #[serde(default)]
    selections: HashMap<String, Vec<String>>,
}

impl FillFile {
    /// Load a fill file from TOML on disk.
    pub fn from_file(path: &Path) -> Result<Self, FillError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a fill file from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, FillError> {
        let parsed: TomlFill = toml::from_str(content)?;
        Ok(FillFile {
            fields: parsed.fields,
            selections: parsed.selections,
        })
    }

    /// Match the declared names against an extraction.
    ///
    /// A label fills every field carrying it; unknown labels and
    /// titles are ignored (the engine treats missing values as empty
    /// anyway). Option names are toggled in declaration order through
    /// [`Choices`], so a sovereign later in the list displaces
    /// earlier picks the way clicking would.
    pub fn resolve(&self, extraction: &Extraction) -> (FieldValues, Selections) {
        let mut values = FieldValues::new();
        for (id, field) in extraction.inputs() {
            if let Some(value) = self.fields.get(&field.label) {
                values.insert(id, value.clone());
            }
        }

        let mut selections = Selections::new();
        for (id, region) in extraction.selects() {
            let Some(names) = self.selections.get(&region.title) else {
                continue;
            };
            let mut choices = Choices::new();
            for name in names {
                choices.toggle_value(region, name);
            }
            selections.insert(id, choices.values(region));
        }
        (values, selections)
    }
}
