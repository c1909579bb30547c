//! Field model: form-field descriptors, their kinds and options, and the sparse
//! patch type used by property edits.
//!
//! This module defines what one placed field looks like (`FieldDescriptor`,
//! `FieldKind`, `FieldOption`) and how the property panel changes it
//! (`FieldPatch`). Descriptors carry an open `extra` bag so attributes this
//! crate does not know about (validation rules, widget hints) survive a
//! save/load cycle untouched.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Keys owned by the typed descriptor fields. Extra-bag entries under these
/// names are never written by patches and are left out when serializing.
const RESERVED_KEYS: [&str; 6] = ["type", "label", "name", "placeholder", "required", "options"];

/// The kind of a form field.
///
/// Serialized as its lowercase tag. Unknown tags deserialize into
/// [`FieldKind::Other`] so schemas written by newer designers still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Single-line text input.
    Input,
    /// Multi-line text area.
    Textarea,
    /// Numeric input.
    Number,
    /// Drop-down select over `options`.
    Select,
    /// Radio group over `options`.
    Radio,
    /// Checkbox group over `options`.
    Checkbox,
    /// Date picker.
    Date,
    /// On/off switch.
    Switch,
    /// A kind this crate does not recognize, kept verbatim.
    Other(String),
}

impl FieldKind {
    /// The eight kinds offered by the built-in palette, in palette order.
    pub const BUILTIN: [FieldKind; 8] = [
        Self::Input,
        Self::Textarea,
        Self::Number,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::Date,
        Self::Switch,
    ];

    /// The wire tag for this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Switch => "switch",
            Self::Other(tag) => tag,
        }
    }

    /// Whether this kind presents a list of `options` to choose from.
    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }
}

impl From<String> for FieldKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "input" => Self::Input,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "date" => Self::Date,
            "switch" => Self::Switch,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_owned())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque scalar value of a choice option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// String value, the common case for tag-edited options.
    Text(String),
    /// Numeric value.
    Number(Number),
    /// Boolean value, as written by yes/no choice lists.
    Bool(bool),
    /// Explicit `null` value.
    Null,
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

/// One `{label, value}` entry of a choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Text shown to the form user.
    pub label: String,
    /// Value submitted when this option is chosen.
    pub value: OptionValue,
}

impl FieldOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// A form field as placed on the canvas and as stored in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Widget kind.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Field identifier, unique within a schema at insertion time.
    #[serde(default)]
    pub name: String,
    /// Hint text shown in empty widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Whether the form user must fill this field.
    #[serde(default)]
    pub required: bool,
    /// Choices for select, radio and checkbox kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Any other attributes, carried through serialization unchanged.
    #[serde(flatten, serialize_with = "serialize_extra")]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// Create a descriptor with only kind, label and name set.
    #[must_use]
    pub fn new(kind: FieldKind, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            name: name.into(),
            placeholder: None,
            required: false,
            options: None,
            extra: Map::new(),
        }
    }

    /// Apply a sparse patch in place. Only present attributes are written.
    ///
    /// Extra-bag entries whose value is `null` are removed; reserved keys
    /// are skipped.
    pub fn apply(&mut self, patch: &FieldPatch) {
        if let Some(label) = &patch.label {
            self.label.clone_from(label);
        }
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = (!placeholder.is_empty()).then(|| placeholder.clone());
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = &patch.options {
            self.options = Some(options.clone());
        }
        for (key, value) in &patch.extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            if value.is_null() {
                self.extra.remove(key);
            } else {
                self.extra.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Sparse update for a field descriptor. Only present attributes are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPatch {
    /// New display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// New field identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New placeholder text. An empty string removes the placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// New required flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Replacement option list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    /// Extra-bag keys to merge or remove (null values delete keys).
    #[serde(flatten, serialize_with = "serialize_extra")]
    pub extra: Map<String, Value>,
}

impl FieldPatch {
    /// Build a patch replacing the option list from free-form tags, where each
    /// tag is both the label and the value.
    #[must_use]
    pub fn options_from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = tags
            .into_iter()
            .map(|tag| {
                let tag = tag.into();
                FieldOption { label: tag.clone(), value: OptionValue::Text(tag) }
            })
            .collect();
        Self { options: Some(options), ..Self::default() }
    }

    /// The new name this patch would give a field currently called `current`,
    /// or `None` when the patch leaves the name alone.
    #[must_use]
    pub fn rename_of(&self, current: &str) -> Option<&str> {
        self.name.as_deref().filter(|name| *name != current)
    }

    /// Returns `true` if applying this patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.name.is_none()
            && self.placeholder.is_none()
            && self.required.is_none()
            && self.options.is_none()
            && self.extra.is_empty()
    }
}

/// Write the extra bag without entries that shadow a typed field, so the
/// output never carries a key twice.
fn serialize_extra<S: Serializer>(extra: &Map<String, Value>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(extra.iter().filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str())))
}
