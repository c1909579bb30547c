//! Field kind to widget dispatch.
//!
//! Renderers ask for a `WidgetSpec` instead of switching on type tags
//! themselves. Unrecognized kinds fall back to a plain text input so forms
//! saved by a newer designer still display.

#[cfg(test)]
#[path = "widget_test.rs"]
mod widget_test;

use crate::consts::TEXTAREA_ROWS;
use crate::field::{FieldDescriptor, FieldKind, FieldOption};

/// Concrete widget a renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    TextInput,
    TextArea,
    NumberInput,
    Select,
    RadioGroup,
    CheckboxGroup,
    DatePicker,
    Switch,
}

/// Everything a renderer needs to draw one field's widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    pub widget: WidgetKind,
    pub label: String,
    pub placeholder: Option<String>,
    /// Visible rows, for multi-line widgets.
    pub rows: Option<u8>,
    /// Stretch to the container width.
    pub full_width: bool,
    /// Choices, for select, radio and checkbox groups.
    pub options: Option<Vec<FieldOption>>,
    /// Message shown when a required field is left empty.
    pub required_message: Option<String>,
}

impl WidgetSpec {
    #[must_use]
    pub fn for_field(field: &FieldDescriptor) -> Self {
        let widget = match &field.kind {
            FieldKind::Input | FieldKind::Other(_) => WidgetKind::TextInput,
            FieldKind::Textarea => WidgetKind::TextArea,
            FieldKind::Number => WidgetKind::NumberInput,
            FieldKind::Select => WidgetKind::Select,
            FieldKind::Radio => WidgetKind::RadioGroup,
            FieldKind::Checkbox => WidgetKind::CheckboxGroup,
            FieldKind::Date => WidgetKind::DatePicker,
            FieldKind::Switch => WidgetKind::Switch,
        };

        Self {
            widget,
            label: field.label.clone(),
            placeholder: field.placeholder.clone(),
            rows: (widget == WidgetKind::TextArea).then_some(TEXTAREA_ROWS),
            full_width: matches!(widget, WidgetKind::NumberInput | WidgetKind::Select | WidgetKind::DatePicker),
            options: field.kind.is_choice().then(|| field.options.clone().unwrap_or_default()),
            required_message: field.required.then(|| format!("Please enter {}", field.label)),
        }
    }
}
