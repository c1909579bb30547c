//! Built-in palette templates.
//!
//! Templates are plain data: the palette hands clones of them to the drag
//! coordinator and never sees the live schema. The `name` each template
//! carries is a placeholder; insertion always mints a fresh one.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::field::{FieldDescriptor, FieldKind, FieldOption};

/// Template for one palette card, or `None` for kinds the palette does not offer.
#[must_use]
pub fn template(kind: &FieldKind) -> Option<FieldDescriptor> {
    let (label, placeholder) = match kind {
        FieldKind::Input => ("Text input", Some("Please enter")),
        FieldKind::Textarea => ("Multi-line text", Some("Please enter")),
        FieldKind::Number => ("Number input", Some("Please enter a number")),
        FieldKind::Select => ("Drop-down select", Some("Please select")),
        FieldKind::Radio => ("Radio group", None),
        FieldKind::Checkbox => ("Checkbox group", None),
        FieldKind::Date => ("Date picker", Some("Please select a date")),
        FieldKind::Switch => ("Switch", None),
        FieldKind::Other(_) => return None,
    };

    let mut field = FieldDescriptor::new(kind.clone(), label, format!("{kind}_field"));
    field.placeholder = placeholder.map(str::to_owned);
    if kind.is_choice() {
        field.options = Some(default_options());
    }
    Some(field)
}

/// All palette templates in display order.
#[must_use]
pub fn builtin_templates() -> Vec<FieldDescriptor> {
    FieldKind::BUILTIN.iter().filter_map(template).collect()
}

fn default_options() -> Vec<FieldOption> {
    vec![FieldOption::new("Option 1", "1"), FieldOption::new("Option 2", "2")]
}
