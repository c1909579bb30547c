use super::*;

#[test]
fn builtin_templates_cover_every_builtin_kind_in_order() {
    let templates = builtin_templates();
    let kinds: Vec<FieldKind> = templates.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(kinds, FieldKind::BUILTIN.to_vec());
}

#[test]
fn choice_templates_carry_two_default_options() {
    for kind in [FieldKind::Select, FieldKind::Radio, FieldKind::Checkbox] {
        let field = template(&kind).expect("choice kind should have a template");
        let options = field.options.expect("choice template should have options");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], FieldOption::new("Option 1", "1"));
    }
}

#[test]
fn non_choice_templates_have_no_options() {
    for kind in [FieldKind::Input, FieldKind::Textarea, FieldKind::Number, FieldKind::Date, FieldKind::Switch] {
        let field = template(&kind).expect("builtin kind should have a template");
        assert!(field.options.is_none(), "{kind} should not have options");
    }
}

#[test]
fn templates_default_to_not_required() {
    assert!(builtin_templates().iter().all(|t| !t.required));
}

#[test]
fn template_placeholder_name_uses_kind_tag() {
    let field = template(&FieldKind::Number).expect("number should have a template");
    assert_eq!(field.name, "number_field");
    assert_eq!(field.placeholder.as_deref(), Some("Please enter a number"));
}

#[test]
fn template_returns_none_for_unknown_kind() {
    assert!(template(&FieldKind::Other("signature".into())).is_none());
}
