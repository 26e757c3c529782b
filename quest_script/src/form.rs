//! Property-entry form derived from a step type.
//!
//! The form is a pure projection of the schema's merged property set plus the
//! values entered so far. Submitting it yields a [`StepRecord`].

use quest_data::{GLOBAL_TYPE, PropertyDef, PropertyKind, SchemaProvider, StepRecord};

/// Placeholder shown when a property has no description.
pub const NO_DESCRIPTION: &str = "(not specified)";

/// Input widget offered for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Toggle,
    TextField,
    /// Text field with an "open external editor" affordance.
    RichTextField,
}

impl From<PropertyKind> for Widget {
    fn from(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Boolean => Widget::Toggle,
            PropertyKind::Text => Widget::TextField,
            PropertyKind::RichText => Widget::RichTextField,
        }
    }
}

/// Current input of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Checked(bool),
    Text(String),
}

impl FieldValue {
    fn empty_for(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Boolean => FieldValue::Checked(false),
            PropertyKind::Text | PropertyKind::RichText => FieldValue::Text(String::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub def: PropertyDef,
    pub value: FieldValue,
}

impl FormField {
    fn new(def: PropertyDef) -> Self {
        let value = FieldValue::empty_for(def.kind);
        Self { def, value }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Property name, with a trailing `*` when the property is required.
    pub fn label(&self) -> String {
        if self.def.required {
            format!("{}*", self.def.name)
        } else {
            self.def.name.clone()
        }
    }

    pub fn widget(&self) -> Widget {
        self.def.kind.into()
    }

    pub fn description_line(&self) -> String {
        if self.def.description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            format!("- {}", self.def.description)
        }
    }

    /// What this field puts into a record, if anything.
    fn contribution(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Checked(true) => Some(""),
            FieldValue::Checked(false) => None,
            FieldValue::Text(text) if text.is_empty() => None,
            FieldValue::Text(text) => Some(text.as_str()),
        }
    }
}

/// Entry form for one step type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    step_type: String,
    fields: Vec<FormField>,
    show_descriptions: bool,
}

impl Form {
    /// Build an empty form for `step_type` from the schema's merged properties.
    pub fn derive(schema: &impl SchemaProvider, step_type: &str, show_descriptions: bool) -> Self {
        let fields = schema
            .properties_for(step_type)
            .into_values()
            .map(FormField::new)
            .collect();
        Self {
            step_type: step_type.to_string(),
            fields,
            show_descriptions,
        }
    }

    /// Re-derive the form with descriptions shown or hidden, keeping entered values
    /// for properties that are still offered.
    pub fn set_show_descriptions(&mut self, schema: &impl SchemaProvider, show: bool) {
        let mut fresh = Form::derive(schema, &self.step_type, show);
        for field in &mut fresh.fields {
            if let Some(old) = self.field(field.name())
                && old.def.kind == field.def.kind
            {
                field.value = old.value.clone();
            }
        }
        *self = fresh;
    }

    pub fn step_type(&self) -> &str {
        &self.step_type
    }

    pub fn show_descriptions(&self) -> bool {
        self.show_descriptions
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name() == name)
    }

    /// Enter text for a text or rich-text property. Returns `false` and changes
    /// nothing when the name is unknown or names a toggle.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) if field.widget() != Widget::Toggle => {
                field.value = FieldValue::Text(value.into());
                true
            },
            _ => false,
        }
    }

    /// Check or uncheck a boolean property. Returns `false` for unknown or non-toggle names.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self.field_mut(name) {
            Some(field) if field.widget() == Widget::Toggle => {
                field.value = FieldValue::Checked(checked);
                true
            },
            _ => false,
        }
    }

    /// Build a record from the form.
    ///
    /// Global steps never carry an npc; every other step gets `npcname`, empty
    /// when nothing is selected.
    pub fn submit(&self, npcname: Option<&str>) -> StepRecord {
        let npcname = if self.step_type == GLOBAL_TYPE { None } else { npcname };
        let mut record = StepRecord::new(self.step_type.clone(), npcname);
        for field in &self.fields {
            if let Some(value) = field.contribution() {
                record.insert(field.name(), value);
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_data::Protocol;

    fn protocol() -> Protocol {
        Protocol::from_json_str(
            r#"{
                "types": {
                    "ANY": {
                        "wait": { "type": 0 },
                        "title": { "type": 0, "required": true, "description": "Journal heading" },
                        "about": { "type": 2 },
                        "postmessage": { "type": 0 }
                    },
                    "INFO": { "silent": { "type": 1 } },
                    "GLOBAL": { "flag": { "type": 1 } }
                },
                "npcnames": { "guard1": { "name": "Guard" } }
            }"#,
        )
        .expect("protocol parses")
    }

    #[test]
    fn widgets_and_labels_follow_schema() {
        let form = Form::derive(&protocol(), "INFO", true);
        let summary: Vec<_> = form.fields().iter().map(|f| (f.label(), f.widget())).collect();
        assert_eq!(
            summary,
            [
                ("wait".to_string(), Widget::TextField),
                ("title*".to_string(), Widget::TextField),
                ("about".to_string(), Widget::RichTextField),
                ("postmessage".to_string(), Widget::TextField),
                ("silent".to_string(), Widget::Toggle),
            ]
        );
        assert_eq!(form.field("title").map(FormField::description_line).as_deref(), Some("- Journal heading"));
        assert_eq!(form.field("wait").map(FormField::description_line).as_deref(), Some(NO_DESCRIPTION));
    }

    #[test]
    fn global_form_has_only_its_own_fields() {
        let mut form = Form::derive(&protocol(), GLOBAL_TYPE, true);
        let names: Vec<_> = form.fields().iter().map(FormField::name).collect();
        assert_eq!(names, ["flag"]);
        assert_eq!(form.submit(Some("guard1")), StepRecord::new(GLOBAL_TYPE, None));

        form.set_checked("flag", true);
        assert_eq!(form.submit(Some("guard1")), StepRecord::new(GLOBAL_TYPE, None).with("flag", ""));
    }

    #[test]
    fn submission_keeps_only_filled_fields() {
        let mut form = Form::derive(&protocol(), "INFO", false);
        assert!(form.set_text("wait", "5"));
        assert!(form.set_text("title", "Go"));
        assert!(form.set_text("about", "Find the well"));
        assert!(form.set_checked("silent", false));

        let record = form.submit(Some("guard1"));
        assert_eq!(
            record,
            StepRecord::new("INFO", Some("guard1"))
                .with("wait", "5")
                .with("title", "Go")
                .with("about", "Find the well")
        );
    }

    #[test]
    fn unselected_npc_submits_empty_npcname() {
        let form = Form::derive(&protocol(), "INFO", false);
        let record = form.submit(None);
        assert_eq!(record.fields.get_index(0), Some((&"npcname".to_string(), &String::new())));
    }

    #[test]
    fn checked_boolean_contributes_empty_value() {
        let mut form = Form::derive(&protocol(), "INFO", false);
        form.set_checked("silent", true);
        let record = form.submit(Some("guard1"));
        assert_eq!(record.get("silent"), Some(""));
    }

    #[test]
    fn mismatched_edits_are_ignored() {
        let mut form = Form::derive(&protocol(), "INFO", false);
        assert!(!form.set_checked("title", true));
        assert!(!form.set_text("silent", "yes"));
        assert!(!form.set_text("missing", "x"));
        assert_eq!(form, Form::derive(&protocol(), "INFO", false));
    }

    #[test]
    fn toggling_descriptions_keeps_values() {
        let proto = protocol();
        let mut form = Form::derive(&proto, "INFO", true);
        form.set_text("title", "Go");
        form.set_checked("silent", true);
        form.set_show_descriptions(&proto, false);

        assert!(!form.show_descriptions());
        assert_eq!(form.field("title").map(|f| &f.value), Some(&FieldValue::Text("Go".into())));
        assert_eq!(form.field("silent").map(|f| &f.value), Some(&FieldValue::Checked(true)));
    }
}
