//! Editor session: the single owner of the step list and the entry form.
//!
//! Every mutation completes before the next one is accepted, and the view and
//! script are derived from the model afterwards rather than patched in place.

use log::{debug, info, warn};
use quest_data::{GLOBAL_TYPE, Protocol, SchemaProvider, StepRecord, missing_required};

use crate::form::{FieldValue, Form, Widget};
use crate::hook::{EditContext, ExternalEditor, UnconfiguredEditor};
use crate::serialize::compile_steps_to_script;
use crate::steps::StepList;
use crate::view::{StepRow, step_rows};

/// Outcome of asking the external editor to fill a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalEdit {
    Updated,
    Unchanged,
    /// The property is not a rich-text field of the current form.
    NotRichText,
}

pub struct QuestEditor {
    protocol: Protocol,
    steps: StepList,
    form: Form,
    selected_npc: Option<String>,
    external_editor: Box<dyn ExternalEditor>,
}

impl QuestEditor {
    /// Start a session with an empty step list and the `GLOBAL` type selected.
    pub fn new(protocol: Protocol) -> Self {
        let selected_npc = protocol.npcnames.keys().next().cloned();
        let form = Form::derive(&protocol, GLOBAL_TYPE, true);
        info!(
            "editor session started with {} step types and {} npcs",
            protocol.list_types().len(),
            protocol.npcnames.len()
        );
        Self {
            protocol,
            steps: StepList::new(),
            form,
            selected_npc,
            external_editor: Box::new(UnconfiguredEditor),
        }
    }

    /// Replace the rich-text editor hook.
    pub fn with_external_editor(mut self, editor: impl ExternalEditor + 'static) -> Self {
        self.external_editor = Box::new(editor);
        self
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn selected_type(&self) -> &str {
        self.form.step_type()
    }

    pub fn selected_npc(&self) -> Option<&str> {
        self.selected_npc.as_deref()
    }

    /// Switch the form to another step type, clearing entered values.
    ///
    /// Types that are not selectable (`ANY` or undeclared) are ignored.
    pub fn select_type(&mut self, step_type: &str) -> bool {
        if !self.protocol.list_types().iter().any(|t| t == step_type) {
            debug!("ignoring selection of unknown step type '{step_type}'");
            return false;
        }
        self.form = Form::derive(&self.protocol, step_type, self.form.show_descriptions());
        true
    }

    /// Select the npc new steps are addressed to. Unknown ids are ignored.
    pub fn select_npc(&mut self, npc: &str) -> bool {
        if !self.protocol.npcnames.contains_key(npc) {
            debug!("ignoring selection of unknown npc '{npc}'");
            return false;
        }
        self.selected_npc = Some(npc.to_string());
        true
    }

    /// Flip description visibility, keeping entered values. Returns the new state.
    pub fn toggle_descriptions(&mut self) -> bool {
        let show = !self.form.show_descriptions();
        self.form.set_show_descriptions(&self.protocol, show);
        show
    }

    pub fn set_text(&mut self, property: &str, value: impl Into<String>) -> bool {
        self.form.set_text(property, value)
    }

    pub fn set_checked(&mut self, property: &str, checked: bool) -> bool {
        self.form.set_checked(property, checked)
    }

    /// Hand a rich-text field to the external editor hook.
    pub fn open_external_editor(&mut self, property: &str) -> ExternalEdit {
        let Some(field) = self.form.field(property) else {
            return ExternalEdit::NotRichText;
        };
        if field.widget() != Widget::RichTextField {
            return ExternalEdit::NotRichText;
        }
        let current_value = match &field.value {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Checked(_) => String::new(),
        };
        let ctx = EditContext {
            step_type: self.form.step_type().to_string(),
            property: property.to_string(),
            current_value,
        };
        match self.external_editor.open(&ctx) {
            Some(value) => {
                self.form.set_text(property, value);
                ExternalEdit::Updated
            },
            None => ExternalEdit::Unchanged,
        }
    }

    /// Submit the form as a new last step and reset the form for the same type.
    ///
    /// Missing required properties are logged but do not block the step.
    pub fn add_step(&mut self) -> &StepRecord {
        let record = self.form.submit(self.selected_npc.as_deref());
        let ordinal = self.steps.len() + 1;
        for err in missing_required(&self.protocol, &record, &format!("step {ordinal}")) {
            warn!("{err}");
        }
        info!("step {ordinal} added ({})", record.step_type);
        self.steps.append(record);
        self.form = Form::derive(&self.protocol, self.form.step_type(), self.form.show_descriptions());
        self.script_changed();
        &self.steps.as_slice()[ordinal - 1]
    }

    /// Delete the step at a 0-based index. Out-of-range indices are ignored.
    pub fn delete_step(&mut self, index: usize) -> Option<StepRecord> {
        let removed = self.steps.delete_at(index);
        if removed.is_some() {
            info!("step {} deleted", index + 1);
            self.script_changed();
        }
        removed
    }

    pub fn move_step_up(&mut self, index: usize) -> bool {
        let moved = self.steps.move_up(index);
        if moved {
            self.script_changed();
        }
        moved
    }

    pub fn move_step_down(&mut self, index: usize) -> bool {
        let moved = self.steps.move_down(index);
        if moved {
            self.script_changed();
        }
        moved
    }

    pub fn rows(&self) -> Vec<StepRow> {
        step_rows(&self.protocol, &self.steps)
    }

    /// The compiled quest script for the current step list.
    pub fn script(&self) -> String {
        compile_steps_to_script(self.steps.iter())
    }

    fn script_changed(&self) {
        debug!("quest script regenerated:\n{}", self.script());
    }
}
