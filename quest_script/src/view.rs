//! Display rows for the step list, recomputed from the model after every change.

use std::fmt::Write;

use colored::Colorize;
use quest_data::{Protocol, StepRecord};

use crate::form::{FieldValue, Form, Widget};
use crate::steps::StepList;
use crate::style::EditorStyle;

/// One line of the steps panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub ordinal: usize,
    pub step_type: String,
    pub npc_id: Option<String>,
    pub npc_name: Option<String>,
    /// Type-specific summary; the wait time for `INFO` steps.
    pub data: String,
    pub title: String,
    pub about: String,
    pub postmessage: Option<String>,
}

impl StepRow {
    pub fn from_record(protocol: &Protocol, ordinal: usize, record: &StepRecord) -> Self {
        let npc_id = record.npcname().map(str::to_string);
        let npc_name = record
            .npcname()
            .map(|id| protocol.npc_display_name(id).unwrap_or(id).to_string());
        let data = match record.step_type.as_str() {
            "INFO" => format!("{} s.", record.get("wait").unwrap_or_default()),
            _ => String::new(),
        };
        Self {
            ordinal,
            step_type: record.step_type.clone(),
            npc_id,
            npc_name,
            data,
            title: record.title().unwrap_or_default().to_string(),
            about: record.about().unwrap_or_default().to_string(),
            postmessage: record.postmessage().map(str::to_string),
        }
    }

    /// Heading in the `"<n>. <TYPE>"` form used by the steps panel.
    pub fn heading(&self) -> String {
        format!("{}. {}", self.ordinal, self.step_type)
    }
}

/// Project the whole list into rows with ordinals `1..=n`.
pub fn step_rows(protocol: &Protocol, steps: &StepList) -> Vec<StepRow> {
    steps
        .iter()
        .enumerate()
        .map(|(idx, record)| StepRow::from_record(protocol, idx + 1, record))
        .collect()
}

/// Render the steps panel for the terminal.
pub fn render_rows(rows: &[StepRow]) -> String {
    if rows.is_empty() {
        return "(no steps yet)".dimmed().to_string();
    }
    let mut out = String::new();
    for row in rows {
        let _ = write!(out, "{}", row.heading().as_str().heading_style());
        if let Some(name) = &row.npc_name {
            let _ = write!(out, "  {}", name.as_str().npc_style());
        }
        if !row.data.is_empty() {
            let _ = write!(out, "  [{}]", row.data);
        }
        out.push('\n');
        if !row.title.is_empty() {
            let _ = writeln!(out, "    {}", row.title.bold());
        }
        if !row.about.is_empty() {
            let _ = writeln!(out, "    {}", row.about);
        }
        if let Some(post) = &row.postmessage {
            let _ = writeln!(out, "    {}", post.italic());
        }
    }
    out
}

/// Render the property-entry form for the terminal.
pub fn render_form(form: &Form) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Properties for {}", form.step_type()).as_str().subheading_style());
    if form.fields().is_empty() {
        let _ = writeln!(out, "  {}", "(none)".dimmed());
    }
    for field in form.fields() {
        let value = match (&field.value, field.widget()) {
            (FieldValue::Checked(true), _) => "[x]".to_string(),
            (FieldValue::Checked(false), _) => "[ ]".to_string(),
            (FieldValue::Text(text), Widget::RichTextField) => format!("\"{text}\" (...)"),
            (FieldValue::Text(text), _) => format!("\"{text}\""),
        };
        let _ = writeln!(out, "  {:<20} {}", field.label(), value);
        if form.show_descriptions() {
            let _ = writeln!(out, "      {}", field.description_line().as_str().description_style());
        }
    }
    out
}
