//! Read-eval-print loop driving an editor session from the terminal.

use std::fmt::Write;

use anyhow::Result;
use colored::Colorize;
use log::info;
use quest_data::{SchemaProvider, validate_steps};

use crate::command::{Command, parse_command};
use crate::editor::{ExternalEdit, QuestEditor};
use crate::input::{InputEvent, InputManager};
use crate::style::EditorStyle;
use crate::view::{render_form, render_rows};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

const HELP: &str = "\
types                 list step types
npcs                  list npcs
type <TYPE>           select the step type for the next step
npc <id>              select the npc for the next step
set <prop> <value>    fill a text property (no value clears it)
clear <prop>          clear a text property
check|uncheck <prop>  toggle a boolean property
edit <prop>           open a rich-text property in the external editor
form                  show the entry form
descriptions          show/hide property descriptions
add                   append the form as a new step
list                  show the steps
up|down|del <n>       move or delete step n
script                print the quest script
lint                  check steps against the protocol
quit                  leave the editor";

/// Run the loop until the user quits or input ends.
///
/// # Errors
/// - Propagates failures reading from the terminal.
pub fn run_repl(editor: &mut QuestEditor) -> Result<()> {
    let mut input = InputManager::new();
    println!("{}", render_form(editor.form()));
    loop {
        let prompt = format!("[{} | {} steps]> ", editor.selected_type(), editor.steps().len());
        let line = match input.read_line(&prompt.as_str().prompt_style().to_string())? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                println!("Command canceled.");
                continue;
            },
        };
        if line.trim().is_empty() {
            continue;
        }
        let (control, output) = handle_command(editor, &parse_command(&line));
        if !output.is_empty() {
            println!("{}", output.trim_end());
        }
        if control == ReplControl::Quit {
            break;
        }
    }
    info!("editor session closed with {} steps", editor.steps().len());
    Ok(())
}

/// Apply one command to the session and return the text to show.
pub fn handle_command(editor: &mut QuestEditor, command: &Command) -> (ReplControl, String) {
    let mut out = String::new();
    match command {
        Command::Types => {
            for step_type in editor.protocol().list_types() {
                let _ = writeln!(out, "{step_type}");
            }
        },
        Command::Npcs => {
            for (id, name) in editor.protocol().list_npcs() {
                let _ = writeln!(out, "{id:<16} {}", name.as_str().npc_style());
            }
        },
        Command::SelectType(step_type) => {
            if editor.select_type(step_type) {
                out.push_str(&render_form(editor.form()));
            } else {
                out = rejected(&format!("unknown step type '{step_type}'"));
            }
        },
        Command::SelectNpc(npc) => {
            if !editor.select_npc(npc) {
                out = rejected(&format!("unknown npc '{npc}'"));
            }
        },
        Command::SetText { property, value } => {
            if !editor.set_text(property, value.as_str()) {
                out = rejected(&format!("'{property}' is not a text property of this form"));
            }
        },
        Command::Check(property) | Command::Uncheck(property) => {
            let checked = matches!(command, Command::Check(_));
            if !editor.set_checked(property, checked) {
                out = rejected(&format!("'{property}' is not a boolean property of this form"));
            }
        },
        Command::Edit(property) => match editor.open_external_editor(property) {
            ExternalEdit::Updated => out.push_str(&render_form(editor.form())),
            ExternalEdit::Unchanged => out.push_str("No external editor is configured."),
            ExternalEdit::NotRichText => {
                out = rejected(&format!("'{property}' is not a rich-text property of this form"));
            },
        },
        Command::ShowForm => out.push_str(&render_form(editor.form())),
        Command::ToggleDescriptions => {
            editor.toggle_descriptions();
            out.push_str(&render_form(editor.form()));
        },
        Command::Add => {
            editor.add_step();
            out.push_str(&render_rows(&editor.rows()));
        },
        Command::List => out.push_str(&render_rows(&editor.rows())),
        Command::MoveUp(n) => {
            if let Some(index) = n.checked_sub(1) {
                editor.move_step_up(index);
            }
            out.push_str(&render_rows(&editor.rows()));
        },
        Command::MoveDown(n) => {
            if let Some(index) = n.checked_sub(1) {
                editor.move_step_down(index);
            }
            out.push_str(&render_rows(&editor.rows()));
        },
        Command::Delete(n) => {
            if let Some(index) = n.checked_sub(1) {
                editor.delete_step(index);
            }
            out.push_str(&render_rows(&editor.rows()));
        },
        Command::Script => out.push_str(&editor.script().as_str().script_style().to_string()),
        Command::Lint => {
            let errors = validate_steps(editor.protocol(), editor.steps().as_slice());
            if errors.is_empty() {
                out.push_str("lint: OK");
            }
            for err in errors {
                let _ = writeln!(out, "{}", err.to_string().as_str().error_style());
            }
        },
        Command::Help => out.push_str(HELP),
        Command::Quit => return (ReplControl::Quit, out),
        Command::Unknown(input) => {
            out = format!("{} (type {} for commands)", rejected(&format!("unknown command '{input}'")), "help".bold());
        },
    }
    (ReplControl::Continue, out)
}

fn rejected(msg: &str) -> String {
    msg.error_style().to_string()
}
