//! Compiler from step records to quest script text.
//!
//! ```text
//! task:<type>
//! <key>[:<value>]
//! endtask
//! ```
//!
//! Global steps drop the `task:`/`endtask` wrapper. Every step in the
//! concatenated script is preceded by a newline, so steps are separated by a
//! blank line.

use std::fmt::Write;

use quest_data::StepRecord;

/// Compile a single step, including its trailing newline.
pub fn compile_step(record: &StepRecord) -> String {
    let mut out = String::new();
    if !record.is_global() {
        let _ = writeln!(out, "task:{}", record.step_type);
    }
    for (key, value) in &record.fields {
        if value.is_empty() {
            let _ = writeln!(out, "{key}");
        } else {
            let _ = writeln!(out, "{key}:{value}");
        }
    }
    if !record.is_global() {
        out.push_str("endtask\n");
    }
    out
}

/// Compile a whole step sequence in order.
pub fn compile_steps_to_script<'a>(steps: impl IntoIterator<Item = &'a StepRecord>) -> String {
    let mut out = String::new();
    for step in steps {
        out.push('\n');
        out.push_str(&compile_step(step));
    }
    out
}
