#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! quest_script: quest step editor and script compiler.
//!
//! A session ([`QuestEditor`]) holds an ordered [`StepList`], derives an entry
//! [`Form`] from the protocol's merged properties for the selected step type,
//! and compiles the list into the `task:`/`endtask` quest script:
//!
//! ```
//! use quest_data::Protocol;
//! use quest_script::QuestEditor;
//!
//! let protocol = Protocol::from_json_str(
//!     r#"{"types": {"ANY": {"title": {"type": 0}}, "GLOBAL": {"flag": {"type": 1}}, "INFO": {}},
//!         "npcnames": {"guard1": {"name": "Guard"}}}"#,
//! )
//! .unwrap();
//! let mut editor = QuestEditor::new(protocol);
//! editor.select_type("INFO");
//! editor.set_text("title", "Go");
//! editor.add_step();
//! assert_eq!(editor.script(), "\ntask:INFO\nnpcname:guard1\ntitle:Go\nendtask\n");
//! ```

pub const QUEST_SCRIPT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod command;
pub mod editor;
pub mod form;
pub mod hook;
mod input;
pub mod loader;
pub mod repl;
pub mod serialize;
pub mod steps;
pub mod style;
pub mod view;

pub use editor::{ExternalEdit, QuestEditor};
pub use form::{FieldValue, Form, FormField, Widget};
pub use hook::{EditContext, ExternalEditor, UnconfiguredEditor};
pub use loader::{load_protocol, resolve_protocol_path};
pub use repl::run_repl;
pub use serialize::{compile_step, compile_steps_to_script};
pub use steps::StepList;
pub use view::{StepRow, step_rows};
