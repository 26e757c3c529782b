//! Commands understood by the editor REPL.

/// Command words offered for completion.
pub const COMMAND_WORDS: &[&str] = &[
    "types",
    "npcs",
    "type",
    "npc",
    "set",
    "clear",
    "check",
    "uncheck",
    "edit",
    "form",
    "descriptions",
    "add",
    "list",
    "up",
    "down",
    "del",
    "script",
    "lint",
    "help",
    "quit",
];

/// A parsed editor command. Step numbers are the 1-based ordinals shown in `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Types,
    Npcs,
    SelectType(String),
    SelectNpc(String),
    SetText { property: String, value: String },
    Check(String),
    Uncheck(String),
    Edit(String),
    ShowForm,
    ToggleDescriptions,
    Add,
    List,
    MoveUp(usize),
    MoveDown(usize),
    Delete(usize),
    Script,
    Lint,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one input line. Values for `set` keep their inner spacing.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (word, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let rest = rest.trim_start();
    let args: Vec<&str> = rest.split_whitespace().collect();

    match (word, args.as_slice()) {
        ("types", []) => Command::Types,
        ("npcs", []) => Command::Npcs,
        ("type", [step_type]) => Command::SelectType((*step_type).to_string()),
        ("npc", [npc]) => Command::SelectNpc((*npc).to_string()),
        ("set", [property, ..]) => {
            let value = rest[property.len()..].trim_start();
            Command::SetText {
                property: (*property).to_string(),
                value: value.to_string(),
            }
        },
        ("clear", [property]) => Command::SetText {
            property: (*property).to_string(),
            value: String::new(),
        },
        ("check", [property]) => Command::Check((*property).to_string()),
        ("uncheck", [property]) => Command::Uncheck((*property).to_string()),
        ("edit", [property]) => Command::Edit((*property).to_string()),
        ("form", []) => Command::ShowForm,
        ("descriptions", []) => Command::ToggleDescriptions,
        ("add", []) => Command::Add,
        ("list", []) => Command::List,
        ("up", [n]) => ordinal(n).map_or_else(|| Command::Unknown(input.to_string()), Command::MoveUp),
        ("down", [n]) => ordinal(n).map_or_else(|| Command::Unknown(input.to_string()), Command::MoveDown),
        ("del" | "delete", [n]) => ordinal(n).map_or_else(|| Command::Unknown(input.to_string()), Command::Delete),
        ("script", []) => Command::Script,
        ("lint", []) => Command::Lint,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

fn ordinal(arg: &str) -> Option<usize> {
    arg.parse().ok().filter(|n| *n > 0)
}
