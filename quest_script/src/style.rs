//! Styling helpers for terminal output.
//!
//! The [`EditorStyle`] trait wraps the `colored` crate so plain string slices
//! can be styled directly.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to editor output.
pub trait EditorStyle {
    fn heading_style(&self) -> ColoredString;
    fn npc_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn script_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
}

impl EditorStyle for &str {
    fn heading_style(&self) -> ColoredString {
        self.bold().truecolor(223, 77, 10)
    }
    fn npc_style(&self) -> ColoredString {
        self.truecolor(13, 130, 60).italic()
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
    fn description_style(&self) -> ColoredString {
        self.italic().truecolor(136, 136, 136)
    }
    fn script_style(&self) -> ColoredString {
        self.truecolor(75, 180, 255)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(75, 80, 75).bold()
    }
}
