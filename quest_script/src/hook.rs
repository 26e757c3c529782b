//! Pluggable external editor for rich-text properties.

use log::warn;

/// Identifies the property being edited and what it currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditContext {
    pub step_type: String,
    pub property: String,
    pub current_value: String,
}

/// Something that can edit a rich-text value out of band.
///
/// Returning `Some` replaces the field's value; `None` leaves it untouched.
pub trait ExternalEditor {
    fn open(&mut self, ctx: &EditContext) -> Option<String>;
}

/// Default hook: reports that no editor has been configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredEditor;

impl ExternalEditor for UnconfiguredEditor {
    fn open(&mut self, ctx: &EditContext) -> Option<String> {
        warn!(
            "no external editor configured; cannot edit '{}' of {} step",
            ctx.property, ctx.step_type
        );
        None
    }
}

impl<F> ExternalEditor for F
where
    F: FnMut(&EditContext) -> Option<String>,
{
    fn open(&mut self, ctx: &EditContext) -> Option<String> {
        self(ctx)
    }
}
