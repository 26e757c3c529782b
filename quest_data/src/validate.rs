use std::fmt;

use crate::*;

/// Advisory problems found in a protocol or in authored steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingType { id: &'static str },
    UnknownType { id: String, context: String },
    UnknownNpc { id: String, context: String },
    MissingRequired { property: String, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingType { id } => {
                write!(f, "protocol has no '{id}' type")
            },
            ValidationError::UnknownType { id, context } => {
                write!(f, "unknown step type '{id}' ({context})")
            },
            ValidationError::UnknownNpc { id, context } => {
                write!(f, "unknown npc '{id}' ({context})")
            },
            ValidationError::MissingRequired { property, context } => {
                write!(f, "required property '{property}' missing ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check that the distinguished `ANY` and `GLOBAL` types are declared.
pub fn validate_protocol(protocol: &Protocol) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for id in [ANY_TYPE, GLOBAL_TYPE] {
        if !protocol.types.contains_key(id) {
            errors.push(ValidationError::MissingType { id });
        }
    }
    errors
}

/// Required properties of the record's merged property set that the record lacks.
///
/// ```
/// use quest_data::{Protocol, StepRecord, missing_required};
///
/// let protocol = Protocol::from_json_str(
///     r#"{"types": {"ANY": {"title": {"type": 0, "required": true}}, "INFO": {}}}"#,
/// )
/// .unwrap();
/// let record = StepRecord::new("INFO", Some("guard1"));
/// assert_eq!(missing_required(&protocol, &record, "step 1").len(), 1);
/// ```
pub fn missing_required(schema: &impl SchemaProvider, record: &StepRecord, context: &str) -> Vec<ValidationError> {
    schema
        .properties_for(&record.step_type)
        .values()
        .filter(|def| def.required && !record.has(&def.name))
        .map(|def| ValidationError::MissingRequired {
            property: def.name.clone(),
            context: context.to_string(),
        })
        .collect()
}

/// Check every step against the protocol: known type, known npc, required properties.
pub fn validate_steps(protocol: &Protocol, steps: &[StepRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (idx, step) in steps.iter().enumerate() {
        let context = format!("step {} ({})", idx + 1, step.step_type);
        if step.step_type == ANY_TYPE || !protocol.types.contains_key(&step.step_type) {
            errors.push(ValidationError::UnknownType {
                id: step.step_type.clone(),
                context: context.clone(),
            });
        }
        if let Some(npc) = step.npcname()
            && !protocol.npcnames.contains_key(npc)
        {
            errors.push(ValidationError::UnknownNpc {
                id: npc.to_string(),
                context: context.clone(),
            });
        }
        errors.extend(missing_required(protocol, step, &context));
    }
    errors
}
