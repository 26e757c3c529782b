//! Schema provider contract and the property merge every non-global step uses.

use std::path::Path;

use thiserror::Error;

use crate::defs::{ANY_TYPE, GLOBAL_TYPE, Id, NpcCatalog, PropertyMap, Protocol};

/// Errors raised while decoding a protocol document.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid protocol JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid protocol TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Read-only access to the step types and npcs an editor works against.
pub trait SchemaProvider {
    /// Selectable step types in declaration order, `ANY` excluded.
    fn list_types(&self) -> Vec<Id>;

    fn list_npcs(&self) -> &NpcCatalog;

    /// Property set offered for `step_type`.
    ///
    /// `GLOBAL` gets only its own entries (empty when it declares none). Every
    /// other type gets the `ANY` properties with its own entries merged over
    /// them by name.
    fn properties_for(&self, step_type: &str) -> PropertyMap;
}

/// Right-biased shallow merge keyed by property name.
///
/// Entries from `base` keep their position; an `overlay` entry with the same
/// name replaces the value in place, and new names are appended in order.
pub fn merge_properties(base: &PropertyMap, overlay: &PropertyMap) -> PropertyMap {
    let mut merged = base.clone();
    for (name, def) in overlay {
        merged.insert(name.clone(), def.clone());
    }
    merged
}

impl SchemaProvider for Protocol {
    fn list_types(&self) -> Vec<Id> {
        self.types.keys().filter(|id| id.as_str() != ANY_TYPE).cloned().collect()
    }

    fn list_npcs(&self) -> &NpcCatalog {
        &self.npcnames
    }

    fn properties_for(&self, step_type: &str) -> PropertyMap {
        let empty = PropertyMap::new();
        let own = self.types.get(step_type).unwrap_or(&empty);
        if step_type == GLOBAL_TYPE {
            return own.clone();
        }
        let any = self.types.get(ANY_TYPE).unwrap_or(&empty);
        merge_properties(any, own)
    }
}

impl Protocol {
    /// Decode a protocol from its JSON form.
    ///
    /// ```
    /// use quest_data::{Protocol, SchemaProvider};
    ///
    /// let protocol = Protocol::from_json_str(
    ///     r#"{"types": {"ANY": {"title": {"type": 0}}, "INFO": {"wait": {"type": 0}}, "GLOBAL": {}},
    ///         "npcnames": {"guard1": {"name": "Guard"}}}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(protocol.list_types(), ["INFO", "GLOBAL"]);
    /// assert_eq!(protocol.properties_for("INFO").len(), 2);
    /// assert!(protocol.properties_for("GLOBAL").is_empty());
    /// ```
    pub fn from_json_str(src: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ProtocolError> {
        Ok(toml::from_str(src)?)
    }

    /// Decode by file extension: `.toml` as TOML, anything else as JSON.
    pub fn from_str_for_path(path: &Path, src: &str) -> Result<Self, ProtocolError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(src),
            _ => Self::from_json_str(src),
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::defs::{PropertyDef, PropertyKind};

    fn props(defs: &[PropertyDef]) -> PropertyMap {
        defs.iter().map(|d| (d.name.clone(), d.clone())).collect()
    }

    fn protocol() -> Protocol {
        let mut types = IndexMap::new();
        types.insert(
            ANY_TYPE.to_string(),
            props(&[
                PropertyDef::new("title", PropertyKind::Text).required(),
                PropertyDef::new("about", PropertyKind::RichText),
                PropertyDef::new("postmessage", PropertyKind::Text),
            ]),
        );
        types.insert(
            "INFO".to_string(),
            props(&[
                PropertyDef::new("wait", PropertyKind::Text).required(),
                PropertyDef::new("about", PropertyKind::Text).with_description("shown in the journal"),
            ]),
        );
        types.insert(GLOBAL_TYPE.to_string(), props(&[PropertyDef::new("flag", PropertyKind::Boolean)]));
        types.insert("KILL".to_string(), PropertyMap::new());
        Protocol::new(types, NpcCatalog::new())
    }

    #[test]
    fn any_is_not_listed() {
        assert_eq!(protocol().list_types(), ["INFO", "GLOBAL", "KILL"]);
    }

    #[test]
    fn global_is_not_merged_with_any() {
        let merged = protocol().properties_for(GLOBAL_TYPE);
        assert_eq!(merged.keys().collect::<Vec<_>>(), ["flag"]);
    }

    #[test]
    fn undeclared_global_has_no_properties() {
        let proto = Protocol::from_json_str(r#"{"types": {"ANY": {"title": {"type": 0}}}}"#).expect("parses");
        assert!(proto.properties_for(GLOBAL_TYPE).is_empty());
    }

    #[test]
    fn own_entries_override_any_in_place() {
        let merged = protocol().properties_for("INFO");
        let names: Vec<_> = merged.keys().map(String::as_str).collect();
        assert_eq!(names, ["title", "about", "postmessage", "wait"]);
        assert_eq!(merged["about"].kind, PropertyKind::Text);
        assert_eq!(merged["about"].description, "shown in the journal");
        assert!(merged["title"].required);
    }

    #[test]
    fn type_without_own_entries_gets_any() {
        let proto = protocol();
        assert_eq!(proto.properties_for("KILL"), proto.types[ANY_TYPE]);
        assert_eq!(proto.properties_for("UNKNOWN"), proto.types[ANY_TYPE]);
    }

    #[test]
    fn toml_protocol_decodes() {
        let src = r#"
[types.ANY.title]
type = 0
required = true

[types.INFO.wait]
type = 0

[types.GLOBAL]

[npcnames.guard1]
name = "Guard"
"#;
        let proto = Protocol::from_toml_str(src).expect("toml protocol");
        assert_eq!(proto.list_types(), ["INFO", "GLOBAL"]);
        assert!(proto.properties_for("INFO")["title"].required);
        assert_eq!(proto.npc_display_name("guard1"), Some("Guard"));
    }
}
