use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

/// Stable identifier used for step types, npcs and property names.
pub type Id = String;

/// Step type whose properties are shared by every non-global step.
pub const ANY_TYPE: &str = "ANY";
/// Pseudo-type for steps without an npc and without a `task:`/`endtask` wrapper.
pub const GLOBAL_TYPE: &str = "GLOBAL";
/// Record key holding the npc a step is addressed to.
pub const NPCNAME_KEY: &str = "npcname";

/// Property metadata keyed by property name, in protocol order.
pub type PropertyMap = IndexMap<Id, PropertyDef>;

/// Npc id to display name, in protocol order.
pub type NpcCatalog = IndexMap<Id, String>;

/// Which kind of input a property takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "KindCode", into = "u8")]
pub enum PropertyKind {
    /// Present-or-absent flag; serialized as a bare key.
    Boolean,
    #[default]
    Text,
    /// Long text that can be handed to an external editor.
    RichText,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Boolean => "boolean",
            PropertyKind::Text => "text",
            PropertyKind::RichText => "richtext",
        }
    }
}

impl From<u8> for PropertyKind {
    fn from(code: u8) -> Self {
        match code {
            1 => PropertyKind::Boolean,
            2 => PropertyKind::RichText,
            _ => PropertyKind::Text,
        }
    }
}

impl From<PropertyKind> for u8 {
    fn from(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::Text => 0,
            PropertyKind::Boolean => 1,
            PropertyKind::RichText => 2,
        }
    }
}

/// Wire shapes accepted for a property kind. Anything unrecognized reads as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum KindCode {
    Code(u64),
    Name(String),
    Other(serde::de::IgnoredAny),
}

impl From<KindCode> for PropertyKind {
    fn from(code: KindCode) -> Self {
        match code {
            KindCode::Code(n) => u8::try_from(n).map_or(PropertyKind::Text, PropertyKind::from),
            KindCode::Name(name) => match name.to_ascii_lowercase().as_str() {
                "boolean" | "bool" | "checkbox" => PropertyKind::Boolean,
                "richtext" | "rich_text" | "rich-text" => PropertyKind::RichText,
                _ => PropertyKind::Text,
            },
            KindCode::Other(_) => PropertyKind::Text,
        }
    }
}

/// Metadata for a single step property.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Filled in from the key the property was declared under.
    #[serde(skip)]
    pub name: Id,
    #[serde(rename = "type", default)]
    pub kind: PropertyKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

impl PropertyDef {
    pub fn new(name: impl Into<Id>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: String::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The catalog of step types and npcs an editor session works against.
///
/// Decoded permissively: property entries that are not objects, and npc
/// entries without a usable name, are skipped or defaulted with a warning
/// rather than failing the whole protocol.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawProtocol")]
pub struct Protocol {
    pub types: IndexMap<Id, PropertyMap>,
    pub npcnames: NpcCatalog,
}

/// First-stage shape of a protocol file before entries are checked.
#[derive(Debug, Default, Deserialize)]
struct RawProtocol {
    #[serde(default)]
    types: IndexMap<Id, serde_json::Value>,
    #[serde(default)]
    npcnames: IndexMap<Id, serde_json::Value>,
}

impl From<RawProtocol> for Protocol {
    fn from(raw: RawProtocol) -> Self {
        let mut types = IndexMap::new();
        for (type_id, props) in raw.types {
            let serde_json::Value::Object(props) = props else {
                warn!("protocol type '{type_id}' is not a property table; treating it as empty");
                types.insert(type_id, PropertyMap::new());
                continue;
            };
            let mut map = PropertyMap::new();
            for (name, value) in props {
                match serde_json::from_value::<PropertyDef>(value) {
                    Ok(mut def) => {
                        def.name = name.clone();
                        map.insert(name, def);
                    },
                    Err(err) => warn!("skipping malformed property '{name}' of type '{type_id}': {err}"),
                }
            }
            types.insert(type_id, map);
        }

        let npcnames = raw
            .npcnames
            .into_iter()
            .map(|(id, value)| {
                let name = match value {
                    serde_json::Value::String(name) => name,
                    serde_json::Value::Object(mut obj) => match obj.remove("name") {
                        Some(serde_json::Value::String(name)) => name,
                        _ => id.clone(),
                    },
                    _ => id.clone(),
                };
                (id, name)
            })
            .collect();

        Protocol { types, npcnames }
    }
}

impl Protocol {
    /// Build a protocol from already-typed parts, keying property names from the maps.
    pub fn new(types: IndexMap<Id, PropertyMap>, npcnames: NpcCatalog) -> Self {
        let types = types
            .into_iter()
            .map(|(type_id, props)| {
                let props = props
                    .into_iter()
                    .map(|(name, mut def)| {
                        def.name = name.clone();
                        (name, def)
                    })
                    .collect();
                (type_id, props)
            })
            .collect();
        Self { types, npcnames }
    }

    /// Display name for an npc id, if the catalog knows it.
    pub fn npc_display_name(&self, id: &str) -> Option<&str> {
        self.npcnames.get(id).map(String::as_str)
    }
}

/// One authored quest step.
///
/// `fields` keeps insertion order, which is also the order the script
/// compiler emits them in. For non-global steps `npcname` is the first field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StepRecord {
    #[serde(rename = "type")]
    pub step_type: Id,
    #[serde(flatten)]
    pub fields: IndexMap<String, String>,
}

impl StepRecord {
    /// Start a record for `step_type`.
    ///
    /// The npc is dropped entirely for global steps. Every other step carries
    /// `npcname`, empty when no npc was selected.
    pub fn new(step_type: impl Into<Id>, npcname: Option<&str>) -> Self {
        let step_type = step_type.into();
        let mut fields = IndexMap::new();
        if step_type != GLOBAL_TYPE {
            fields.insert(NPCNAME_KEY.to_string(), npcname.unwrap_or_default().to_string());
        }
        Self { step_type, fields }
    }

    pub fn is_global(&self) -> bool {
        self.step_type == GLOBAL_TYPE
    }

    /// Set a field, keeping its original position if it was already present.
    ///
    /// The `type` key is reserved for the step header and is ignored here.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key == "type" {
            return;
        }
        self.fields.insert(key, value.into());
    }

    /// Builder-style variant of [`StepRecord::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn npcname(&self) -> Option<&str> {
        self.get(NPCNAME_KEY)
    }

    /// Wait time in seconds, when present and numeric.
    pub fn wait(&self) -> Option<f64> {
        self.get("wait").and_then(|w| w.trim().parse().ok())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn about(&self) -> Option<&str> {
        self.get("about")
    }

    pub fn postmessage(&self) -> Option<&str> {
        self.get("postmessage")
    }
}
