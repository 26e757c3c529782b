//! Locating and loading the protocol file a session is built from.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use quest_data::{Protocol, validate_protocol};

/// Environment variable naming the protocol file.
pub const PROTOCOL_ENV: &str = "QUEST_PROTOCOL";

/// Pick the protocol path: explicit argument first, then the environment, then
/// the first existing default location.
pub fn resolve_protocol_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = env::var(PROTOCOL_ENV)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    detect_protocol_path()
}

/// Resolve the most likely location of a protocol file.
fn detect_protocol_path() -> PathBuf {
    let mut candidates = vec![
        PathBuf::from("protocol.json"),
        PathBuf::from("protocol.toml"),
        PathBuf::from("data/protocol.json"),
    ];

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("protocol.json"));
        candidates.push(dir.join("data/protocol.json"));
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from("protocol.json"))
}

/// Read and decode a protocol file, warning about structural gaps.
///
/// # Errors
/// Fails when the file cannot be read or decoded, or declares no step types at all.
pub fn load_protocol(path: &Path) -> Result<Protocol> {
    let src = fs::read_to_string(path).with_context(|| format!("reading protocol from '{}'", path.display()))?;
    let protocol = Protocol::from_str_for_path(path, &src)
        .with_context(|| format!("decoding protocol from '{}'", path.display()))?;
    if protocol.types.is_empty() {
        bail!("protocol '{}' declares no step types", path.display());
    }
    for err in validate_protocol(&protocol) {
        warn!("{}: {err}", path.display());
    }
    info!(
        "{} step types and {} npcs loaded from {:?}",
        protocol.types.len(),
        protocol.npcnames.len(),
        path
    );
    Ok(protocol)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use quest_data::SchemaProvider;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = resolve_protocol_path(Some(Path::new("custom/quests.json")));
        assert_eq!(path, PathBuf::from("custom/quests.json"));
    }

    #[test]
    fn loads_json_protocol() {
        let mut file = NamedTempFile::with_suffix(".json").expect("temp file");
        write!(file, r#"{{"types": {{"ANY": {{}}, "GLOBAL": {{}}, "INFO": {{}}}}}}"#).expect("write");
        let protocol = load_protocol(file.path()).expect("protocol loads");
        assert_eq!(protocol.list_types(), ["GLOBAL", "INFO"]);
    }

    #[test]
    fn loads_toml_protocol() {
        let mut file = NamedTempFile::with_suffix(".toml").expect("temp file");
        writeln!(file, "[types.GLOBAL]\n[npcnames]\nguard1 = \"Guard\"").expect("write");
        let protocol = load_protocol(file.path()).expect("protocol loads");
        assert_eq!(protocol.npc_display_name("guard1"), Some("Guard"));
    }

    #[test]
    fn empty_protocol_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".json").expect("temp file");
        write!(file, "{{}}").expect("write");
        assert!(load_protocol(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_protocol(Path::new("definitely/not/here.json")).is_err());
    }
}
