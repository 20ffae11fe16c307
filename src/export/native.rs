//! Native persistence: the compound as a tagged JSON document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bridge::Compound;
use crate::error::{ExportError, Result};
use crate::operations::query::IsValid;

const FORMAT_TAG: &str = "steelspan-native";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    format: &'a str,
    version: u32,
    compound: &'a Compound,
}

#[derive(Deserialize)]
struct Document {
    format: String,
    version: u32,
    compound: Compound,
}

/// Serialises `compound` with member placements and cell decompositions.
///
/// # Errors
///
/// Returns [`ExportError::Format`] if serialisation fails.
pub fn render_native(compound: &Compound) -> Result<String> {
    let document = DocumentRef {
        format: FORMAT_TAG,
        version: FORMAT_VERSION,
        compound,
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| ExportError::Format(e.to_string()).into())
}

/// Parses a native document and checks every member solid.
///
/// # Errors
///
/// Returns [`ExportError::Format`] for malformed JSON, a foreign format tag,
/// an unsupported version, or an invalid member solid.
pub fn parse_native(text: &str) -> Result<Compound> {
    let document: Document =
        serde_json::from_str(text).map_err(|e| ExportError::Format(e.to_string()))?;

    if document.format != FORMAT_TAG {
        return Err(ExportError::Format(format!(
            "unexpected format tag {:?}",
            document.format
        ))
        .into());
    }
    if document.version != FORMAT_VERSION {
        return Err(ExportError::Format(format!(
            "unsupported native format version {}",
            document.version
        ))
        .into());
    }
    if let Some(member) = document
        .compound
        .members()
        .iter()
        .find(|m| !IsValid::new(&m.solid).execute())
    {
        return Err(ExportError::Format(format!("{} is not a valid solid", member.label)).into());
    }
    Ok(document.compound)
}

/// Reads a native file written by [`super::export_compound`].
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read, otherwise see
/// [`parse_native`].
pub fn read_native(path: impl AsRef<Path>) -> Result<Compound> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_native(&text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::bridge::{BridgeAssembly, BridgeParams};
    use crate::error::SteelspanError;

    #[test]
    fn bridge_survives_a_round_trip() {
        let mut assembly = BridgeAssembly::new(BridgeParams::default());
        let compound = assembly.build().unwrap();
        let text = render_native(compound).unwrap();
        let restored = parse_native(&text).unwrap();

        assert_eq!(restored.len(), compound.len());
        assert_relative_eq!(
            restored.volume().unwrap(),
            compound.volume().unwrap(),
            max_relative = 1e-9
        );
        let labels: Vec<_> = restored.members().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            ["girder 1", "girder 2", "girder 3", "deck", "parapet (left)", "parapet (right)"]
        );
    }

    #[test]
    fn foreign_tag_is_rejected() {
        let text = r#"{ "format": "other", "version": 1, "compound": { "members": [] } }"#;
        assert!(matches!(
            parse_native(text),
            Err(SteelspanError::Export(ExportError::Format(_)))
        ));
    }

    #[test]
    fn newer_version_is_rejected() {
        let text = r#"{ "format": "steelspan-native", "version": 2, "compound": { "members": [] } }"#;
        assert!(parse_native(text).is_err());
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        assert!(matches!(
            parse_native("{ not json"),
            Err(SteelspanError::Export(ExportError::Format(_)))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            read_native("/nonexistent/steelspan/bridge.brep"),
            Err(SteelspanError::Export(ExportError::Io { .. }))
        ));
    }
}
