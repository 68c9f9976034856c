use crate::model::FlowDocument;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Why an import was rejected. Either way the current diagram is left
/// untouched; application is all-or-nothing per file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid flow document: `nodes` and `connections` must be arrays")]
    InvalidFormat,
    #[error("could not parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serialize a document snapshot with 2-space pretty printing, the exact
/// shape `parse_document` accepts back.
pub fn to_json(doc: &FlowDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Suggested export file name: `flow-diagram-<unix-epoch-ms>.json`.
pub fn export_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("flow-diagram-{millis}.json")
}

/// Parse a flow document from JSON text, pretty or compact.
///
/// Shape is checked before typing: the top-level value must carry
/// array-typed `nodes` and `connections`. Entries are lenient about missing
/// fields (serde defaults fill them in) but an entry whose present fields
/// have the wrong JSON type rejects the whole document.
pub fn parse_document(text: &str) -> Result<FlowDocument, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let nodes_ok = value.get("nodes").is_some_and(|v| v.is_array());
    let connections_ok = value.get("connections").is_some_and(|v| v.is_array());
    if !nodes_ok || !connections_ok {
        return Err(ImportError::InvalidFormat);
    }
    serde_json::from_value(value).map_err(|_| ImportError::InvalidFormat)
}
