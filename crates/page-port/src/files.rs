use serde::{Deserialize, Serialize};

/// In-memory file handed to a file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    /// Build a plain-text upload payload.
    pub fn text(content: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: "text/plain".to_string(),
            bytes: content.into().into_bytes(),
        }
    }
}
