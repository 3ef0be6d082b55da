//! Résumé attachment carried by a person.

use serde::{Serialize, Serializer};

/// An uploaded résumé: content bytes plus the declared content type and the
/// original filename.
///
/// The three parts travel together, so a person either has all of them or
/// none. Serialization emits the byte count instead of the content.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Resume {
    pub file_name: String,
    pub content_type: String,
    #[serde(rename = "size_bytes", serialize_with = "serialize_len")]
    pub data: Vec<u8>,
}

/// Fallback content type when an upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

impl Resume {
    /// Assemble a résumé from its parts when all of them are present.
    ///
    /// Returns `None` for any partial combination.
    pub fn from_parts(
        data: Option<Vec<u8>>,
        content_type: Option<String>,
        file_name: Option<String>,
    ) -> Option<Self> {
        match (data, content_type, file_name) {
            (Some(data), Some(content_type), Some(file_name)) => Some(Self {
                file_name,
                content_type,
                data,
            }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for Resume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resume")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

fn serialize_len<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}
