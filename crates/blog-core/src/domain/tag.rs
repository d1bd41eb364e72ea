use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tag entity. Names are unique across the store and tags are never
/// removed when posts stop referencing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
