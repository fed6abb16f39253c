use serde::{Deserialize, Serialize};

/// Resolved many-to-one relation: the related record's id and display name
///
/// On the wire this is the positional pair `[id, "name"]`, never an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdNamePair {
    pub id: i64,
    pub name: String,
}

impl IdNamePair {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for IdNamePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
