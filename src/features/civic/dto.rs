use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An elected official as returned by the civic-data provider. Only `name` is
/// interpreted; everything else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Official {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Official {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}
