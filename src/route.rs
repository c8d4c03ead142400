use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The route being rendered: path, query and optional route name.
///
/// Owned by the host; the locale and SEO code only read it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,

    #[serde(default)]
    pub query: BTreeMap<String, String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl Route {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}
