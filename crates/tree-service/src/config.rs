use serde::{Deserialize, Serialize};

/// Settings of a [`TreeService`](crate::TreeService)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Name given to the root when `create_root` names none
    pub root_name: String,

    /// File name offered for `save_tree` downloads
    pub save_filename: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            root_name: "Root".to_string(),
            save_filename: "tree.json".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default root name
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Set the download file name
    pub fn save_filename(mut self, name: impl Into<String>) -> Self {
        self.save_filename = name.into();
        self
    }
}
