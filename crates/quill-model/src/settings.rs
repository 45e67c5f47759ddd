// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

fn default_title() -> String {
    "My Blog".to_string()
}

fn default_description() -> String {
    "Welcome".to_string()
}

fn default_password() -> String {
    "admin".to_string()
}

/// Site settings singleton. Per-field defaults mean a partially valid
/// settings object fills in the documented values instead of being
/// rejected wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            password: default_password(),
        }
    }
}
