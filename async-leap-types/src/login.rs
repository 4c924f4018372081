// LEAP for Rust
// SPDX-License-Identifier: MPL-2.0

//! The `/login` body.

use serde::{Deserialize, Serialize};

use crate::enums::ContextType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Login {
    pub context_type: ContextType,
    #[serde(rename = "href", default, skip_serializing_if = "str::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body of `OneLoginDefinition`, `{"Login": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginBody {
    pub login: Login,
}
