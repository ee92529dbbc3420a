//! Account roles

use serde::{Deserialize, Serialize};

/// Which front-end an account is allowed to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "usuario")]
    User,
    #[serde(rename = "inspector")]
    Inspector,
    #[serde(rename = "administrador")]
    Administrator,
}
