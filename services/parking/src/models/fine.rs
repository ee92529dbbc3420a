//! Fine model

use serde::{Deserialize, Deserializer, Serialize};

use super::space::deserialize_space_id;
use super::stamp::Stamp;

/// Fine entity. Written once by the fine issuer, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fine {
    #[serde(rename = "fecha")]
    pub timestamp: Stamp,
    #[serde(rename = "espacio", deserialize_with = "deserialize_space_id")]
    pub space_id: String,
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "detalle")]
    pub detail: String,
    #[serde(rename = "monto", default)]
    pub amount: f64,
    /// Owner email the fine was addressed to, if one was found
    #[serde(rename = "correo", default, deserialize_with = "empty_as_none")]
    pub contact: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
