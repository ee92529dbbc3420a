//! Parking space model

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::stamp::Stamp;

/// All spaces, keyed by space id
pub type Spaces = BTreeMap<String, Space>;

/// A street parking space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpaceRecord", into = "SpaceRecord")]
pub struct Space {
    pub enabled: bool,
    pub occupant: Option<Occupant>,
}

/// The rental currently holding a space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub user: String,
    pub plate: String,
    pub start: Stamp,
    pub minutes: u32,
    pub end: Stamp,
}

/// Current state of a space as seen by a renter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceStatus {
    Free,
    Occupied,
    /// Unknown or disabled
    Unavailable,
}

impl Space {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            occupant: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.enabled && self.occupant.is_none()
    }

    pub fn status(&self) -> SpaceStatus {
        match (self.enabled, &self.occupant) {
            (false, _) => SpaceStatus::Unavailable,
            (true, Some(_)) => SpaceStatus::Occupied,
            (true, None) => SpaceStatus::Free,
        }
    }

    pub fn clear(&mut self) {
        self.occupant = None;
    }
}

/// On-disk shape of a space: empty strings stand for "no occupant".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRecord {
    pub habilitado: String,
    #[serde(default)]
    pub usuario: String,
    #[serde(default)]
    pub placa: String,
    #[serde(default)]
    pub inicio: String,
    #[serde(default)]
    pub tiempo: u32,
    #[serde(default)]
    pub fin: String,
}

impl TryFrom<SpaceRecord> for Space {
    type Error = String;

    fn try_from(record: SpaceRecord) -> Result<Self, Self::Error> {
        let enabled = match record.habilitado.trim() {
            "S" | "s" => true,
            "N" | "n" => false,
            other => return Err(format!("habilitado must be \"S\" or \"N\", got {other:?}")),
        };

        let has_user = !record.usuario.trim().is_empty();
        let has_end = !record.fin.trim().is_empty();
        let occupant = match (has_user, has_end) {
            (false, false) => None,
            (true, true) => Some(Occupant {
                user: record.usuario,
                plate: record.placa,
                start: Stamp::from(record.inicio),
                minutes: record.tiempo,
                end: Stamp::from(record.fin),
            }),
            (true, false) => return Err("occupied space without an end time".to_string()),
            (false, true) => return Err("end time set on a space without occupant".to_string()),
        };

        Ok(Self { enabled, occupant })
    }
}

impl From<Space> for SpaceRecord {
    fn from(space: Space) -> Self {
        let habilitado = if space.enabled { "S" } else { "N" }.to_string();
        match space.occupant {
            Some(occupant) => Self {
                habilitado,
                usuario: occupant.user,
                placa: occupant.plate,
                inicio: occupant.start.as_str().to_string(),
                tiempo: occupant.minutes,
                fin: occupant.end.as_str().to_string(),
            },
            None => Self {
                habilitado,
                usuario: String::new(),
                placa: String::new(),
                inicio: String::new(),
                tiempo: 0,
                fin: String::new(),
            },
        }
    }
}

/// Trim and upper-case a space id the way it is keyed on disk
pub fn normalize_space_id(id: &str) -> String {
    id.trim().to_uppercase()
}

/// Deserialize a space id written either as a string or as a number
pub(crate) fn deserialize_space_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(text) => normalize_space_id(&text),
        Repr::Number(number) => number.to_string(),
    })
}
