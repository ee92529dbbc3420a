//! User model and related functionality

use serde::{Deserialize, Serialize};

use super::role::Role;
use super::stamp::Stamp;

fn is_false(value: &bool) -> bool {
    !*value
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "identificacion")]
    pub identification: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellidos", default)]
    pub surname: String,
    #[serde(rename = "correo")]
    pub email: String,
    /// Argon2 PHC string
    #[serde(rename = "contrasena")]
    pub password_hash: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "tarjeta", default, skip_serializing_if = "Option::is_none")]
    pub card: Option<PaymentCard>,
    #[serde(rename = "vehiculos", default)]
    pub vehicles: Vec<Vehicle>,
    #[serde(rename = "fecha_registro", default)]
    pub registered_at: Stamp,
    #[serde(rename = "rol", default)]
    pub role: Role,
    /// Set while the account uses a temporary password
    #[serde(rename = "temporal", default, skip_serializing_if = "is_false")]
    pub temporary_password: bool,
}

impl User {
    pub fn owns_plate(&self, plate: &str) -> bool {
        self.vehicles
            .iter()
            .any(|v| v.plate.trim().eq_ignore_ascii_case(plate.trim()))
    }
}

/// A registered vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(rename = "placa")]
    pub plate: String,
    #[serde(rename = "marca", default)]
    pub make: String,
    #[serde(rename = "modelo", default)]
    pub model: String,
    #[serde(default)]
    pub color: String,
}

/// Payment card on file. The security code is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    #[serde(rename = "numero", alias = "number")]
    pub number: String,
    #[serde(rename = "vencimiento", alias = "expiry", default)]
    pub expiry: String,
}

/// New user registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub identification: String,
    pub name: String,
    #[serde(default)]
    pub surname: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub card: Option<PaymentCard>,
}

/// User profile update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub card: Option<PaymentCard>,
}

/// User login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub identification: String,
    pub password: String,
}
