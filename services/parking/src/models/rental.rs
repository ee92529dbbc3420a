//! Rental model and related functionality

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::space::deserialize_space_id;
use super::stamp::Stamp;

/// Rental lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalStatus {
    #[serde(rename = "activo")]
    Active,
    #[serde(rename = "finalizado")]
    Finished,
}

/// Rental entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    #[serde(rename = "espacio_id", deserialize_with = "deserialize_space_id")]
    pub space_id: String,
    #[serde(rename = "usuario")]
    pub user: String,
    #[serde(rename = "inicio")]
    pub start: Stamp,
    #[serde(rename = "fin")]
    pub end: Stamp,
    #[serde(rename = "estado")]
    pub status: RentalStatus,
    #[serde(rename = "costo_total")]
    pub total_cost: f64,
    #[serde(rename = "placa", default)]
    pub plate: String,
}

impl Rental {
    pub fn is_active(&self) -> bool {
        self.status == RentalStatus::Active
    }
}

/// Cost of `minutes` at `hourly_rate`, rounded to two decimals
pub fn rental_cost(minutes: u32, hourly_rate: f64) -> f64 {
    round2(f64::from(minutes) / 60.0 * hourly_rate)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rental_cost() {
        assert_eq!(rental_cost(30, 60.0), 30.0);
        assert_eq!(rental_cost(60, 1.5), 1.5);
        assert_eq!(rental_cost(45, 1.5), 1.13);
        assert_eq!(rental_cost(20, 0.0), 0.0);
    }

    #[test]
    fn test_numeric_space_id_is_accepted() {
        let json = r#"{
            "id": "6b0c1f7e-3f55-4d55-9bd5-0d3c7f3c2a10",
            "espacio_id": 7,
            "usuario": "a@b.com",
            "inicio": "01/06/2025 10:00",
            "fin": "01/06/2025 11:00",
            "estado": "activo",
            "costo_total": 1.5,
            "placa": "ABC123"
        }"#;
        let rental: Rental = serde_json::from_str(json).unwrap();
        assert_eq!(rental.space_id, "7");
        assert!(rental.is_active());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{
            "id": "6b0c1f7e-3f55-4d55-9bd5-0d3c7f3c2a10",
            "espacio_id": "A1",
            "usuario": "a@b.com",
            "inicio": "01/06/2025 10:00",
            "fin": "01/06/2025 11:00",
            "estado": "pausado",
            "costo_total": 1.5
        }"#;
        assert!(serde_json::from_str::<Rental>(json).is_err());
    }
}
