//! Tariff and operating configuration

use serde::{Deserialize, Serialize};

fn default_opening() -> String {
    "00:00".to_string()
}

fn default_closing() -> String {
    "23:59".to_string()
}

/// Administrator-managed settings read by the lifecycle manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Price of one hour of parking
    #[serde(rename = "tarifa", alias = "tarifa_hora")]
    pub hourly_rate: f64,
    /// Shortest rental accepted, in minutes
    #[serde(rename = "tiempo_minimo")]
    pub minimum_minutes: u32,
    /// Amount charged per fine
    #[serde(rename = "multa", alias = "multa_por_hora", default)]
    pub fine_amount: f64,
    /// Start of the operating window, `HH:MM`
    #[serde(rename = "horario_inicio", default = "default_opening")]
    pub opening: String,
    /// End of the operating window, `HH:MM`
    #[serde(rename = "horario_fin", default = "default_closing")]
    pub closing: String,
}

impl Settings {
    pub fn new(hourly_rate: f64, minimum_minutes: u32) -> Self {
        Self {
            hourly_rate,
            minimum_minutes,
            fine_amount: 0.0,
            opening: default_opening(),
            closing: default_closing(),
        }
    }
}
