use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Weight classes a fighter competes in and rankings are grouped by.
///
/// Stored as text in the `fighters.weight_class` and `rankings.category`
/// columns using the snake_case names below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeightClass {
    Strawweight,
    Flyweight,
    Bantamweight,
    Featherweight,
    Lightweight,
    Welterweight,
    Middleweight,
    LightHeavyweight,
    Heavyweight,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weight class: {0}")]
pub struct ParseWeightClassError(pub String);

impl WeightClass {
    pub const ALL: [WeightClass; 9] = [
        WeightClass::Strawweight,
        WeightClass::Flyweight,
        WeightClass::Bantamweight,
        WeightClass::Featherweight,
        WeightClass::Lightweight,
        WeightClass::Welterweight,
        WeightClass::Middleweight,
        WeightClass::LightHeavyweight,
        WeightClass::Heavyweight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightClass::Strawweight => "strawweight",
            WeightClass::Flyweight => "flyweight",
            WeightClass::Bantamweight => "bantamweight",
            WeightClass::Featherweight => "featherweight",
            WeightClass::Lightweight => "lightweight",
            WeightClass::Welterweight => "welterweight",
            WeightClass::Middleweight => "middleweight",
            WeightClass::LightHeavyweight => "light_heavyweight",
            WeightClass::Heavyweight => "heavyweight",
        }
    }
}

impl FromStr for WeightClass {
    type Err = ParseWeightClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        WeightClass::ALL
            .into_iter()
            .find(|wc| wc.as_str() == normalized)
            .ok_or_else(|| ParseWeightClassError(s.to_string()))
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
