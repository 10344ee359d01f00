//! Units of amount of substance accepted for input and output of moles.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    Mol,
    #[default]
    Mmol,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown amount unit '{0}', expected 'mol' or 'mmol'")]
pub struct UnknownUnit(pub String);

impl AmountUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountUnit::Mol => "mol",
            AmountUnit::Mmol => "mmol",
        }
    }

    /// value expressed in this unit -> mol
    pub fn to_moles(&self, value: f64) -> f64 {
        match self {
            AmountUnit::Mol => value,
            AmountUnit::Mmol => value / 1000.0,
        }
    }

    /// mol -> value expressed in this unit
    pub fn from_moles(&self, moles: f64) -> f64 {
        match self {
            AmountUnit::Mol => moles,
            AmountUnit::Mmol => moles * 1000.0,
        }
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmountUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mol" => Ok(AmountUnit::Mol),
            "mmol" => Ok(AmountUnit::Mmol),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}
