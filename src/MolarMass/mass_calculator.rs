//! # Mass Calculator Module
//!
//! ## Aim
//! Molar mass of a compound from its formula, and the two conversions built on it:
//! reagent mass from amount of substance and amount of substance from reagent mass.
//!
//! ## Main Data Structures and Logic
//! - `MassCalculator`: borrows an `AtomicWeightTable` and holds no other state, so one
//!   instance can be shared between threads
//! - `CalculationError`: why a formula could not be turned into a mass
//! - `ElementContribution`: one row of the per-element breakdown (count, atomic mass,
//!   subtotal, mass percent)
//!
//! ## Two flavours of API
//! `molar_mass`, `reagent_mass` and `moles_from_mass` never fail: a formula that does not
//! parse, or that names an element absent from the table, has molar mass 0, and moles
//! from a zero molar mass are 0. A 0 is therefore ambiguous, and anything that shows
//! results to a user should go through `try_molar_mass` (or `Calculation::run`), which
//! parses, rejects empty formulas and validates the symbols before summing.
//!
//! ## Usage
//! ```rust
//! use molmass_calc::MolarMass::mass_calculator::MassCalculator;
//! let calc = MassCalculator::new();
//! assert!((calc.molar_mass("H2O") - 18.016).abs() < 1e-9);
//! assert_eq!(calc.molar_mass("Zz3"), 0.0);
//! assert!(calc.try_molar_mass("Zz3").is_err());
//! ```
use crate::MolarMass::atomic_weights::AtomicWeightTable;
use crate::MolarMass::formula_parser::{ElementCounts, FormulaError, parse_formula};
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("invalid chemical formula: {0}")]
    Formula(#[from] FormulaError),
    #[error("empty chemical formula")]
    EmptyFormula,
    #[error("unknown element '{0}'")]
    UnknownElement(String),
    #[error("missing input value: {0}")]
    MissingInput(&'static str),
}

/// Contribution of one element to the molar mass of a compound.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementContribution {
    pub symbol: String,
    pub count: usize,
    pub atomic_mass: f64,
    /// atomic_mass * count, g/mol
    pub subtotal: f64,
    /// share of the molar mass, %
    pub mass_percent: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct MassCalculator<'a> {
    table: &'a AtomicWeightTable,
}

impl Default for MassCalculator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl MassCalculator<'static> {
    /// calculator over the IUPAC 1995 atomic weights
    pub fn new() -> Self {
        Self {
            table: AtomicWeightTable::iupac_1995(),
        }
    }
}

impl<'a> MassCalculator<'a> {
    pub fn with_table(table: &'a AtomicWeightTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a AtomicWeightTable {
        self.table
    }

    /// true if every symbol in `counts` has an atomic weight
    pub fn validate_elements(&self, counts: &ElementCounts) -> bool {
        self.first_unknown_element(counts).is_none()
    }

    pub fn first_unknown_element<'c>(&self, counts: &'c ElementCounts) -> Option<&'c str> {
        counts.symbols().find(|symbol| !self.table.contains(symbol))
    }

    /// Σ atomic_mass * count in order of appearance.
    pub fn counts_mass(&self, counts: &ElementCounts) -> Result<f64, CalculationError> {
        counts.iter().try_fold(0.0, |total, (symbol, count)| {
            self.table
                .atomic_mass(symbol)
                .map(|mass| total + mass * count as f64)
                .ok_or_else(|| CalculationError::UnknownElement(symbol.to_string()))
        })
    }

    /// Parses and validates `formula` and returns its molar mass in g/mol.
    pub fn try_molar_mass(&self, formula: &str) -> Result<f64, CalculationError> {
        self.counts_mass(&self.checked_counts(formula)?)
    }

    /// Parse step and validation step of the calculation gate: the formula must parse,
    /// contain at least one element and name only known elements.
    pub fn checked_counts(&self, formula: &str) -> Result<ElementCounts, CalculationError> {
        let counts = parse_formula(formula)?;
        if counts.is_empty() {
            return Err(CalculationError::EmptyFormula);
        }
        if let Some(symbol) = self.first_unknown_element(&counts) {
            return Err(CalculationError::UnknownElement(symbol.to_string()));
        }
        Ok(counts)
    }

    /// Molar mass in g/mol, or 0 if the formula is malformed or has an unknown element.
    pub fn molar_mass(&self, formula: &str) -> f64 {
        let counts = match parse_formula(formula) {
            Ok(counts) => counts,
            Err(e) => {
                warn!("invalid formula '{}': {}", formula, e);
                return 0.0;
            }
        };
        match self.counts_mass(&counts) {
            Ok(mass) => {
                debug!("molar mass of {}: {} g/mol", formula, mass);
                mass
            }
            Err(e) => {
                warn!("formula '{}' rejected: {}", formula, e);
                0.0
            }
        }
    }

    /// Mass in g of `moles` mol of the compound. Zero and negative amounts are not rejected.
    pub fn reagent_mass(&self, moles: f64, formula: &str) -> f64 {
        moles * self.molar_mass(formula)
    }

    /// Amount in mol of `mass` g of the compound; 0 when the molar mass is 0.
    pub fn moles_from_mass(&self, mass: f64, formula: &str) -> f64 {
        let molar_mass = self.molar_mass(formula);
        if molar_mass > 0.0 {
            mass / molar_mass
        } else {
            0.0
        }
    }

    /// molar masses of several formulae, 0 for each invalid one
    pub fn molar_masses(&self, formulae: &[&str]) -> Vec<f64> {
        formulae
            .iter()
            .map(|formula| self.molar_mass(formula))
            .collect()
    }

    /// Per-element contributions to the molar mass, in order of appearance.
    pub fn breakdown(
        &self,
        counts: &ElementCounts,
    ) -> Result<Vec<ElementContribution>, CalculationError> {
        let total = self.counts_mass(counts)?;
        let mut rows = Vec::with_capacity(counts.len());
        for (symbol, count) in counts.iter() {
            let atomic_mass = self
                .table
                .atomic_mass(symbol)
                .ok_or_else(|| CalculationError::UnknownElement(symbol.to_string()))?;
            let subtotal = atomic_mass * count as f64;
            let mass_percent = if total > 0.0 {
                100.0 * subtotal / total
            } else {
                0.0
            };
            rows.push(ElementContribution {
                symbol: symbol.to_string(),
                count,
                atomic_mass,
                subtotal,
                mass_percent,
            });
        }
        Ok(rows)
    }
}
