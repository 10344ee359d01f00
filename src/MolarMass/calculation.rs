//! # Calculation Module
//!
//! ## Aim
//! Entry point for anything that shows results to a user. It runs the full gate on a
//! formula (parse, reject empty, validate symbols) before any number is computed, so a
//! malformed formula, an unknown element and a massless result can never be confused.
//!
//! ## Modes
//! - `MolarMass`: molar mass only
//! - `ReagentMass`: molar mass and the mass of a given amount (in mol or mmol)
//! - `MolesFromMass`: molar mass and the amount (in mol or mmol) in a given mass in g
//!
//! With `verbose` set, the report also carries a per-element breakdown.
//!
//! ## Usage
//! ```rust
//! use molmass_calc::MolarMass::calculation::{Calculation, CalculationRequest};
//! use molmass_calc::MolarMass::units::AmountUnit;
//! let report = Calculation::new()
//!     .run(&CalculationRequest::reagent_mass("NaCl", 500.0, AmountUnit::Mmol))
//!     .unwrap();
//! assert!((report.reagent_mass.unwrap() - 29.22).abs() < 1e-9);
//! ```
use crate::MolarMass::formula_parser::ElementCounts;
use crate::MolarMass::mass_calculator::{CalculationError, ElementContribution, MassCalculator};
use crate::MolarMass::units::AmountUnit;
use crate::settings::Settings;
use log::{info, warn};
use prettytable::{Table, row};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationMode {
    MolarMass,
    ReagentMass,
    MolesFromMass,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub formula: String,
    pub mode: CalculationMode,
    /// amount in `unit` for ReagentMass, mass in g for MolesFromMass
    pub input: Option<f64>,
    pub unit: AmountUnit,
    pub verbose: bool,
}

impl CalculationRequest {
    pub fn molar_mass(formula: &str) -> Self {
        Self {
            formula: formula.to_string(),
            mode: CalculationMode::MolarMass,
            input: None,
            unit: AmountUnit::default(),
            verbose: false,
        }
    }

    pub fn reagent_mass(formula: &str, amount: f64, unit: AmountUnit) -> Self {
        Self {
            mode: CalculationMode::ReagentMass,
            input: Some(amount),
            unit,
            ..Self::molar_mass(formula)
        }
    }

    pub fn moles_from_mass(formula: &str, mass: f64, unit: AmountUnit) -> Self {
        Self {
            mode: CalculationMode::MolesFromMass,
            input: Some(mass),
            unit,
            ..Self::molar_mass(formula)
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationReport {
    pub formula: String,
    pub counts: ElementCounts,
    pub molar_mass: f64,
    pub unit: AmountUnit,
    /// amount given for ReagentMass, in `unit`
    pub amount: Option<f64>,
    /// g
    pub reagent_mass: Option<f64>,
    /// mass given for MolesFromMass, g
    pub mass: Option<f64>,
    /// amount found for MolesFromMass, in `unit`
    pub moles: Option<f64>,
    pub breakdown: Option<Vec<ElementContribution>>,
}

impl CalculationReport {
    /// Text report with the decimal places from `settings`.
    pub fn render(&self, settings: &Settings) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Molar mass of {}: {:.*} g/mol",
            self.formula, settings.precision_molar_mass, self.molar_mass
        );
        if let (Some(amount), Some(reagent_mass)) = (self.amount, self.reagent_mass) {
            let _ = writeln!(
                out,
                "Reagent mass of {} {} {}: {:.*} g",
                amount, self.unit, self.formula, settings.precision_reagent_mass, reagent_mass
            );
        }
        if let (Some(mass), Some(moles)) = (self.mass, self.moles) {
            let _ = writeln!(
                out,
                "Moles of {} in {} g: {:.*} {}",
                self.formula, mass, settings.precision_moles, moles, self.unit
            );
        }
        out
    }

    /// Per-element table (element, count, atomic mass, subtotal, mass %), if requested.
    pub fn breakdown_table(&self, settings: &Settings) -> Option<Table> {
        let rows = self.breakdown.as_ref()?;
        let p = settings.precision_molar_mass;
        let mut table = Table::new();
        table.add_row(row![
            "element",
            "count",
            "atomic mass, g/mol",
            "subtotal, g/mol",
            "mass %"
        ]);
        for r in rows {
            table.add_row(row![
                r.symbol,
                r.count,
                format!("{:.*}", p, r.atomic_mass),
                format!("{:.*}", p, r.subtotal),
                format!("{:.2}", r.mass_percent)
            ]);
        }
        table.add_row(row![
            "total",
            self.counts.total_atoms(),
            "",
            format!("{:.*}", p, self.molar_mass),
            "100.00"
        ]);
        Some(table)
    }
}

/// Runs calculation requests against one `MassCalculator`.
#[derive(Debug, Clone, Copy)]
pub struct Calculation<'a> {
    calculator: MassCalculator<'a>,
}

impl Default for Calculation<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculation<'static> {
    pub fn new() -> Self {
        Self {
            calculator: MassCalculator::new(),
        }
    }
}

impl<'a> Calculation<'a> {
    pub fn with_calculator(calculator: MassCalculator<'a>) -> Self {
        Self { calculator }
    }

    /// Gate only: trimmed `formula` must parse, be non-empty and name known elements.
    /// Nothing is computed or logged, so a caller can check a formula before asking for
    /// more input and then `run` it.
    pub fn check(&self, formula: &str) -> Result<ElementCounts, CalculationError> {
        self.calculator.checked_counts(formula.trim())
    }

    pub fn run(&self, request: &CalculationRequest) -> Result<CalculationReport, CalculationError> {
        let formula = request.formula.trim();
        let report = self.evaluate(formula, request);
        match &report {
            Ok(r) => info!("{}: molar mass {} g/mol", formula, r.molar_mass),
            Err(e) => warn!("calculation for '{}' rejected: {}", formula, e),
        }
        report
    }

    fn evaluate(
        &self,
        formula: &str,
        request: &CalculationRequest,
    ) -> Result<CalculationReport, CalculationError> {
        if formula.is_empty() {
            return Err(CalculationError::EmptyFormula);
        }
        let counts = self.calculator.checked_counts(formula)?;
        let molar_mass = self.calculator.counts_mass(&counts)?;
        let mut report = CalculationReport {
            formula: formula.to_string(),
            counts,
            molar_mass,
            unit: request.unit,
            amount: None,
            reagent_mass: None,
            mass: None,
            moles: None,
            breakdown: None,
        };

        match request.mode {
            CalculationMode::MolarMass => {}
            CalculationMode::ReagentMass => {
                let amount = request
                    .input
                    .ok_or(CalculationError::MissingInput("number of moles"))?;
                let moles = request.unit.to_moles(amount);
                report.amount = Some(amount);
                report.reagent_mass = Some(self.calculator.reagent_mass(moles, formula));
            }
            CalculationMode::MolesFromMass => {
                let mass = request
                    .input
                    .ok_or(CalculationError::MissingInput("mass"))?;
                let moles = self.calculator.moles_from_mass(mass, formula);
                report.mass = Some(mass);
                report.moles = Some(request.unit.from_moles(moles));
            }
        }

        if request.verbose {
            report.breakdown = Some(self.calculator.breakdown(&report.counts)?);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_molar_mass_mode() {
        let report = Calculation::new()
            .run(&CalculationRequest::molar_mass(" Mg(OH)2 "))
            .unwrap();
        assert_eq!(report.formula, "Mg(OH)2");
        assert_relative_eq!(report.molar_mass, 58.326, epsilon = 1e-9);
        assert_eq!(report.reagent_mass, None);
        assert_eq!(report.moles, None);
        assert_eq!(report.breakdown, None);
    }

    #[test]
    fn test_reagent_mass_units() {
        let calc = Calculation::new();
        let in_mol = calc
            .run(&CalculationRequest::reagent_mass("NaCl", 0.5, AmountUnit::Mol))
            .unwrap();
        assert_relative_eq!(in_mol.reagent_mass.unwrap(), 29.22, epsilon = 1e-9);
        let in_mmol = calc
            .run(&CalculationRequest::reagent_mass("NaCl", 500.0, AmountUnit::Mmol))
            .unwrap();
        assert_relative_eq!(in_mmol.reagent_mass.unwrap(), 29.22, epsilon = 1e-9);
        assert_eq!(in_mmol.amount, Some(500.0));
    }

    #[test]
    fn test_moles_from_mass_units() {
        let calc = Calculation::new();
        let in_mol = calc
            .run(&CalculationRequest::moles_from_mass("H2O", 18.016, AmountUnit::Mol))
            .unwrap();
        assert_relative_eq!(in_mol.moles.unwrap(), 1.0, epsilon = 1e-6);
        let in_mmol = calc
            .run(&CalculationRequest::moles_from_mass("H2O", 18.016, AmountUnit::Mmol))
            .unwrap();
        assert_relative_eq!(in_mmol.moles.unwrap(), 1000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_gate_rejects_bad_formulae() {
        let calc = Calculation::new();
        assert_eq!(
            calc.run(&CalculationRequest::molar_mass("   ")),
            Err(CalculationError::EmptyFormula)
        );
        assert_eq!(
            calc.run(&CalculationRequest::molar_mass("()")),
            Err(CalculationError::EmptyFormula)
        );
        assert!(matches!(
            calc.run(&CalculationRequest::molar_mass("H2O)")),
            Err(CalculationError::Formula(_))
        ));
        assert_eq!(
            calc.run(&CalculationRequest::molar_mass("NaZz")),
            Err(CalculationError::UnknownElement("Zz".to_string()))
        );
    }

    #[test]
    fn test_missing_input() {
        let calc = Calculation::new();
        let mut request = CalculationRequest::reagent_mass("NaCl", 1.0, AmountUnit::Mol);
        request.input = None;
        assert_eq!(
            calc.run(&request),
            Err(CalculationError::MissingInput("number of moles"))
        );
        request.mode = CalculationMode::MolesFromMass;
        assert_eq!(calc.run(&request), Err(CalculationError::MissingInput("mass")));
    }

    #[test]
    fn test_verbose_breakdown() {
        let report = Calculation::new()
            .run(&CalculationRequest::molar_mass("H2O").verbose(true))
            .unwrap();
        let rows = report.breakdown.as_ref().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "H");
        assert_eq!(rows[0].count, 2);
        assert_relative_eq!(rows[0].subtotal, 2.016, epsilon = 1e-12);
        assert_relative_eq!(rows[1].atomic_mass, 16.00);
        let percent: f64 = rows.iter().map(|r| r.mass_percent).sum();
        assert_relative_eq!(percent, 100.0, epsilon = 1e-9);

        let table = report.breakdown_table(&Settings::default()).unwrap();
        // header, two elements, total
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_render_uses_precision() {
        let calc = Calculation::new();
        let settings = Settings::default();
        let report = calc
            .run(&CalculationRequest::reagent_mass("NaCl", 0.5, AmountUnit::Mol))
            .unwrap();
        let text = report.render(&settings);
        assert!(text.contains("Molar mass of NaCl: 58.440 g/mol"), "{}", text);
        assert!(text.contains("Reagent mass of 0.5 mol NaCl: 29.2200 g"), "{}", text);
        assert!(report.breakdown_table(&settings).is_none());

        let report = calc
            .run(&CalculationRequest::moles_from_mass("H2O", 9.008, AmountUnit::Mol))
            .unwrap();
        let text = report.render(&settings);
        assert!(text.contains("Moles of H2O in 9.008 g: 0.500000 mol"), "{}", text);
    }

    #[test]
    fn test_check_gate_only() {
        let calc = Calculation::new();
        let counts = calc.check(" Mg(OH)2 ").unwrap();
        assert_eq!(counts.get("O"), Some(2));
        assert_eq!(calc.check(""), Err(CalculationError::EmptyFormula));
        assert_eq!(
            calc.check("NaZz"),
            Err(CalculationError::UnknownElement("Zz".to_string()))
        );
        assert!(matches!(calc.check("(H2O"), Err(CalculationError::Formula(_))));
    }
}
