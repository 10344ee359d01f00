use super::cli_main::{prompt, read_line};
use crate::MolarMass::calculation::{Calculation, CalculationMode, CalculationRequest};
use crate::MolarMass::mass_calculator::CalculationError;
use crate::settings::{Settings, with_settings};
use log::warn;
use std::io::{self, BufRead, Write};

/// One calculation mode of the menu, with the current settings.
pub fn calculation_menu<R: BufRead, W: Write>(
    mode: CalculationMode,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let settings = with_settings(|manager| manager.settings().clone());
    calculation_session(mode, &settings, input, out)
}

/// Asks for formulae (and amounts or masses) until "exit" or end of input.
pub fn calculation_session<R: BufRead, W: Write>(
    mode: CalculationMode,
    settings: &Settings,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let calculation = Calculation::new();
    writeln!(out, "\nEnter 'exit' to return.")?;
    loop {
        prompt(out, "Enter compound to calculate: ")?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        let line = line.trim();
        if line == "exit" {
            return Ok(());
        }
        let (formula, verbose) = split_verbose_flag(line);

        // formula first, so a typo is reported before asking for numbers
        if let Err(e) = calculation.check(formula) {
            warn!("formula '{}' rejected: {}", formula, e);
            writeln!(out, "{}\n", describe_error(&e))?;
            continue;
        }

        let request = match mode {
            CalculationMode::MolarMass => CalculationRequest::molar_mass(formula),
            CalculationMode::ReagentMass => {
                let question = format!(
                    "Enter number of moles of compound ({}): ",
                    settings.default_unit
                );
                let Some(amount) = ask_number(&question, "moles", input, out)? else {
                    continue;
                };
                CalculationRequest::reagent_mass(formula, amount, settings.default_unit)
            }
            CalculationMode::MolesFromMass => {
                let Some(mass) = ask_number("Enter mass of compound (g): ", "mass", input, out)?
                else {
                    continue;
                };
                CalculationRequest::moles_from_mass(formula, mass, settings.default_unit)
            }
        }
        .verbose(verbose);

        match calculation.run(&request) {
            Ok(report) => {
                write!(out, "{}", report.render(settings))?;
                if let Some(table) = report.breakdown_table(settings) {
                    table.print(out)?;
                }
                writeln!(out)?;
            }
            Err(e) => writeln!(out, "{}\n", describe_error(&e))?,
        }
    }
}

/// Molar mass of every formula; false if any of them was rejected.
pub fn print_molar_masses<W: Write>(formulae: &[String], out: &mut W) -> io::Result<bool> {
    let settings = with_settings(|manager| manager.settings().clone());
    let calculation = Calculation::new();
    let mut all_ok = true;
    for formula in formulae {
        match calculation.run(&CalculationRequest::molar_mass(formula)) {
            Ok(report) => write!(out, "{}", report.render(&settings))?,
            Err(e) => {
                all_ok = false;
                writeln!(out, "{}: {}", formula, describe_error(&e))?;
            }
        }
    }
    Ok(all_ok)
}

/// "Mg(OH)2 -v" -> ("Mg(OH)2", true)
fn split_verbose_flag(line: &str) -> (&str, bool) {
    match line.strip_suffix("-v") {
        Some(formula) => (formula.trim(), true),
        None => (line, false),
    }
}

/// `None` if the answer is not a finite number or input ended; the caller asks for the
/// next compound then.
fn ask_number<R: BufRead, W: Write>(
    question: &str,
    what: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<f64>> {
    prompt(out, question)?;
    let Some(answer) = read_line(input)? else {
        return Ok(None);
    };
    match answer.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => {
            writeln!(out, "Please enter a valid number for {}.\n", what)?;
            Ok(None)
        }
    }
}

fn describe_error(e: &CalculationError) -> String {
    match e {
        CalculationError::Formula(_) => {
            format!("Invalid chemical formula ({}). Please check your input.", e)
        }
        CalculationError::EmptyFormula => "Please enter a chemical formula.".to_string(),
        CalculationError::UnknownElement(_) => format!(
            "Invalid element detected in formula ({}). Please use valid element symbols.",
            e
        ),
        CalculationError::MissingInput(_) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MolarMass::units::AmountUnit;
    use std::io::Cursor;

    fn session(mode: CalculationMode, settings: &Settings, script: &str) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        calculation_session(mode, settings, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_molar_mass_only() {
        let output = session(
            CalculationMode::MolarMass,
            &Settings::default(),
            "Mg(OH)2\nexit\n",
        );
        assert!(output.contains("Molar mass of Mg(OH)2: 58.326 g/mol"), "{}", output);
        assert!(!output.contains("Enter number of moles"));
    }

    #[test]
    fn test_reagent_mass_in_default_unit() {
        let output = session(
            CalculationMode::ReagentMass,
            &Settings::default(),
            "NaCl\n500\nexit\n",
        );
        assert!(output.contains("Enter number of moles of compound (mmol)"));
        assert!(output.contains("Reagent mass of 500 mmol NaCl: 29.2200 g"), "{}", output);
    }

    #[test]
    fn test_moles_from_mass_in_mol() {
        let settings = Settings {
            default_unit: AmountUnit::Mol,
            ..Settings::default()
        };
        let output = session(CalculationMode::MolesFromMass, &settings, "H2O\n9.008\n");
        assert!(output.contains("Moles of H2O in 9.008 g: 0.500000 mol"), "{}", output);
    }

    #[test]
    fn test_bad_inputs_keep_session_running() {
        let output = session(
            CalculationMode::ReagentMass,
            &Settings::default(),
            "H2O)\nZz\n\nNaCl\nlots\nNaCl\n1000\nexit\n",
        );
        assert!(output.contains("Invalid chemical formula"), "{}", output);
        assert!(output.contains("Invalid element detected in formula"), "{}", output);
        assert!(output.contains("Please enter a chemical formula."), "{}", output);
        assert!(output.contains("Please enter a valid number for moles."), "{}", output);
        assert!(output.contains("Reagent mass of 1000 mmol NaCl: 58.4400 g"), "{}", output);
    }

    #[test]
    fn test_verbose_breakdown_table() {
        let output = session(
            CalculationMode::MolarMass,
            &Settings::default(),
            "H2O -v\nexit\n",
        );
        assert!(output.contains("Molar mass of H2O: 18.016 g/mol"), "{}", output);
        assert!(output.contains("atomic mass, g/mol"), "{}", output);
        assert!(output.contains("2.016"), "{}", output);
    }

    #[test]
    fn test_split_verbose_flag() {
        assert_eq!(split_verbose_flag("H2O -v"), ("H2O", true));
        assert_eq!(split_verbose_flag("H2O-v"), ("H2O", true));
        assert_eq!(split_verbose_flag("H2O"), ("H2O", false));
    }

    #[test]
    fn test_one_report_per_compound() {
        let output = session(
            CalculationMode::ReagentMass,
            &Settings::default(),
            "NaCl\n500\nexit\n",
        );
        assert_eq!(output.matches("Molar mass of NaCl").count(), 1, "{}", output);
        assert_eq!(output.matches("Reagent mass of").count(), 1, "{}", output);
    }
}
