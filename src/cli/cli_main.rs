use super::cli_calculations::{calculation_menu, print_molar_masses};
use super::cli_settings::settings_menu;
use crate::MolarMass::calculation::CalculationMode;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Molar mass calculator. Without formulae it starts the interactive menu.
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Write logs to a file in addition to the console output
    #[arg(long = "log", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Formulae to calculate at once, e.g. `Mg(OH)2 NaCl`
    #[arg(value_name = "FORMULA")]
    pub formulae: Vec<String>,
}

/// Runs one-shot mode for formulae given on the command line, the menu otherwise.
/// Returns false if any one-shot formula was rejected.
pub fn run<R: BufRead, W: Write>(args: &CliArgs, input: &mut R, out: &mut W) -> io::Result<bool> {
    if args.formulae.is_empty() {
        run_interactive_menu(input, out)?;
        Ok(true)
    } else {
        print_molar_masses(&args.formulae, out)
    }
}

pub fn run_interactive_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    show_banner(out)?;
    loop {
        show_main_menu(out)?;
        let Some(choice) = read_line(input)? else {
            break;
        };
        match choice.trim() {
            "1" => calculation_menu(CalculationMode::MolarMass, input, out)?,
            "2" => calculation_menu(CalculationMode::ReagentMass, input, out)?,
            "3" => calculation_menu(CalculationMode::MolesFromMass, input, out)?,
            "4" => settings_menu(input, out)?,
            "0" => {
                writeln!(out, "Goodbye!")?;
                break;
            }
            _ => writeln!(out, "Please enter a valid option.")?,
        }
    }
    Ok(())
}
/* colors
Blue (\x1b[34m) - banner

Yellow (\x1b[33m) - menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - back to normal after each colored section
*/
fn show_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\x1b[34m\n Molar mass calculator\x1b[0m
-----------------------------------------------------------------------
>> Contains atomic masses up to Uranium
>> Based on Atomic Weights of the Elements 1995 published by IUPAC
>> Type the formula for the compound as you would search for it, e.g. Mg(OH)2
>> Add -v after a formula for the per-element breakdown"
    )
}

fn show_main_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "-----------------------------------------------------------------------"
    )?;
    writeln!(out, "\x1b[33m[1] Calculate molar mass only\x1b[0m")?;
    writeln!(out, "\x1b[33m[2] Calculate molar mass and reagent mass\x1b[0m")?;
    writeln!(out, "\x1b[33m[3] Calculate moles from reagent mass\x1b[0m")?;
    writeln!(out, "\x1b[33m[4] Settings\x1b[0m")?;
    writeln!(out, "\x1b[33m[0] Exit\x1b[0m")?;
    prompt(out, "Select an option: ")
}

pub(crate) fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "\x1b[36m{}\x1b[0m", text)?;
    out.flush()
}

/// next line without the line break, `None` at end of input
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
