use super::cli_main::{prompt, read_line};
use crate::settings::{Settings, SettingsManager, with_settings_mut};
use prettytable::{Table, row};
use std::io::{self, BufRead, Write};

pub fn settings_menu<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<()> {
    with_settings_mut(|manager| settings_session(manager, input, out))
}

/// Shows the settings and applies "<name> <value>" lines until "exit".
pub fn settings_session<R: BufRead, W: Write>(
    manager: &mut SettingsManager,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        settings_table(manager).print(out)?;
        writeln!(
            out,
            "Type '<setting> <value>' to change a setting (e.g. 'default_unit mol'),"
        )?;
        writeln!(out, "'reset' to restore defaults or 'exit' to return.")?;
        prompt(out, "> ")?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        let line = line.trim();
        match line {
            "exit" => return Ok(()),
            "reset" => match manager.reset_to_defaults() {
                Ok(()) => writeln!(out, "Settings reset to defaults.")?,
                Err(e) => writeln!(out, "Failed to save settings: {}", e)?,
            },
            _ => {
                let mut parts = line.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(key), Some(value), None) => match manager.set_value(key, value) {
                        Ok(()) => writeln!(out, "Settings saved successfully.")?,
                        Err(e) => writeln!(out, "Failed to save settings: {}", e)?,
                    },
                    _ => writeln!(out, "Expected '<setting> <value>'.")?,
                }
            }
        }
    }
}

fn settings_table(manager: &SettingsManager) -> Table {
    let mut table = Table::new();
    table.add_row(row!["setting", "value"]);
    for key in Settings::KEYS {
        table.add_row(row![key, manager.get_value(key).unwrap_or_default()]);
    }
    table
}
