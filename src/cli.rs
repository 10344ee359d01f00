pub mod cli_calculations;
pub mod cli_main;
pub mod cli_settings;
