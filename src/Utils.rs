/// logger setup for the binary (terminal and optional log file)
pub mod logger;
