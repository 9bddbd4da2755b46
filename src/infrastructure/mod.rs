pub mod bootstrap;
pub mod config;
pub mod opener;
pub mod spreadsheet;
