pub mod campaign_commands;
pub mod contact_commands;
pub mod core_commands;
pub mod logging;
pub mod types;

pub(crate) mod state;

pub use state::AppState;
