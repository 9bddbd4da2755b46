pub mod auto_advance;
pub mod campaign_runner;
pub mod contact_loader;
pub mod message_builder;
