pub mod use_cases;

pub use use_cases::campaign_runner::CampaignRunner;
pub use use_cases::contact_loader::ContactLoader;
pub use use_cases::message_builder::MessageBuilder;
