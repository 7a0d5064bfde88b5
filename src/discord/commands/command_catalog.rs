// Discord commands module.
// Each command gets its own file; shared command state lives here.

pub mod ask;
pub mod say;

use crate::core::ai::AiService;
use crate::infra::ai::OpenAiClient;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// State shared by every command invocation.
pub struct Data {
    pub ai: Arc<AiService<OpenAiClient>>,
    /// Channel that `/say` posts into.
    pub announce_channel: serenity::ChannelId,
}

/// Every command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![say::say(), ask::ask()]
}
