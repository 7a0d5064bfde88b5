// This is the entry point of the signal relay bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (HTTP APIs, in-memory stores)
// - `discord/` = Discord-specific adapters (commands, announcements)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Start the poll loops and keepalive collaborators

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use crate::config::{BotConfig, SelfPing};
use crate::core::ai::{AiConfig, AiService};
use crate::core::posts::PostWatchService;
use crate::core::prices::PriceAlertService;
use crate::core::scheduler::PollSchedule;
use crate::discord::announcements::{spawn_post_relay, spawn_price_relay};
use crate::discord::Data;
use crate::infra::ai::OpenAiClient;
use crate::infra::keepalive::liveness_server;
use crate::infra::keepalive::self_ping::{spawn_self_ping, SelfPingClient};
use crate::infra::posts::{InMemoryWatermarkStore, TwitterClient};
use crate::infra::prices::{CoinGeckoClient, InMemorySnapshotStore};
use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    if let Err(err) = run().await {
        tracing::error!("❌ {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("Invalid configuration")?;

    // ========================================================================
    // KEEPALIVE
    // ========================================================================
    // Uptime monitors poll `/`; the self-ping keeps free hosts from idling us out.

    let port = config.port;
    tokio::spawn(async move {
        if let Err(err) = liveness_server::serve(port).await {
            tracing::error!("Liveness server stopped: {:#}", err);
        }
    });

    match &config.self_ping {
        SelfPing::Enabled { url } => {
            let client =
                SelfPingClient::new(url.clone()).context("Failed to create self-ping client")?;
            spawn_self_ping(client);
        }
        SelfPing::Disabled => tracing::info!("Self-ping disabled (SELF_PING_URL not set)"),
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Each service owns its store; the poll loops get shared handles.

    let price_feed = CoinGeckoClient::new().context("Failed to create CoinGecko client")?;
    let price_service = Arc::new(PriceAlertService::new(
        price_feed,
        InMemorySnapshotStore::new(),
        config.assets.clone(),
    ));

    let post_feed = TwitterClient::new(&config.twitter_bearer_token)
        .context("Failed to create Twitter client")?;
    let post_service = Arc::new(PostWatchService::new(
        post_feed,
        InMemoryWatermarkStore::new(),
        config.accounts.clone(),
        config.post_cold_start,
    ));

    let ai_client =
        OpenAiClient::new(config.openai_api_key.clone()).context("Failed to create OpenAI client")?;
    let ai_config = AiConfig {
        model: config.openai_model.clone(),
        ..AiConfig::default()
    };
    let ai_service = Arc::new(AiService::new(ai_client, ai_config));

    let announce_channel = serenity::ChannelId::new(config.announce_channel_id);
    let data = Data {
        ai: ai_service,
        announce_channel,
    };

    tracing::info!(
        assets = price_service.watchlist().len(),
        accounts = post_service.accounts().len(),
        cold_start = ?config.post_cold_start,
        "Services initialized"
    );

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let application_id = serenity::ApplicationId::new(config.application_id);
    let guild_id = serenity::GuildId::new(config.guild_id);
    let post_schedule = PollSchedule::immediate(config.post_poll_interval);
    let price_schedule = PollSchedule::immediate(config.price_poll_interval);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!("🤖 Logged in as {}", ready.user.name);

                if ready.application.id != application_id {
                    tracing::warn!(
                        configured = application_id.get(),
                        actual = ready.application.id.get(),
                        "CLIENT_ID does not match the logged-in application"
                    );
                }
                ctx.http.set_application_id(application_id);

                // Registration failure leaves the bot running without commands;
                // the relays below do not depend on them.
                tracing::info!("📡 Registering slash commands...");
                match poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    guild_id,
                )
                .await
                {
                    Ok(()) => tracing::info!("✅ Slash commands registered."),
                    Err(err) => tracing::error!(
                        guild_id = guild_id.get(),
                        error = %err,
                        "❌ Failed to register commands"
                    ),
                }

                spawn_post_relay(
                    ctx.http.clone(),
                    announce_channel,
                    post_service,
                    post_schedule,
                );
                spawn_price_relay(
                    ctx.http.clone(),
                    announce_channel,
                    price_service,
                    price_schedule,
                );

                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILDS;
    let mut client = serenity::ClientBuilder::new(&config.bot_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
