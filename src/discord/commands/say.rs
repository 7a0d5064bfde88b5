use crate::discord::commands::Context;
use crate::discord::Error;

/// Say something as the bot
#[poise::command(slash_command)]
pub async fn say(
    ctx: Context<'_>,
    #[description = "Message for the bot to say"] message: String,
) -> Result<(), Error> {
    // Acknowledge privately, then drop the acknowledgment so the invoker leaves no trace.
    ctx.defer_ephemeral().await?;
    if let poise::Context::Application(app_ctx) = ctx {
        app_ctx.interaction.delete_response(ctx.http()).await?;
    }

    let channel_id = ctx.data().announce_channel;
    if let Err(err) = channel_id.say(ctx.http(), message).await {
        tracing::warn!(
            channel_id = channel_id.get(),
            user_id = ctx.author().id.get(),
            error = %err,
            "Failed to post /say message"
        );
    }

    Ok(())
}
