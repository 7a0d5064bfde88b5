use crate::discord::commands::Context;
use crate::discord::Error;

/// Discord rejects messages longer than this many characters.
const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Ask OpenAI anything
#[poise::command(slash_command)]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Your question to OpenAI"] prompt: String,
) -> Result<(), Error> {
    // Public "thinking..." placeholder while the model answers
    ctx.defer().await?;

    let answer = ctx.data().ai.ask(&prompt).await;
    for chunk in split_for_discord(&answer) {
        ctx.say(chunk).await?;
    }

    Ok(())
}

/// Split `text` into pieces that fit in one Discord message, on char boundaries.
fn split_for_discord(text: &str) -> Vec<String> {
    text.chars()
        .collect::<Vec<char>>()
        .chunks(DISCORD_MESSAGE_LIMIT)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
