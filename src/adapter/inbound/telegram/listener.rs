//! Long-polling listener for chat messages.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tracing::{error, info, warn};

use crate::app::broadcast::blocking;
use crate::app::Broadcaster;
use crate::domain::{Audience, NewSubscriber};

use super::keyboard::reply_keyboard;
use super::request::{bot_commands, parse_request};
use super::reply::answer;

/// Answer chat messages until the dispatcher stops.
pub async fn listen(bot: Bot, broadcaster: Arc<Broadcaster>) {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    match bot.get_me().await {
        Ok(me) => info!(username = %me.username(), "Telegram listener started"),
        Err(e) => warn!(error = %e, "Failed to fetch bot identity"),
    }

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let broadcaster = Arc::clone(&broadcaster);
        async move {
            handle_message(&bot, &broadcaster, &msg).await;
            respond(())
        }
    })
    .await;
}

async fn handle_message(bot: &Bot, broadcaster: &Broadcaster, msg: &Message) {
    let chat = new_subscriber(msg);
    let store = broadcaster.subscribers();
    let registration = chat.clone();
    if let Err(e) = blocking(move || store.register(&registration)).await {
        warn!(telegram_id = chat.telegram_id, error = %e, "Failed to register subscriber");
        return;
    }

    let request = parse_request(msg.text().unwrap_or_default());
    let reply = answer(broadcaster, request, &chat.first_name).await;

    if let Some((code, interval)) = reply.chart {
        let audience = Audience::Chat(chat.telegram_id);
        if let Err(e) = broadcaster.send_chart(audience, code, interval).await {
            warn!(telegram_id = chat.telegram_id, error = %e, "Failed to send chart");
        }
    }

    if reply.text.is_empty() {
        return;
    }

    let sent = bot
        .send_message(msg.chat.id, reply.text)
        .parse_mode(ParseMode::MarkdownV2)
        .reply_markup(reply_keyboard())
        .await;
    if let Err(e) = sent {
        error!(telegram_id = chat.telegram_id, error = %e, "Failed to send reply");
    }
}

/// Sender details as stored for a subscriber.
fn new_subscriber(msg: &Message) -> NewSubscriber {
    NewSubscriber {
        telegram_id: msg.chat.id.0,
        first_name: msg.chat.first_name().unwrap_or_default().to_string(),
        last_name: msg.chat.last_name().unwrap_or_default().to_string(),
        username: msg.chat.username().unwrap_or_default().to_string(),
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
