// ABOUTME: Conversation lifecycle commands for the avatar-leads CLI
// ABOUTME: Starts a conversation with the configured persona and ends conversations by id

use crate::helpers::context::{api_client, load_config};
use avatar_leads::errors::AppResult;
use avatar_leads::models::EndConversationAck;
use avatar_leads::remote::ConversationApi;

/// Start a conversation and print its id and join URL
pub async fn start(persona_id: Option<&str>, name: Option<String>) -> AppResult<()> {
    let config = load_config(None)?;
    let api = api_client(&config);

    let mut request = config.defaults.conversation_request(persona_id)?;
    request.conversation_name = name;

    let conversation = api.create_conversation(&request).await?;
    println!("Conversation ID: {}", conversation.id()?);
    match conversation.conversation_url.as_deref() {
        Some(url) => println!("Join URL:        {url}"),
        None => println!("Join URL:        (not provided)"),
    }
    if request.callback_url.is_none() {
        println!("No callback URL configured; run `capture` once the conversation ends.");
    }
    Ok(())
}

/// End a conversation; one that already ended is reported, not failed
pub async fn end(conversation_id: &str) -> AppResult<()> {
    let config = load_config(None)?;
    let api = api_client(&config);

    match api.end_conversation(conversation_id).await? {
        EndConversationAck::Ended => println!("Conversation {conversation_id} ended."),
        EndConversationAck::AlreadyEnded => {
            println!("Conversation {conversation_id} had already ended.");
        }
    }
    Ok(())
}
