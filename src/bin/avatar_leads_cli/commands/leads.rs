// ABOUTME: Lead listing command for the avatar-leads CLI
// ABOUTME: Reads the lead store only; needs no remote API credentials

use crate::helpers::display::display_leads;
use avatar_leads::config::AppConfig;
use avatar_leads::database::LeadStore;
use avatar_leads::errors::AppResult;

/// Print stored leads, newest first, or every lead of one conversation
pub async fn list(
    database_url: Option<String>,
    limit: u32,
    conversation_id: Option<&str>,
    json: bool,
) -> AppResult<()> {
    let database_url = database_url.unwrap_or_else(AppConfig::database_url_from_env);
    let store = LeadStore::new(&database_url).await?;

    let leads = match conversation_id {
        Some(id) => store.leads_for_conversation(id).await?,
        None => store.list_leads(limit).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
    } else {
        display_leads(&leads);
    }
    Ok(())
}
