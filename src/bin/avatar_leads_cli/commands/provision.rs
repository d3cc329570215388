// ABOUTME: Provision command for the avatar-leads CLI
// ABOUTME: Finds or creates the knowledge document and the persona that references it

use crate::helpers::context::{api_client, load_config};
use crate::helpers::display::display_provisioned;
use avatar_leads::errors::{AppError, AppResult};
use avatar_leads::provisioning::{provision_persona, ProvisioningPlan};
use std::fs;
use std::path::Path;
use tracing::info;

/// Resolve the system prompt from the inline flag or a file
pub fn load_system_prompt(inline: Option<String>, file: Option<&Path>) -> AppResult<String> {
    let prompt = match (inline, file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
            AppError::invalid_input(format!(
                "Cannot read system prompt file {}: {e}",
                path.display()
            ))
        })?,
        (None, None) => {
            return Err(AppError::invalid_input(
                "Provide --system-prompt or --system-prompt-file",
            ))
        }
    };
    let prompt = prompt.trim().to_owned();
    if prompt.is_empty() {
        return Err(AppError::invalid_input("System prompt is empty"));
    }
    Ok(prompt)
}

/// Find or create the document and persona, then print their ids
pub async fn run(
    document_name: String,
    document_url: String,
    persona_name: String,
    system_prompt: String,
) -> AppResult<()> {
    let config = load_config(None)?;
    let api = api_client(&config);

    let plan = ProvisioningPlan {
        document_name,
        document_url,
        persona_name,
        system_prompt,
    };
    info!(
        document.name = %plan.document_name,
        persona.name = %plan.persona_name,
        "Provisioning persona"
    );

    let provisioned = provision_persona(api.as_ref(), &plan).await?;
    display_provisioned(&provisioned);
    Ok(())
}
