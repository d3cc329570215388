// ABOUTME: Idempotent find-or-create provisioning of the knowledge document and persona
// ABOUTME: Re-running against an already provisioned account creates nothing new

use crate::remote::ConversationApi;
use avatar_leads_core::errors::RemoteError;
use serde::Serialize;
use tracing::info;

/// Names and content of the resources a deployment needs
#[derive(Debug, Clone)]
pub struct ProvisioningPlan {
    /// Exact name the knowledge document is stored under
    pub document_name: String,
    /// Public URL the document is ingested from
    pub document_url: String,
    /// Exact name the persona is stored under
    pub persona_name: String,
    /// Prompt the persona runs with
    pub system_prompt: String,
}

/// Identifiers resolved by [`provision_persona`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedPersona {
    /// Knowledge document id
    pub document_id: String,
    /// Persona id, the value to configure for starting conversations
    pub persona_id: String,
    /// The document did not exist and was created
    pub document_created: bool,
    /// The persona did not exist and was created
    pub persona_created: bool,
}

/// Find or create the plan's document, then find or create its persona
///
/// Existing resources are matched by exact name. An existing persona is
/// reused as-is even if it references a different document.
///
/// # Errors
///
/// Returns an error if any remote call fails or a response lacks its id
pub async fn provision_persona(
    api: &dyn ConversationApi,
    plan: &ProvisioningPlan,
) -> Result<ProvisionedPersona, RemoteError> {
    let (document, document_created) = match api.find_document_by_name(&plan.document_name).await? {
        Some(existing) => (existing, false),
        None => (
            api.create_document(&plan.document_name, &plan.document_url)
                .await?,
            true,
        ),
    };
    let document_id = document.id()?.to_owned();

    let (persona, persona_created) = match api.find_persona_by_name(&plan.persona_name).await? {
        Some(existing) => (existing, false),
        None => (
            api.create_persona(
                &plan.persona_name,
                &plan.system_prompt,
                std::slice::from_ref(&document_id),
            )
            .await?,
            true,
        ),
    };
    let persona_id = persona.id()?.to_owned();

    info!(
        document.id = %document_id,
        document.created = document_created,
        persona.id = %persona_id,
        persona.created = persona_created,
        "Persona provisioned"
    );

    Ok(ProvisionedPersona {
        document_id,
        persona_id,
        document_created,
        persona_created,
    })
}
