// ABOUTME: Output formatting helpers for the avatar-leads CLI
// ABOUTME: Consistent console rendering of captures, leads, and provisioning results

use avatar_leads::capture::CaptureOutcome;
use avatar_leads::models::Lead;
use avatar_leads::provisioning::ProvisionedPersona;
use avatar_leads::webhook::DeliveryOutcome;

const RULE_WIDTH: usize = 60;

fn field(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Print a provisioning summary
pub fn display_provisioned(result: &ProvisionedPersona) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Provisioning complete");
    println!(
        "   Document ID: {} ({})",
        result.document_id,
        if result.document_created { "created" } else { "existing" }
    );
    println!(
        "   Persona ID:  {} ({})",
        result.persona_id,
        if result.persona_created { "created" } else { "existing" }
    );
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("Set TAVUS_PERSONA_ID={} in your environment.", result.persona_id);
}

/// Print the result of a capture
pub fn display_capture(outcome: &CaptureOutcome) {
    println!("Lead {} stored", outcome.lead.id);
    println!("   Conversation: {}", field(outcome.lead.conversation_id.as_deref()));
    println!("   Name:         {}", field(outcome.lead.name.as_deref()));
    println!("   Email:        {}", field(outcome.lead.email.as_deref()));
    let delivery = match &outcome.delivery {
        DeliveryOutcome::Skipped => "not configured".to_owned(),
        DeliveryOutcome::Delivered { status } => format!("delivered ({status})"),
        DeliveryOutcome::Failed { reason } => format!("failed ({reason})"),
    };
    println!("   Webhook:      {delivery}");
    if outcome.parsed.is_empty() {
        println!("No name or email was found in the transcript.");
    }
}

/// Print leads as a fixed-width table
pub fn display_leads(leads: &[Lead]) {
    if leads.is_empty() {
        println!("No leads stored.");
        return;
    }
    println!(
        "{:>6}  {:<20}  {:<24}  {:<28}  {}",
        "ID", "CAPTURED (UTC)", "NAME", "EMAIL", "CONVERSATION"
    );
    for lead in leads {
        println!(
            "{:>6}  {:<20}  {:<24}  {:<28}  {}",
            lead.id.get(),
            lead.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            field(lead.name.as_deref()),
            field(lead.email.as_deref()),
            field(lead.conversation_id.as_deref()),
        );
    }
}
