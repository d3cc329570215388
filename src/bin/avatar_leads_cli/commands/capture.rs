// ABOUTME: Lead capture commands for the avatar-leads CLI
// ABOUTME: Captures from a remote conversation or from a transcript piped on stdin

use crate::helpers::context::{
    api_client, capture_service, load_capture_config, load_config, local_capture_service,
};
use crate::helpers::display::display_capture;
use avatar_leads::errors::{AppError, AppResult};
use avatar_leads::transcript::TranscriptExtractor;
use tokio::io::AsyncReadExt;

/// Capture a lead from a conversation's transcript
pub async fn from_conversation(
    database_url: Option<String>,
    conversation_id: &str,
    from_detail: bool,
) -> AppResult<()> {
    let conversation_id = conversation_id.trim();
    let config = load_config(database_url)?;
    let extractor = TranscriptExtractor::new(api_client(&config));
    let service = capture_service(&config, extractor.clone()).await?;

    let outcome = if from_detail {
        let transcript = extractor.extract_from_conversation(conversation_id).await?;
        service
            .capture_from_transcript(Some(conversation_id), transcript)
            .await?
    } else {
        service.capture_from_conversation(conversation_id).await?
    };

    display_capture(&outcome);
    Ok(())
}

/// Capture a lead from transcript text read on stdin; needs no API key
pub async fn from_stdin(database_url: Option<String>, conversation_id: Option<&str>) -> AppResult<()> {
    let mut transcript = String::new();
    tokio::io::stdin()
        .read_to_string(&mut transcript)
        .await
        .map_err(|e| AppError::invalid_input(format!("Cannot read transcript from stdin: {e}")))?;
    if transcript.trim().is_empty() {
        return Err(AppError::invalid_input("Transcript on stdin is empty"));
    }

    let config = load_capture_config(database_url)?;
    let service = local_capture_service(&config).await?;

    let outcome = service
        .capture_from_transcript(conversation_id, transcript)
        .await?;
    display_capture(&outcome);
    Ok(())
}
