// ABOUTME: avatar-leads CLI - thin presentation layer over the lead capture core
// ABOUTME: Provisions the persona, starts and ends conversations, captures and lists leads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Find or create the knowledge document and persona
//! avatar-leads provision --document-name "Product Brochure" \
//!     --document-url https://example.com/brochure.txt \
//!     --persona-name "Product Assistant" --system-prompt-file prompt.txt
//!
//! # Start a conversation and print its join URL
//! avatar-leads start
//!
//! # End it (already-ended conversations are not an error)
//! avatar-leads end c123
//!
//! # Capture a lead from its transcript
//! avatar-leads capture c123
//!
//! # Capture from a transcript on stdin
//! echo "my name is Ada, ada@example.com" | avatar-leads capture-text
//!
//! # Show the latest leads
//! avatar-leads leads --limit 10
//! ```

mod commands;
mod helpers;

use avatar_leads::errors::AppResult;
use avatar_leads::logging::LoggingConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "avatar-leads",
    about = "Conversational avatar lead capture CLI",
    long_about = "Provision personas, run conversations, and capture leads from their transcripts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Lead store URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Find or create the knowledge document and persona
    Provision {
        /// Knowledge document name (matched exactly)
        #[arg(long)]
        document_name: String,

        /// Public URL the document is ingested from
        #[arg(long)]
        document_url: String,

        /// Persona name (matched exactly)
        #[arg(long)]
        persona_name: String,

        /// System prompt text
        #[arg(long, conflicts_with = "system_prompt_file")]
        system_prompt: Option<String>,

        /// File containing the system prompt
        #[arg(long)]
        system_prompt_file: Option<PathBuf>,
    },

    /// Start a conversation and print its join URL
    Start {
        /// Persona override (defaults to the configured persona)
        #[arg(long)]
        persona_id: Option<String>,

        /// Label shown in the remote dashboard
        #[arg(long)]
        name: Option<String>,
    },

    /// End a conversation
    End {
        /// Conversation to end
        conversation_id: String,
    },

    /// Capture a lead from a conversation's transcript
    Capture {
        /// Conversation to read
        conversation_id: String,

        /// Read the transcript from the conversation record instead of its messages
        #[arg(long)]
        from_detail: bool,
    },

    /// Capture a lead from a transcript read on stdin
    CaptureText {
        /// Conversation the transcript belongs to
        #[arg(long)]
        conversation_id: Option<String>,
    },

    /// List stored leads
    Leads {
        /// Maximum number of leads to show, newest first
        #[arg(long, default_value = "20")]
        limit: u32,

        /// Only leads from this conversation
        #[arg(long)]
        conversation_id: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let database_url = cli.database_url;
    match cli.command {
        Command::Provision {
            document_name,
            document_url,
            persona_name,
            system_prompt,
            system_prompt_file,
        } => {
            let system_prompt =
                commands::provision::load_system_prompt(system_prompt, system_prompt_file.as_deref())?;
            commands::provision::run(document_name, document_url, persona_name, system_prompt).await
        }
        Command::Start { persona_id, name } => {
            commands::conversation::start(persona_id.as_deref(), name).await
        }
        Command::End { conversation_id } => commands::conversation::end(&conversation_id).await,
        Command::Capture {
            conversation_id,
            from_detail,
        } => commands::capture::from_conversation(database_url, &conversation_id, from_detail).await,
        Command::CaptureText { conversation_id } => {
            commands::capture::from_stdin(database_url, conversation_id.as_deref()).await
        }
        Command::Leads {
            limit,
            conversation_id,
            json,
        } => commands::leads::list(database_url, limit, conversation_id.as_deref(), json).await,
    }
}
