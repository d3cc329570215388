// ABOUTME: Domain models shared between the remote client, parser, store, and forwarder
// ABOUTME: Re-exports lead records and remote conversational API records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod lead;
mod remote;

pub use lead::{Lead, LeadId, NewLead, ParsedLead};
pub use remote::{
    Conversation, ConversationMessage, CreateConversationRequest, Document,
    EndConversationAck, NamedResource, Persona, ResourceCollection,
};
