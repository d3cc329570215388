// ABOUTME: Command modules for the avatar-leads CLI
// ABOUTME: One module per concern; each loads only the configuration it needs

pub mod capture;
pub mod conversation;
pub mod leads;
pub mod provision;
