mod config;
mod contact_flow;
mod content;
