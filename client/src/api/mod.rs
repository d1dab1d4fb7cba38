//! Business API access: HTTP client and wire documents

pub mod client;
pub mod dto;

pub use client::ApiClient;
