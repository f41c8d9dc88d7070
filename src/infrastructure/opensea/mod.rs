//! OpenSea marketplace HTTP client.

mod client;
mod dto;

pub use client::{DEFAULT_API_BASE, OpenSeaClient};
