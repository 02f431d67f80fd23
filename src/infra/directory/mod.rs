// Infra implementation of the venue directory port.

pub mod directory_client;

pub use directory_client::*;
