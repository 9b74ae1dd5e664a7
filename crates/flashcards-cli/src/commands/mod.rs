pub mod card;
pub mod config;
pub mod status;
pub mod transfer;
