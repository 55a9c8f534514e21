//! content-service: generates social media posts through a chat-completion API.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
