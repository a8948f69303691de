pub mod banner;
pub mod commands;
pub mod config;
pub mod consts;
pub mod dashboard;
pub mod engine;
pub mod events;
pub mod identity;
pub mod list;
pub mod render;
pub mod responder;
