pub mod board;
pub mod champions;
pub mod config;
pub mod countdown;
pub mod demo_feed;
pub mod http_client;
pub mod models;
pub mod players_fetch;
pub mod provider;
pub mod snapshot;
pub mod state;
