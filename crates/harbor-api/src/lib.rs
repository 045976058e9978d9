pub mod auth;
pub mod bank;
pub mod error;
pub mod kiosks;
pub mod mailboxes;
pub mod messages;
pub mod middleware;
pub mod profile;
pub mod routes;
pub mod state;
