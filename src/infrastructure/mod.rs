pub mod auth;
pub mod cleanup;
pub mod config;
pub mod db;
pub mod password;
pub mod repositories;
pub mod state;
