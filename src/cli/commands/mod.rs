pub mod auth;
pub mod db;
pub mod definition;
pub mod score;
pub mod server;
pub mod subject;
