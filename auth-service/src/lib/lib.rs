pub mod config;
pub mod dotenv;
pub mod inbound;
