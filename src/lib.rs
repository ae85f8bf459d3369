pub mod base;
pub mod cmd;
pub mod config;
pub mod corpus;
pub mod error;
pub mod log;
pub mod sample;
