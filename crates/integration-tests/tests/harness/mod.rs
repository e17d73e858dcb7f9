#![allow(dead_code)]

pub mod config;
pub mod mock_openai;
pub mod server;
pub mod session;
