pub mod config;
pub mod logging;

pub mod cache;
pub mod checksum;
pub mod downloader;
pub mod error;
pub mod manifest;
pub mod platform;
pub mod resolver;
pub mod retry;
pub mod storage;
pub mod verify;
