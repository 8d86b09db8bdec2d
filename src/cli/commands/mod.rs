pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod init;
pub mod log;
pub mod show;
pub mod update;
