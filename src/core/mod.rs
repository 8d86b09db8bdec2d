pub mod access;
pub mod create;
pub mod del;
pub mod link;
pub mod log;
pub mod show;
pub mod update;
