pub mod api;
pub mod client;
pub mod config;
pub mod dirs;
pub mod display;
pub mod filelock;
pub mod logs;
pub mod pets;
pub mod poller;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod table;
pub mod time;
