pub mod catalog;
pub mod config;
pub mod recommend;
pub mod session;
