pub mod assign;
pub mod catalog;
pub mod config;
pub mod output;
pub mod scoring;
