pub mod app;
pub mod config;
pub mod delegate;
pub mod events;
pub mod selector;
pub mod sys;
pub mod timeline;
