pub mod archive;
pub mod batch;
pub mod config;
pub mod error;
pub mod format;
pub mod processor;
pub mod remover;
