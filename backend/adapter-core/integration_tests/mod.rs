mod adapters;
mod config;
mod error;
mod executor;
