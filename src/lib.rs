pub mod artifact;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod repo;
pub mod result;
pub mod spec_path;
