//! NEM2 CLI LIBRARY
//!
//! This library provides the elements to build, sign and announce account
//! restriction transactions from the command line.

pub mod adapter;
pub mod command;
pub mod model;
pub mod service;

pub type Result<T> = anyhow::Result<T>;
