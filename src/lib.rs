//! Core library for the `tablewatch` CLI.
//!
//! This crate provides the building blocks used by the binary: the DynamoDB
//! metric catalog, dimension expansion and query windows, normalization and
//! derived ratios, the concurrent collector, AWS adapters, configuration, and
//! output sinks. The primary user-facing interface is the `tablewatch`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod aws;
pub mod catalog;
pub mod collector;
pub mod config;
pub mod error;
pub mod metrics;
pub mod sinks;
