//! Core library for the `apiprobe` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, environment interpolation, the request executor, saved
//! request collections, and the stress engine with its statistics reporter.
//! The primary user-facing interface is the `apiprobe` command-line
//! application; library APIs may evolve as the CLI grows.
pub mod app;
pub mod args;
pub mod collection;
pub mod entry;
pub mod envfile;
pub mod error;
pub mod http;
pub mod logger;
pub mod stress;
