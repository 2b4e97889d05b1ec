//! HTTP request pipeline
//!
//! The single choke point for every backend call: bearer-token attachment,
//! per-attempt deadline, outcome classification, linear-backoff retry, and
//! success-envelope unwrapping.

pub mod client;
pub mod error_body;

pub use client::HttpClient;
