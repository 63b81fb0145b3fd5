//! DummyJSON user-directory integration

mod client;
mod types;

pub use client::DummyJsonClient;
