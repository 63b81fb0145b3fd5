//! Domain types and models

pub mod contact;

pub use contact::Contact;
