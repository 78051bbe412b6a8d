//! src/net.rs
//!
//! Network surface: the remote control server.

pub mod remote;

pub use remote::remote_server;
