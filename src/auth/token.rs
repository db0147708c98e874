//! Token models exchanged during a handshake.

pub mod access;
pub mod bearer;
pub mod request;
pub mod secret;
