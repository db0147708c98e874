//! Extension contracts for presenting issued credentials on outbound requests.

pub mod request_signer;

pub use request_signer::*;
