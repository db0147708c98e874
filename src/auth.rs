//! Auth-domain identifiers, handshake tokens, and bearer header encodings.

pub mod id;
pub mod token;

pub use id::*;
pub use token::{access::*, bearer::*, request::*, secret::*};
