//! Provider-facing descriptors (data), strategies (error policy), and operations (behavior).
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering HTTPS-only
//! endpoints, the OAuth 1 protocol edition, and signing quirks. `strategy` defines
//! [`ProviderStrategy`], an HTTP-client-agnostic hook that classifies failed provider calls.
//! `operations` defines [`ProviderOperations`], the capability interface the exchange flow is
//! written against.

pub mod descriptor;
pub mod operations;
pub mod strategy;

pub use descriptor::*;
pub use operations::*;
pub use strategy::*;
