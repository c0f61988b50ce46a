//! External-provider sign-in and credential issuance.

pub mod google;
pub mod handshake;
pub mod provider;
