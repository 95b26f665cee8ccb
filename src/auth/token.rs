//! Bearer-token representations kept inside a single tenant client.

pub mod cached;
pub mod secret;
