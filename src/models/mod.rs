//! Data models for profile lookups.

mod platform;
mod profile;

pub use platform::{LookupRequest, PlatformId};
pub use profile::{Profile, Stat, StatValue, BIO_LABEL};
