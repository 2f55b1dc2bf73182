//! statscout - profile lookups for chat-bot stat commands.
//!
//! Fetches a third-party profile page, extracts a handful of fields with a
//! per-platform scraper, normalizes them into a [`Profile`] and maps that to
//! a rich chat message. Every failure comes back as a [`LookupError`].

pub mod config;
pub mod embed;
pub mod lookup;
pub mod models;
pub mod scrapers;

pub use config::Settings;
pub use embed::Embed;
pub use lookup::{LookupError, ProfileLookup};
pub use models::{LookupRequest, PlatformId, Profile, Stat, StatValue};
pub use scrapers::{Fetcher, HttpFetcher, RawDocument};
