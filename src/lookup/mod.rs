//! Profile lookup pipeline.
//!
//! A lookup runs `fetch -> extract -> normalize` once and stops at the first
//! failing stage. Nothing is retried, cached or shared between lookups.

mod error;

pub use error::LookupError;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::models::{LookupRequest, Profile};
use crate::scrapers::{scraper_for, Fetcher, IdentityPolicy, ProfileScraper, RawDocument, RawFields};

/// Pipeline stage, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Extracting,
    Normalizing,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Fetching => "fetching",
            Stage::Extracting => "extracting",
            Stage::Normalizing => "normalizing",
        }
    }
}

/// Drives profile lookups over a [`Fetcher`].
pub struct ProfileLookup<F> {
    fetcher: F,
    identity: IdentityPolicy,
}

impl<F: Fetcher> ProfileLookup<F> {
    /// Create a lookup that rotates browser identities per request.
    pub fn new(fetcher: F) -> Self {
        Self::with_identity(fetcher, IdentityPolicy::Rotate)
    }

    pub fn with_identity(fetcher: F, identity: IdentityPolicy) -> Self {
        Self { fetcher, identity }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Look up one profile.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<Profile, LookupError> {
        let platform = request.platform;
        let identifier = request
            .normalized_identifier()
            .ok_or(LookupError::EmptyOrInvalidIdentifier)?;
        let scraper = scraper_for(platform);
        let url = scraper.profile_url(identifier);

        debug!(platform = %platform, stage = Stage::Fetching.as_str(), "GET {}", url);
        let doc = self
            .fetcher
            .fetch(&url, self.identity.next_identity())
            .await
            .map_err(LookupError::from)
            .inspect_err(|e| log_failure(request, Stage::Fetching, e))?;

        let profile = run_local_stages(scraper, identifier, doc)
            .inspect_err(|e| log_failure(request, e.1, &e.0))
            .map_err(|(e, _)| e)?;

        info!(
            platform = %platform,
            identifier,
            stats = profile.stats.len(),
            "Lookup succeeded"
        );
        Ok(profile)
    }
}

/// Extract and normalize, converting panics into `InternalFailure`.
fn run_local_stages(
    scraper: &dyn ProfileScraper,
    identifier: &str,
    doc: RawDocument,
) -> Result<Profile, (LookupError, Stage)> {
    debug!(
        platform = %scraper.platform(),
        stage = Stage::Extracting.as_str(),
        bytes = doc.text.len(),
        "Extracting from {}",
        doc.final_url
    );
    let fields: RawFields = guarded(|| scraper.extract(&doc)).map_err(|e| (e, Stage::Extracting))?;
    drop(doc);

    debug!(
        platform = %scraper.platform(),
        stage = Stage::Normalizing.as_str(),
        fields = fields.len(),
        "Normalizing"
    );
    guarded(move || scraper.normalize(identifier, fields)).map_err(|e| (e, Stage::Normalizing))
}

/// Run a synchronous stage, surfacing a panic as `InternalFailure`.
fn guarded<T>(stage: impl FnOnce() -> Result<T, LookupError>) -> Result<T, LookupError> {
    match panic::catch_unwind(AssertUnwindSafe(stage)) {
        Ok(result) => result,
        Err(payload) => Err(LookupError::internal(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic with non-string payload".to_string()
    }
}

fn log_failure(request: &LookupRequest, stage: Stage, err: &LookupError) {
    warn!(
        platform = %request.platform,
        identifier = %request.identifier,
        stage = stage.as_str(),
        kind = err.kind(),
        "Lookup failed: {}",
        err
    );
}
