//! Short link allocation and listing service.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, StoreError};
use crate::utils::code_generator::CodeGenerator;

/// Page size ceiling for owner listings.
const MAX_PAGE_SIZE: i64 = 100;

/// Tunables for the allocation retry loop.
#[derive(Debug, Clone, Copy)]
pub struct CodeSettings {
    /// Length of generated codes. With the base62 alphabet, length 7
    /// gives a keyspace of 62^7 (about 3.5 * 10^12).
    pub code_length: usize,
    /// Insert attempts before giving up with
    /// [`AppError::AllocationExhausted`].
    pub max_attempts: u32,
}

impl Default for CodeSettings {
    fn default() -> Self {
        Self {
            code_length: 7,
            max_attempts: 5,
        }
    }
}

/// Service for allocating short links and listing an owner's links.
///
/// Allocation works by insertion, not by checking first: each attempt
/// generates a fresh code and lets the store's uniqueness constraint
/// arbitrate. A collision surfaces as [`StoreError::CodeTaken`], the only
/// error class the loop absorbs and retries; everything else aborts the
/// loop and propagates.
pub struct LinkService<R: UrlRepository, G: CodeGenerator> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: CodeSettings,
}

impl<R: UrlRepository, G: CodeGenerator> LinkService<R, G> {
    /// Creates a link service with default code settings.
    pub fn new(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self::with_settings(repository, generator, CodeSettings::default())
    }

    /// Creates a link service with explicit code settings.
    pub fn with_settings(repository: Arc<R>, generator: Arc<G>, settings: CodeSettings) -> Self {
        Self {
            repository,
            generator,
            settings,
        }
    }

    /// Allocates a short link for `target_url` owned by `owner_id`.
    ///
    /// The target URL is validated before any store call; it is stored
    /// as given, not rewritten.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidTargetUrl`] if the URL is empty, malformed,
    ///   or not http(s)
    /// - [`AppError::AllocationExhausted`] if every generated code
    ///   collided
    /// - [`AppError::CodeGen`] / [`AppError::Store`] propagated unchanged
    pub async fn create_short_link(
        &self,
        owner_id: i64,
        target_url: &str,
    ) -> Result<ShortLink, AppError> {
        validate_target_url(target_url)?;

        for attempt in 1..=self.settings.max_attempts {
            let code = self.generator.generate(self.settings.code_length)?;

            let new_link = NewShortLink {
                owner_id,
                target_url: target_url.to_string(),
                code,
            };

            match self.repository.insert_unique(new_link).await {
                Ok(link) => return Ok(link),
                Err(StoreError::CodeTaken) => {
                    metrics::counter!("shortlink_code_collisions_total").increment(1);
                    debug!(attempt, "generated code already taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        metrics::counter!("shortlink_allocations_exhausted_total").increment(1);
        Err(AppError::AllocationExhausted {
            attempts: self.settings.max_attempts,
        })
    }

    /// Lists an owner's links, newest first.
    ///
    /// `page` is 1-indexed and clamped to at least 1; `page_size` is
    /// clamped to `1..=100` so an unbounded scan cannot be requested by
    /// accident.
    pub async fn list_owner_links(
        &self,
        owner_id: i64,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<ShortLink>, AppError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * page_size;

        let links = self
            .repository
            .list_by_owner(owner_id, page_size, offset)
            .await?;

        Ok(links)
    }
}

/// Validates that a target URL is a non-empty http(s) URL with a host.
///
/// Rejects dangerous schemes (`javascript:`, `data:`, `file:`, ...) along
/// with anything unparsable.
fn validate_target_url(target_url: &str) -> Result<(), AppError> {
    if target_url.is_empty() {
        return Err(AppError::InvalidTargetUrl("URL cannot be empty".into()));
    }

    let parsed =
        Url::parse(target_url).map_err(|e| AppError::InvalidTargetUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::InvalidTargetUrl(format!(
                "scheme must be http or https, got '{other}'"
            )));
        }
    }

    if parsed.host_str().is_none() {
        return Err(AppError::InvalidTargetUrl("URL must have a host".into()));
    }

    Ok(())
}
