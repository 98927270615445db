//! Link lifecycle engine: creation, listing, mutation, deletion, resolution.

use std::sync::Arc;

use crate::domain::entities::{LinkPatch, NewShortLink, ShortLink};
use crate::domain::prober::UrlProber;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_alias};
use crate::utils::url_validator::validate_target_url;
use serde_json::json;

/// Service enforcing every rule around short link records.
///
/// Ownership and uniqueness invariants live here; the repository is a plain
/// storage boundary and the prober is a best-effort admission check.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    prober: Arc<dyn UrlProber>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkRepository>, prober: Arc<dyn UrlProber>) -> Self {
        Self { links, prober }
    }

    /// Creates a short link, optionally owned and optionally custom-aliased.
    ///
    /// # Admission checks, in order
    ///
    /// 1. `original_url` must parse with an `http`/`https` scheme.
    /// 2. The target must answer the reachability probe; any HTTP response
    ///    counts, only transport failure rejects. The probe is skipped when
    ///    the scheme check already failed.
    ///
    /// # Code resolution
    ///
    /// A custom alias is pre-checked against the store and rejected with
    /// [`AppError::Conflict`] when taken. A generated code is inserted
    /// without a pre-check; if the insert trips the uniqueness constraint,
    /// one fresh code is generated and retried before the conflict is
    /// surfaced to the caller.
    ///
    /// # Ownership
    ///
    /// `owner_id` is attached verbatim; `None` produces an anonymous link.
    pub async fn create_short_link(
        &self,
        original_url: String,
        custom_alias: Option<String>,
        tags: Vec<String>,
        owner_id: Option<i64>,
    ) -> Result<ShortLink, AppError> {
        validate_target_url(&original_url)?;

        if !self.prober.probe(&original_url).await {
            return Err(AppError::unreachable(
                "URL is not reachable. Please check the link and try again.",
                json!({ "url": original_url }),
            ));
        }

        if let Some(alias) = custom_alias {
            validate_custom_alias(&alias)?;

            if self.links.find_by_code(&alias).await?.is_some() {
                return Err(AppError::conflict(
                    "Alias already in use",
                    json!({ "alias": alias }),
                ));
            }

            return self
                .links
                .create(NewShortLink {
                    code: alias,
                    original_url,
                    owner_id,
                    tags,
                })
                .await;
        }

        // Generated codes skip the pre-check; the store uniqueness constraint
        // backstops, with a single regenerate-and-retry on collision.
        let first_attempt = self
            .links
            .create(NewShortLink {
                code: generate_code(),
                original_url: original_url.clone(),
                owner_id,
                tags: tags.clone(),
            })
            .await;

        match first_attempt {
            Err(AppError::Conflict { .. }) => {
                self.links
                    .create(NewShortLink {
                        code: generate_code(),
                        original_url,
                        owner_id,
                        tags,
                    })
                    .await
            }
            other => other,
        }
    }

    /// Lists every link owned by the requester.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<ShortLink>, AppError> {
        self.links.list_by_owner(owner_id).await
    }

    /// Partially updates a link on behalf of `requester_id`.
    ///
    /// A new `original_url` re-passes the same scheme check as creation;
    /// reachability is deliberately not re-probed. Tags are replaced
    /// wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id and
    /// [`AppError::Unauthorized`] when the link is owned by someone else.
    /// A link with no owner is updatable by any authenticated requester.
    pub async fn update_link(
        &self,
        id: i64,
        patch: LinkPatch,
        requester_id: i64,
    ) -> Result<ShortLink, AppError> {
        let link = self.require_link_access(id, requester_id).await?;

        if let Some(url) = &patch.original_url {
            validate_target_url(url)?;
        }

        self.links.update(link.id, patch).await
    }

    /// Deletes a link on behalf of `requester_id`.
    ///
    /// Same existence and ownership rules as [`Self::update_link`]; the
    /// record is removed outright, with no tombstone.
    pub async fn delete_link(&self, id: i64, requester_id: i64) -> Result<(), AppError> {
        let link = self.require_link_access(id, requester_id).await?;

        let deleted = self.links.delete(link.id).await?;
        if !deleted {
            return Err(AppError::not_found("URL not found", json!({ "id": id })));
        }

        Ok(())
    }

    /// Resolves a short code for redirection.
    ///
    /// A missing code and a paused link yield the same outward 404 class;
    /// callers cannot distinguish the two.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))?;

        if link.is_paused() {
            return Err(AppError::not_found(
                "Link is paused",
                json!({ "code": code }),
            ));
        }

        Ok(link)
    }

    /// Atomically bumps the click counter for a resolved link.
    ///
    /// Best-effort relative to the redirect response: callers log failures
    /// and redirect anyway.
    pub async fn record_click(&self, id: i64) -> Result<(), AppError> {
        self.links.increment_clicks(id).await
    }

    async fn require_link_access(
        &self,
        id: i64,
        requester_id: i64,
    ) -> Result<ShortLink, AppError> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;

        if let Some(owner_id) = link.owner_id {
            if owner_id != requester_id {
                return Err(AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "You do not own this link" }),
                ));
            }
        }

        Ok(link)
    }
}
