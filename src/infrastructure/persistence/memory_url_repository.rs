//! In-memory implementation of the short link repository.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::UrlRepository;
use crate::error::StoreError;

/// DashMap-backed repository with the same observable semantics as the
/// PostgreSQL implementation.
///
/// DashMap's sharded locks give the two guarantees the contract needs
/// without a global lock: the entry API makes insert-unique atomic per
/// code (exactly one of two concurrent inserts wins), and `get_mut`
/// holds an exclusive guard for the duration of an increment, so
/// concurrent increments are never lost.
#[derive(Debug)]
pub struct MemoryUrlRepository {
    links: DashMap<String, ShortLink>,
    next_id: AtomicI64,
}

impl Default for MemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUrlRepository {
    /// Creates an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates an empty repository behind an `Arc`, the shape the
    /// services take.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Flags a link as disabled.
    ///
    /// Returns `true` if the link existed. There is no way back: the
    /// engine defines no un-disable operation.
    pub fn disable(&self, code: &str) -> bool {
        match self.links.get_mut(code) {
            Some(mut link) => {
                link.disabled = true;
                link.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when no links are stored.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert_unique(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        // The vacant/occupied decision and the insert happen under one
        // shard lock, which is what makes this insert-unique rather than
        // racy check-then-insert.
        match self.links.entry(new_link.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::CodeTaken),
            Entry::Vacant(vacant) => {
                let now = Utc::now();
                let link = ShortLink {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    owner_id: new_link.owner_id,
                    target_url: new_link.target_url,
                    code: new_link.code,
                    click_count: 0,
                    disabled: false,
                    created_at: now,
                    updated_at: now,
                };
                vacant.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StoreError> {
        Ok(self.links.get(code).map(|link| link.value().clone()))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShortLink>, StoreError> {
        let mut links: Vec<ShortLink> = self
            .links
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| b.id.cmp(&a.id));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        Ok(links.into_iter().skip(offset).take(limit).collect())
    }

    async fn increment_clicks(&self, code: &str) -> Result<u64, StoreError> {
        match self.links.get_mut(code) {
            Some(mut link) if !link.disabled => {
                link.click_count += 1;
                link.updated_at = Utc::now();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
