//! Duplication guard
//!
//! After-the-fact cleanup of duplicate externally ingested content. Items are
//! grouped by exact external id and by normalized source URL; each group
//! keeps its most recently created member and the rest are removed together
//! with their ledger rows. Running the pass twice with no new ingestion
//! removes nothing the second time.
//!
//! Ingestion-time prevention (the cheap path) lives in `ContentService`,
//! which derives a deterministic external id before inserting.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{info, instrument, warn};

use news_core::{dedup, Content, Snowflake};

use crate::dto::CleanupReport;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// One set of duplicates sharing a grouping key
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// External id or normalized URL the group shares
    pub key: String,
    /// Retained representative (most recently created)
    pub keep: Snowflake,
    /// Members to remove
    pub remove: Vec<Snowflake>,
}

/// Duplication guard service
pub struct DuplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DuplicationService<'a> {
    /// Create a new DuplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Find duplicate groups among externally ingested content
    #[instrument(skip(self))]
    pub async fn find_duplicates(&self) -> ServiceResult<Vec<DuplicateGroup>> {
        let external = self.ctx.content_repo().find_external().await?;

        let mut groups = Vec::new();
        collect_groups(&external, |content| content.external_id.clone(), &mut groups);
        collect_groups(
            &external,
            |content| content.source_url.as_deref().and_then(dedup::normalize_url),
            &mut groups,
        );

        Ok(groups)
    }

    /// Remove every non-representative member of the given groups.
    ///
    /// An id appearing in more than one group (same article matched by id and
    /// by URL) is removed once. Per-item failures are logged and skipped.
    #[instrument(skip(self, groups))]
    pub async fn purge(&self, groups: &[DuplicateGroup]) -> ServiceResult<u64> {
        let keep: HashSet<Snowflake> = groups.iter().map(|g| g.keep).collect();
        let mut to_remove: HashSet<Snowflake> = HashSet::new();
        for group in groups {
            to_remove.extend(group.remove.iter().copied());
        }
        // A representative in one group may be a loser in another; keeping
        // wins so each key retains at least one member
        let to_remove: Vec<Snowflake> = to_remove.difference(&keep).copied().collect();

        let mut removed = 0u64;
        for id in to_remove {
            match self.remove_content(id).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(content_id = %id, error = %e, "duplicate removal failed, skipping");
                }
            }
        }

        Ok(removed)
    }

    /// Full cleanup pass: find groups, purge losers
    #[instrument(skip(self))]
    pub async fn run_cleanup(&self) -> ServiceResult<CleanupReport> {
        let groups = self.find_duplicates().await?;
        let removed = self.purge(&groups).await?;

        let report = CleanupReport {
            groups: groups.len() as u64,
            removed,
        };

        if report.removed > 0 {
            info!(
                groups = report.groups,
                removed = report.removed,
                "Duplicate cleanup completed"
            );
        }

        Ok(report)
    }

    async fn remove_content(&self, id: Snowflake) -> ServiceResult<bool> {
        let deleted = self.ctx.content_repo().delete(id).await?;
        if deleted {
            self.ctx.interaction_repo().delete_by_content(id).await?;
        }
        Ok(deleted)
    }
}

/// Group contents by a key extractor and emit every group larger than one,
/// keeping the most recently created member (ties broken by higher id)
fn collect_groups<F>(contents: &[Content], key_of: F, out: &mut Vec<DuplicateGroup>)
where
    F: Fn(&Content) -> Option<String>,
{
    let mut by_key: HashMap<String, Vec<&Content>> = HashMap::new();
    for content in contents {
        if let Some(key) = key_of(content) {
            by_key.entry(key).or_default().push(content);
        }
    }

    for (key, mut members) in by_key {
        if members.len() < 2 {
            continue;
        }
        members.sort_by_key(|c| (c.created_at, c.id));
        let keep = members.pop().map(|c| c.id).unwrap_or_default();
        out.push(DuplicateGroup {
            key,
            keep,
            remove: members.iter().map(|c| c.id).collect(),
        });
    }
}
