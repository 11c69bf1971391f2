//! Service-level integration tests
//!
//! Drives the full service stack (ledger -> counters -> scores -> fan-out)
//! over the in-memory store.
//!
//! Run with: cargo test -p integration-tests --test service_tests

use chrono::{Duration, Utc};
use integration_tests::{test_context, test_context_with, TestHarness};
use news_common::LifecycleConfig;
use news_core::{ActiveButton, Snowflake};
use news_service::dto::{CreateContentRequest, IngestContentRequest, RecordInteractionRequest};
use news_service::{
    ChannelStatsService, ContentService, DuplicationService, InteractionService, LifecycleService,
    ServiceError,
};

async fn seed_content(harness: &TestHarness, channel_id: Snowflake, title: &str) -> Snowflake {
    let service = ContentService::new(&harness.ctx);
    let response = service
        .create(CreateContentRequest {
            channel_id: channel_id.to_string(),
            title: title.to_string(),
            message: format!("{title} body"),
            image_url: None,
            tags: vec!["news".to_string()],
            just_in: false,
        })
        .await
        .expect("seed content");
    response.id
}

// ============================================================================
// Interaction ledger
// ============================================================================

#[tokio::test]
async fn test_like_then_like_round_trips() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;
    let user = Snowflake::new(1001);

    let service = InteractionService::new(&harness.ctx);

    let first = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("like"))
        .await
        .unwrap();
    assert_eq!(first.like_count, 1);
    assert_eq!(first.active_button, ActiveButton::Like);

    let second = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("like"))
        .await
        .unwrap();
    assert_eq!(second.like_count, 0);
    assert_eq!(second.active_button, ActiveButton::None);

    // Toggle-off removes the ledger record entirely
    assert_eq!(harness.store.ledger_len(content_id), 0);
}

#[tokio::test]
async fn test_dislike_then_like_switches_exclusively() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;
    let user = Snowflake::new(1001);

    let service = InteractionService::new(&harness.ctx);

    let after_dislike = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("dislike"))
        .await
        .unwrap();
    assert_eq!(after_dislike.dislike_count, 1);
    let sum_before = after_dislike.like_count + after_dislike.dislike_count;

    let after_like = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("like"))
        .await
        .unwrap();
    assert_eq!(after_like.dislike_count, 0);
    assert_eq!(after_like.like_count, 1);
    assert_eq!(after_like.like_count + after_like.dislike_count, sum_before);
    assert_eq!(after_like.active_button, ActiveButton::Like);

    // One record flipped in place, never two conflicting records
    assert_eq!(harness.store.ledger_len(content_id), 1);
}

#[tokio::test]
async fn test_view_dedup_within_window() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;
    let user = Snowflake::new(7);

    let service = InteractionService::new(&harness.ctx);

    let first = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("view"))
        .await
        .unwrap();
    assert_eq!(first.view_count, 1);
    assert_eq!(first.unique_viewers_count, 1);

    let second = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("view"))
        .await
        .unwrap();
    assert_eq!(second.view_count, 1, "repeat view within 24h must not count");
    assert_eq!(second.unique_viewers_count, 1);
}

#[tokio::test]
async fn test_view_counts_again_outside_window() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;
    let user = Snowflake::new(7);

    let service = InteractionService::new(&harness.ctx);
    service
        .record_interaction(content_id, user, RecordInteractionRequest::new("view"))
        .await
        .unwrap();

    // Age the first view past the dedup window
    harness
        .store
        .backdate_views(content_id, user, Utc::now() - Duration::hours(25));

    let summary = service
        .record_interaction(content_id, user, RecordInteractionRequest::new("view"))
        .await
        .unwrap();
    assert_eq!(summary.view_count, 2);
    assert_eq!(
        summary.unique_viewers_count, 1,
        "unique viewers counts each user once, ever"
    );
}

#[tokio::test]
async fn test_append_types_always_count() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;
    let user = Snowflake::new(5);

    let service = InteractionService::new(&harness.ctx);
    for _ in 0..3 {
        service
            .record_interaction(content_id, user, RecordInteractionRequest::new("share"))
            .await
            .unwrap();
    }

    let summary = service.get_reaction_summary(content_id, user).await.unwrap();
    assert_eq!(summary.share_count, 3);
    assert_eq!(harness.store.ledger_len(content_id), 3);
}

#[tokio::test]
async fn test_unknown_interaction_type_rejected() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;

    let service = InteractionService::new(&harness.ctx);
    let err = service
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("boost"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.error_code(), "INVALID_INTERACTION");
}

#[tokio::test]
async fn test_interaction_on_missing_content_is_not_found() {
    let harness = test_context();

    let service = InteractionService::new(&harness.ctx);
    let err = service
        .record_interaction(
            Snowflake::new(424242),
            Snowflake::new(1),
            RecordInteractionRequest::new("like"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(_)));
    assert_eq!(err.status_code(), 404);
}

// ============================================================================
// Scoring
// ============================================================================

#[tokio::test]
async fn test_engagement_is_interactions_per_viewer() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;

    let service = InteractionService::new(&harness.ctx);

    // Two unique viewers
    for user in [Snowflake::new(1), Snowflake::new(2)] {
        service
            .record_interaction(content_id, user, RecordInteractionRequest::new("view"))
            .await
            .unwrap();
    }

    // One like from viewer A: (1 / 2) * 100
    let summary = service
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("like"),
        )
        .await
        .unwrap();

    assert_eq!(summary.unique_viewers_count, 2);
    assert!((summary.engagement_score - 50.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_engagement_zero_without_viewers() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;

    let service = InteractionService::new(&harness.ctx);
    let summary = service
        .record_interaction(
            content_id,
            Snowflake::new(9),
            RecordInteractionRequest::new("like"),
        )
        .await
        .unwrap();

    assert_eq!(summary.like_count, 1);
    assert_eq!(summary.engagement_score, 0.0);
    assert!(summary.viral_score >= 0.0);
}

#[tokio::test]
async fn test_every_mutation_publishes_counters() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;

    let service = InteractionService::new(&harness.ctx);
    service
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("view"),
        )
        .await
        .unwrap();
    service
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("like"),
        )
        .await
        .unwrap();
    // Deduplicated view mutates nothing and must not publish
    service
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("view"),
        )
        .await
        .unwrap();

    assert_eq!(harness.publisher.reaction_update_count(), 2);
}

// ============================================================================
// Lifecycle
// ============================================================================

fn instant_just_in() -> LifecycleConfig {
    LifecycleConfig {
        just_in_window_secs: 0,
        ..LifecycleConfig::default()
    }
}

#[tokio::test]
async fn test_sweep_promotes_expired_just_in() {
    let harness = test_context_with(instant_just_in());
    let channel_id = harness.seed_channel("desk").await;

    let content_service = ContentService::new(&harness.ctx);
    let original = content_service
        .create(CreateContentRequest {
            channel_id: channel_id.to_string(),
            title: "flash".to_string(),
            message: "breaking body".to_string(),
            image_url: None,
            tags: vec!["breaking".to_string()],
            just_in: true,
        })
        .await
        .unwrap();
    assert!(original.is_just_in);

    let lifecycle = LifecycleService::new(&harness.ctx);
    let report = lifecycle.run_sweep().await.unwrap();
    assert_eq!(report.promoted, 1);
    assert_eq!(report.failed, 0);

    // Exactly one item remains, in Headline state, under a new id
    let ids = harness.store.content_ids();
    assert_eq!(ids.len(), 1);
    let promoted = harness.store.content(ids[0]).unwrap();
    assert_ne!(promoted.id, original.id);
    assert!(!promoted.is_just_in);
    assert!(promoted.show_in_all_channels);
    assert_eq!(promoted.message, "breaking body");
    assert_eq!(promoted.tags, vec!["breaking".to_string()]);

    // Feeds agree with the store
    assert!(lifecycle.list_just_in(true, None, 50).await.unwrap().is_empty());
    let headlines = lifecycle.list_headline(50).await.unwrap();
    assert_eq!(headlines.len(), 1);
    assert_eq!(headlines[0].id, promoted.id);

    assert_eq!(harness.publisher.promotion_count(), 1);
}

#[tokio::test]
async fn test_sweep_is_idempotent() {
    let harness = test_context_with(instant_just_in());
    let channel_id = harness.seed_channel("desk").await;
    let content_service = ContentService::new(&harness.ctx);
    content_service
        .create(CreateContentRequest {
            channel_id: channel_id.to_string(),
            title: "flash".to_string(),
            message: "body".to_string(),
            image_url: None,
            tags: vec![],
            just_in: true,
        })
        .await
        .unwrap();

    let lifecycle = LifecycleService::new(&harness.ctx);
    let first = lifecycle.run_sweep().await.unwrap();
    assert_eq!(first.promoted, 1);

    let second = lifecycle.run_sweep().await.unwrap();
    assert_eq!(second.promoted, 0);
    assert_eq!(harness.store.content_ids().len(), 1);
}

#[tokio::test]
async fn test_sweep_promotes_external_content_with_provenance() {
    let harness = test_context_with(instant_just_in());
    let channel_id = harness.seed_channel("wire").await;

    let content_service = ContentService::new(&harness.ctx);
    let original = content_service
        .ingest(IngestContentRequest {
            channel_id: channel_id.to_string(),
            title: "Wire Story".to_string(),
            message: "body".to_string(),
            source_url: "https://news.example.com/wire-story".to_string(),
            image_url: None,
            tags: vec![],
        })
        .await
        .unwrap();

    let lifecycle = LifecycleService::new(&harness.ctx);
    let report = lifecycle.run_sweep().await.unwrap();
    assert_eq!(report.promoted, 1);
    assert_eq!(report.failed, 0);

    // The promoted copy keeps the external id and source URL, and the
    // cleanup pass sees exactly one item for that id
    let ids = harness.store.content_ids();
    assert_eq!(ids.len(), 1);
    let promoted = harness.store.content(ids[0]).unwrap();
    assert_ne!(promoted.id, original.id);
    assert!(promoted.external_id.is_some());
    assert_eq!(
        promoted.source_url.as_deref(),
        Some("https://news.example.com/wire-story")
    );

    let cleanup = DuplicationService::new(&harness.ctx)
        .run_cleanup()
        .await
        .unwrap();
    assert_eq!(cleanup.removed, 0);
}

#[tokio::test]
async fn test_expired_headline_is_invisible_and_removed() {
    let lifecycle_config = LifecycleConfig {
        headline_window_secs: 0,
        ..LifecycleConfig::default()
    };
    let harness = test_context_with(lifecycle_config);
    let channel_id = harness.seed_channel("desk").await;
    seed_content(&harness, channel_id, "stale").await;

    let lifecycle = LifecycleService::new(&harness.ctx);

    // Past its hard expiry: absent from the feed even before the sweep
    assert!(lifecycle.list_headline(50).await.unwrap().is_empty());

    let report = lifecycle.run_sweep().await.unwrap();
    assert_eq!(report.expired_removed, 1);
    assert!(harness.store.content_ids().is_empty());
}

#[tokio::test]
async fn test_just_in_feed_prefers_channel() {
    let harness = test_context();
    let desk_a = harness.seed_channel("desk-a").await;
    let desk_b = harness.seed_channel("desk-b").await;

    let content_service = ContentService::new(&harness.ctx);
    for (channel_id, title) in [(desk_a, "a-story"), (desk_b, "b-story")] {
        content_service
            .create(CreateContentRequest {
                channel_id: channel_id.to_string(),
                title: title.to_string(),
                message: "body".to_string(),
                image_url: None,
                tags: vec![],
                just_in: true,
            })
            .await
            .unwrap();
    }

    let lifecycle = LifecycleService::new(&harness.ctx);
    let feed = lifecycle.list_just_in(true, Some(desk_b), 50).await.unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].channel_id, desk_b);
}

// ============================================================================
// Duplication guard
// ============================================================================

#[tokio::test]
async fn test_ingest_rejects_tracking_decorated_duplicate() {
    let harness = test_context();
    let channel_id = harness.seed_channel("wire").await;

    let service = ContentService::new(&harness.ctx);
    let request = |url: &str| IngestContentRequest {
        channel_id: channel_id.to_string(),
        title: "Markets Rally".to_string(),
        message: "body".to_string(),
        source_url: url.to_string(),
        image_url: None,
        tags: vec![],
    };

    service
        .ingest(request("https://news.example.com/markets?utm_source=feed"))
        .await
        .unwrap();

    let err = service
        .ingest(request("https://news.example.com/markets"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 409);

    assert_eq!(harness.store.content_ids().len(), 1);
}

#[tokio::test]
async fn test_duplicate_cleanup_keeps_newest_and_is_idempotent() {
    let harness = test_context();
    let channel_id = harness.seed_channel("wire").await;

    // Seed two rows sharing an external id (legacy data the ingest guard
    // never saw), the second created later
    let mut older = news_core::Content::new_just_in(
        harness.ctx.generate_id(),
        channel_id,
        "dup".to_string(),
        "body".to_string(),
        Duration::minutes(15),
        Duration::hours(48),
    );
    older.external_id = Some("wire-123".to_string());
    older.created_at = Utc::now() - Duration::minutes(30);
    let older_id = older.id;
    harness.store.put_content(older);

    let mut newer = news_core::Content::new_just_in(
        harness.ctx.generate_id(),
        channel_id,
        "dup".to_string(),
        "body".to_string(),
        Duration::minutes(15),
        Duration::hours(48),
    );
    newer.external_id = Some("wire-123".to_string());
    let newer_id = newer.id;
    harness.store.put_content(newer);

    let service = DuplicationService::new(&harness.ctx);

    let first = service.run_cleanup().await.unwrap();
    assert_eq!(first.groups, 1);
    assert_eq!(first.removed, 1);
    assert!(harness.store.content(older_id).is_none());
    assert!(harness.store.content(newer_id).is_some());

    let second = service.run_cleanup().await.unwrap();
    assert_eq!(second.removed, 0, "cleanup must be idempotent");
}

// ============================================================================
// Channel stats
// ============================================================================

#[tokio::test]
async fn test_channel_stats_recompute() {
    let harness = test_context();
    let channel_id = harness.seed_channel("desk").await;
    let content_id = seed_content(&harness, channel_id, "story").await;
    seed_content(&harness, channel_id, "other story").await;

    // Give the first item some engagement: one viewer, one like
    let interactions = InteractionService::new(&harness.ctx);
    interactions
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("view"),
        )
        .await
        .unwrap();
    interactions
        .record_interaction(
            content_id,
            Snowflake::new(1),
            RecordInteractionRequest::new("like"),
        )
        .await
        .unwrap();

    let stats = ChannelStatsService::new(&harness.ctx)
        .recompute(channel_id)
        .await
        .unwrap();

    assert_eq!(stats.content_count, 2);
    assert_eq!(stats.total_views, 1);
    // Item one scores (1/1)*100, item two scores 0; mean is 50
    assert!((stats.avg_engagement_rate - 50.0).abs() < 1e-9);

    let channel = harness
        .ctx
        .channel_repo()
        .find_by_id(channel_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(channel.content_count, 2);
}

#[tokio::test]
async fn test_channel_stats_missing_channel() {
    let harness = test_context();
    let err = ChannelStatsService::new(&harness.ctx)
        .recompute(Snowflake::new(31337))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}
