//! Content entity <-> model mapper

use news_core::entities::Content;
use news_core::value_objects::Snowflake;

use crate::models::ContentModel;

impl From<ContentModel> for Content {
    fn from(model: ContentModel) -> Self {
        Content {
            id: Snowflake::new(model.id),
            channel_id: Snowflake::new(model.channel_id),
            title: model.title,
            message: model.message,
            image_url: model.image_url,
            tags: model.tags,
            external_id: model.external_id,
            source_url: model.source_url,
            like_count: model.like_count,
            dislike_count: model.dislike_count,
            comment_count: model.comment_count,
            share_count: model.share_count,
            screenshot_count: model.screenshot_count,
            view_count: model.view_count,
            unique_viewers_count: model.unique_viewers_count,
            engagement_score: model.engagement_score,
            viral_score: model.viral_score,
            is_just_in: model.is_just_in,
            show_in_all_channels: model.show_in_all_channels,
            just_in_expires_at: model.just_in_expires_at,
            headline_expires_at: model.headline_expires_at,
            created_at: model.created_at,
            uploaded_at: model.uploaded_at,
        }
    }
}
