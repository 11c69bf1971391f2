//! Channel entity <-> model mapper

use news_core::entities::Channel;
use news_core::value_objects::Snowflake;

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            name: model.name,
            picture_url: model.picture_url,
            description: model.description,
            tags: model.tags,
            subscriber_count: model.subscriber_count,
            content_count: model.content_count,
            total_views: model.total_views,
            avg_engagement_rate: model.avg_engagement_rate,
            is_external: model.is_external,
            created_at: model.created_at,
        }
    }
}
