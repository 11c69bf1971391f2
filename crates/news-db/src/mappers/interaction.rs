//! Interaction entity <-> model mapper

use news_core::entities::{InteractionRecord, InteractionType};
use news_core::value_objects::Snowflake;
use news_core::DomainError;

use crate::models::InteractionModel;

/// Convert a ledger row into the domain record.
///
/// Fails on an interaction type the domain does not recognize; such a row can
/// only appear through out-of-band writes and must not be silently coerced.
pub fn try_interaction_from_model(
    model: InteractionModel,
) -> Result<InteractionRecord, DomainError> {
    let interaction_type = model
        .interaction_type
        .parse::<InteractionType>()
        .map_err(|e| DomainError::DatabaseError(format!("corrupt interaction row: {e}")))?;

    Ok(InteractionRecord {
        id: Snowflake::new(model.id),
        user_id: Snowflake::new(model.user_id),
        content_id: Snowflake::new(model.content_id),
        interaction_type,
        created_at: model.created_at,
        duration_secs: model.duration_secs,
        device: model.device,
        platform: model.platform,
    })
}
