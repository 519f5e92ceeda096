// Confirm-then-delete flow used by the key and member edit screens.
//
// Responsibilities
// - Ask for confirmation with the entity's own message.
// - Delete only after the user accepts. Delete errors reach the caller unchanged.

use crate::modules::entities::core::entity::Entity;
use crate::modules::entities::core::errors::ModelError;
use crate::modules::entities::core::model::Model;
use crate::modules::entities::use_cases::delete_with_confirmation::confirmer::Confirmer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub async fn delete_with_confirmation<M: Model>(
    entity: &Entity<M>,
    confirmer: &impl Confirmer,
) -> Result<DeleteOutcome, ModelError> {
    if !confirmer.confirm(&entity.delete_confirm_message()).await {
        tracing::debug!(model = M::NAME, "delete cancelled");
        return Ok(DeleteOutcome::Cancelled);
    }
    entity.del().await?;
    Ok(DeleteOutcome::Deleted)
}
