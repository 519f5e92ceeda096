// Port for asking the user to confirm a destructive action.

use async_trait::async_trait;

#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Shows `message` and resolves to true if the user accepts.
    async fn confirm(&self, message: &str) -> bool;
}
