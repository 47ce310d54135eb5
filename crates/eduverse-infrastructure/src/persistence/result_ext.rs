use eduverse_domain::shared::DomainError;

/// Maps store errors to the single failure kind callers see.
pub trait StoreResultExt<T> {
    /// Usage: `query.fetch_all(pool).await.map_store_error("List learners")?`
    fn map_store_error(self, context: &str) -> Result<T, DomainError>;
}

impl<T> StoreResultExt<T> for Result<T, sqlx::Error> {
    fn map_store_error(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| {
            tracing::warn!(target: "eduverse::store", context, error = %e, "store operation failed");
            DomainError::StoreUnavailable(format!("{}: {}", context, e))
        })
    }
}
