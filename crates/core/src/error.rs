/// Domain errors that are not tied to a particular store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A sort token reached the query layer without passing the safelist.
    #[error("Unsafe sort parameter: {0}")]
    UnsafeSort(String),
}
