/// Failures of the key-value store behind the basket engine.
/// Messages are code-style identifiers, like every other error in the crate.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store is unreachable or rejected a command.
    #[error("repository.unavailable")]
    Unavailable,
    /// A stored record could not be encoded or decoded.
    #[error("repository.serialization")]
    Serialization,
}
