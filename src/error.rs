use crate::room::RoomId;

/// Failures of registry-level operations. Game rejections (wrong turn,
/// illegal target, ...) are `CommandOutcome`s, not errors.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    NotFound(RoomId),

    #[error("room limit of {limit} reached")]
    RegistryFull { limit: usize },

    #[error("invalid registry configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("cannot read {path}: {source}")]
    ConfigUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
