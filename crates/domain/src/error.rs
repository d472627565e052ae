//! Common error types used across the workspace.

/// A protocol value whose text is not one of the accepted spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidValue {
    /// Switch text other than `On` / `Off`.
    #[error("invalid switch state {0:?}")]
    SwitchState(String),
}
