/// Errors surfaced by [`RoleServiceClient`](crate::RoleServiceClient).
///
/// `Service` messages are already cleaned up for display; callers surface
/// them verbatim and keep the draft state so the user can retry.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },
}
