//! The role-service HTTP client.

use lims_core::messages::{clean_error_message, extract_error_message};
use lims_core::privileges::Privilege;
use lims_core::roles::RoleSubmission;
use lims_core::types::DbId;
use serde::Deserialize;

use crate::error::ClientError;

/// The `{ "data": ... }` envelope every service response uses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// A role as returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRole {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub description: String,
    pub privilege_ids: Vec<DbId>,
}

/// Client for the role & privilege service.
///
/// Stateless and cheap to clone; callers are expected to keep a single
/// submission in flight per role draft, but that is their contract, not
/// something this client enforces.
#[derive(Debug, Clone)]
pub struct RoleServiceClient {
    base_url: String,
    http: reqwest::Client,
}

impl RoleServiceClient {
    /// Create a client targeting a service base URL (e.g.
    /// `http://localhost:3000`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a validated role for creation.
    pub async fn create_role(
        &self,
        submission: &RoleSubmission,
    ) -> Result<RemoteRole, ClientError> {
        let url = format!("{}/api/v1/roles", self.base_url);
        let response = self.http.post(&url).json(submission).send().await?;
        let envelope: Envelope<RemoteRole> = Self::parse(response).await?;
        Ok(envelope.data)
    }

    /// Fetch the privilege catalog (ids and display names) for rendering
    /// selection options.
    pub async fn list_privileges(&self) -> Result<Vec<Privilege>, ClientError> {
        let url = format!("{}/api/v1/privileges", self.base_url);
        let response = self.http.get(&url).send().await?;
        let envelope: Envelope<Vec<Privilege>> = Self::parse(response).await?;
        Ok(envelope.data)
    }

    /// Turn a response into its deserialized body, or a [`ClientError`]
    /// with a display-ready message.
    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Service {
            status: status.as_u16(),
            message: display_message(status.as_u16(), &body),
        })
    }
}

/// Reduce a failed response to a single display line.
///
/// Tries the `message` / `detail` / `title` fields of a JSON body first,
/// then falls back to a generic status line. Either way the result goes
/// through [`clean_error_message`], so stack traces and exception-type
/// prefixes never reach the user.
fn display_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(extract_error_message)
        .map(|message| clean_error_message(&message))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_is_used() {
        let body = r#"{"message":"Role code already exists"}"#;
        assert_eq!(display_message(409, body), "Role code already exists");
    }

    #[test]
    fn detail_and_title_fallbacks() {
        assert_eq!(
            display_message(400, r#"{"detail":"Code must be unique"}"#),
            "Code must be unique"
        );
        assert_eq!(
            display_message(500, r#"{"title":"Internal Server Error"}"#),
            "Internal Server Error"
        );
    }

    #[test]
    fn stack_trace_and_prefix_are_cleaned() {
        let body = r#"{"message":"Lims.Iam.DuplicateCodeException: Role code already exists\n   at Create()"}"#;
        assert_eq!(display_message(409, body), "Role code already exists");
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        assert_eq!(
            display_message(502, "<html>Bad Gateway</html>"),
            "Request failed with status 502"
        );
    }

    #[test]
    fn json_without_known_fields_falls_back() {
        assert_eq!(
            display_message(500, r#"{"status":500}"#),
            "Request failed with status 500"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_trimmed() {
        let client = RoleServiceClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }
}
