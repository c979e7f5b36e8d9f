use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use crate::models::Catalog;

pub const SIGNUP_FALLBACK: &str = "An error occurred";
pub const UNREGISTER_FALLBACK: &str = "Failed to remove participant";

/// Outcome of a signup or unregister exchange. A transport failure or an
/// unparseable success body is an `Err` at the call site; an application
/// refusal (non-2xx) lands here with whatever `detail` the server included.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    /// 2xx. `message` is the server-supplied confirmation text.
    Success { message: String },
    /// Non-2xx. `detail` is the server's explanation, when it sent one.
    Rejected { detail: Option<String> },
}

impl ApiOutcome {
    /// User-facing text for this outcome, with `fallback` standing in when a
    /// rejection carried no detail.
    pub fn display_text(&self, fallback: &str) -> String {
        match self {
            ApiOutcome::Success { message } => message.clone(),
            ApiOutcome::Rejected { detail } => {
                detail.clone().unwrap_or_else(|| fallback.to_string())
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success { .. })
    }
}

pub struct ActivitiesClient {
    client: Client,
    base_url: String,
}

impl ActivitiesClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full activity catalog.
    pub async fn get_activities(&self) -> Result<Catalog> {
        let url = format!("{}/activities", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch activities")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("Failed to read activities response")?;
        debug!("Activities response (status {}): {}", status, text);

        if !status.is_success() {
            anyhow::bail!("Activities request failed with status {status}: {text}");
        }

        let catalog: Catalog = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse activities (status {status}): {text}"))?;

        debug!("Fetched {} activities", catalog.len());
        Ok(catalog)
    }

    /// Register `email` for the named activity.
    pub async fn signup(&self, activity: &str, email: &str) -> Result<ApiOutcome> {
        let url = format!(
            "{}/activities/{}/signup?email={}",
            self.base_url,
            urlencoding::encode(activity),
            urlencoding::encode(email)
        );

        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .context("Failed to send signup request")?;

        let status = resp.status();
        let text = resp.text().await.context("Failed to read signup response")?;
        debug!("Signup response (status {}): {}", status, text);

        if status.is_success() {
            let message = parse_message(&text)
                .with_context(|| format!("Failed to parse signup response (status {status}): {text}"))?;
            Ok(ApiOutcome::Success { message })
        } else {
            Ok(ApiOutcome::Rejected {
                detail: parse_detail(&text),
            })
        }
    }

    /// Remove `email` from the named activity. Success body is ignored.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<ApiOutcome> {
        let url = format!(
            "{}/activities/{}/unregister?email={}",
            self.base_url,
            urlencoding::encode(activity),
            urlencoding::encode(email)
        );

        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .context("Failed to send unregister request")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("Failed to read unregister response")?;
        debug!("Unregister response (status {}): {}", status, text);

        if status.is_success() {
            Ok(ApiOutcome::Success {
                message: format!("Removed {} from {}", email, activity),
            })
        } else {
            Ok(ApiOutcome::Rejected {
                detail: parse_detail(&text),
            })
        }
    }
}

/// Extract the `message` field from a 2xx signup body.
fn parse_message(text: &str) -> Result<String> {
    let body: serde_json::Value = serde_json::from_str(text)?;
    Ok(body
        .get("message")
        .and_then(|v| v.as_str())
        .unwrap_or("Signed up")
        .to_string())
}

/// Extract the optional `detail` field from a non-2xx body. A body that is
/// not JSON at all yields `None`, which callers replace with a fallback.
fn parse_detail(text: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()?
        .get("detail")?
        .as_str()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message() {
        assert_eq!(
            parse_message(r#"{"message": "Signed up newemail@mergington.edu for Chess Club"}"#)
                .unwrap(),
            "Signed up newemail@mergington.edu for Chess Club"
        );
        // Valid JSON without a message field still counts as success.
        assert_eq!(parse_message("{}").unwrap(), "Signed up");
        assert!(parse_message("<html>oops</html>").is_err());
    }

    #[test]
    fn test_parse_detail() {
        assert_eq!(
            parse_detail(r#"{"detail": "Student already signed up"}"#),
            Some("Student already signed up".to_string())
        );
        assert_eq!(parse_detail("{}"), None);
        assert_eq!(parse_detail("Internal Server Error"), None);
    }

    #[test]
    fn test_display_text_prefers_detail_over_fallback() {
        let rejected = ApiOutcome::Rejected {
            detail: Some("Activity not found".into()),
        };
        assert_eq!(rejected.display_text(SIGNUP_FALLBACK), "Activity not found");

        let bare = ApiOutcome::Rejected { detail: None };
        assert_eq!(bare.display_text(SIGNUP_FALLBACK), "An error occurred");
        assert_eq!(
            bare.display_text(UNREGISTER_FALLBACK),
            "Failed to remove participant"
        );
    }
}
