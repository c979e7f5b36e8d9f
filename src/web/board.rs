use std::time::Instant;

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use chrono::Local;
use serde::Deserialize;
use tracing::{error, info};

use super::status::StatusMessage;
use super::views::{render_page, BoardPage};
use super::AppState;
use crate::client::{ApiOutcome, SIGNUP_FALLBACK, UNREGISTER_FALLBACK};
use crate::roster;

pub(crate) const SIGNUP_NETWORK_ERROR: &str = "Failed to sign up. Please try again.";
pub(crate) const UNREGISTER_NETWORK_ERROR: &str = "Failed to remove participant. Please try again.";

#[derive(Debug, Deserialize)]
pub(crate) struct OperationForm {
    pub(crate) activity: String,
    pub(crate) email: String,
}

/// Board load: always a fresh catalog fetch. On failure the board area is
/// replaced by a static message and the cache is left alone; no retry.
pub(crate) async fn board_handler(State(state): State<AppState>) -> Html<String> {
    let load_failed = match state.client.get_activities().await {
        Ok(catalog) => {
            *state.catalog.lock().unwrap() = Some(catalog);
            false
        }
        Err(e) => {
            error!("Error fetching activities: {:#}", e);
            true
        }
    };

    Html(render_board(&state, load_failed, ""))
}

/// How the page reacts to a completed signup: the banner to publish, what
/// the form shows afterwards, and whether the catalog gets re-fetched.
#[derive(Debug)]
pub(crate) struct SignupReaction {
    pub(crate) message: StatusMessage,
    pub(crate) form_email: String,
    pub(crate) refetch: bool,
}

/// Success clears the form and requests one catalog re-fetch; any failure
/// keeps the submitted email in place and leaves the catalog alone.
pub(crate) fn react_to_signup(
    result: anyhow::Result<ApiOutcome>,
    submitted_email: &str,
) -> SignupReaction {
    match result {
        Ok(outcome @ ApiOutcome::Success { .. }) => SignupReaction {
            message: StatusMessage::success(outcome.display_text(SIGNUP_FALLBACK)),
            form_email: String::new(),
            refetch: true,
        },
        Ok(outcome) => SignupReaction {
            message: StatusMessage::error(outcome.display_text(SIGNUP_FALLBACK)),
            form_email: submitted_email.to_string(),
            refetch: false,
        },
        Err(e) => {
            error!("Error signing up: {:#}", e);
            SignupReaction {
                message: StatusMessage::error(SIGNUP_NETWORK_ERROR),
                form_email: submitted_email.to_string(),
                refetch: false,
            }
        }
    }
}

pub(crate) async fn signup_handler(
    State(state): State<AppState>,
    Form(form): Form<OperationForm>,
) -> Html<String> {
    let op = state.status.lock().unwrap().begin();

    let result = state.client.signup(&form.activity, &form.email).await;
    let reaction = react_to_signup(result, &form.email);

    if reaction.refetch {
        info!("Signed up {} for {}", form.email, form.activity);
        match state.client.get_activities().await {
            Ok(catalog) => *state.catalog.lock().unwrap() = Some(catalog),
            Err(e) => error!("Error refreshing activities after signup: {:#}", e),
        }
    }

    state
        .status
        .lock()
        .unwrap()
        .finish(op, reaction.message, Instant::now());
    Html(render_board(&state, false, &reaction.form_email))
}

/// Unregister: on success only the matching cached row is dropped; the next
/// board load re-syncs with the server.
pub(crate) async fn unregister_handler(
    State(state): State<AppState>,
    Form(form): Form<OperationForm>,
) -> Html<String> {
    let op = state.status.lock().unwrap().begin();

    let message = match state.client.unregister(&form.activity, &form.email).await {
        Ok(ApiOutcome::Success { message }) => {
            info!("Removed {} from {}", form.email, form.activity);
            if let Some(catalog) = state.catalog.lock().unwrap().as_mut() {
                roster::remove_participant(catalog, &form.activity, &form.email);
            }
            StatusMessage::success(message)
        }
        Ok(outcome) => StatusMessage::error(outcome.display_text(UNREGISTER_FALLBACK)),
        Err(e) => {
            error!("Error removing participant: {:#}", e);
            StatusMessage::error(UNREGISTER_NETWORK_ERROR)
        }
    };

    state
        .status
        .lock()
        .unwrap()
        .finish(op, message, Instant::now());
    Html(render_board(&state, false, ""))
}

fn render_board(state: &AppState, load_failed: bool, form_email: &str) -> String {
    let cards = state
        .catalog
        .lock()
        .unwrap()
        .as_ref()
        .map(roster::build_cards)
        .unwrap_or_default();
    let status = state.status.lock().unwrap();
    let page = BoardPage {
        cards: &cards,
        load_failed,
        status: status.visible(Instant::now()),
        form_email,
        updated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    render_page(&page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::status::StatusLevel;

    #[test]
    fn test_signup_success_clears_form_and_requests_one_refetch() {
        let reaction = react_to_signup(
            Ok(ApiOutcome::Success {
                message: "Signed up a@x.com for Chess Club".into(),
            }),
            "a@x.com",
        );

        // The handler's single fetch call site runs iff this flag is set,
        // so one success means one catalog re-fetch.
        assert!(reaction.refetch);
        assert_eq!(reaction.form_email, "");
        assert_eq!(reaction.message.level, StatusLevel::Success);
        assert_eq!(reaction.message.text, "Signed up a@x.com for Chess Club");
    }

    #[test]
    fn test_signup_rejection_keeps_form_and_skips_refetch() {
        let reaction = react_to_signup(
            Ok(ApiOutcome::Rejected {
                detail: Some("Student already signed up".into()),
            }),
            "a@x.com",
        );

        assert!(!reaction.refetch);
        assert_eq!(reaction.form_email, "a@x.com");
        assert_eq!(reaction.message.level, StatusLevel::Error);
        assert_eq!(reaction.message.text, "Student already signed up");
    }

    #[test]
    fn test_signup_rejection_without_detail_uses_fallback() {
        let reaction = react_to_signup(Ok(ApiOutcome::Rejected { detail: None }), "a@x.com");

        assert!(!reaction.refetch);
        assert_eq!(reaction.form_email, "a@x.com");
        assert_eq!(reaction.message.text, SIGNUP_FALLBACK);
    }

    #[test]
    fn test_signup_transport_error_uses_generic_text() {
        let reaction = react_to_signup(Err(anyhow::anyhow!("connection refused")), "a@x.com");

        assert!(!reaction.refetch);
        assert_eq!(reaction.form_email, "a@x.com");
        assert_eq!(reaction.message.text, SIGNUP_NETWORK_ERROR);
    }
}
