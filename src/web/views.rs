use leptos::prelude::*;

use super::status::{StatusLevel, StatusMessage};
use crate::roster::ActivityCard;

const STYLE: &str = include_str!("../style.css");

pub(super) const LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";

/// Everything one page render needs, already derived; no I/O happens here.
pub(super) struct BoardPage<'a> {
    pub(super) cards: &'a [ActivityCard],
    pub(super) load_failed: bool,
    pub(super) status: Option<&'a StatusMessage>,
    /// Email to pre-fill in the signup form (kept after a failed signup,
    /// cleared after a successful one).
    pub(super) form_email: &'a str,
    pub(super) updated: String,
}

pub(super) fn render_page(page: &BoardPage<'_>) -> String {
    let board_html = if page.load_failed {
        view! { <p class="load-error">{LOAD_FAILURE_TEXT}</p> }.to_html()
    } else {
        page.cards.iter().map(render_card).collect()
    };
    let status_html = render_status(page.status);
    let form_html = render_signup_form(page.cards, page.form_email, page.load_failed);
    let updated = page.updated.clone();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>"Activity Board"</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <h1>"Activity Board"</h1>
                <p class="timestamp">"Updated: " {updated}</p>
                <div inner_html=status_html />
                <section>
                    <h2>"Activities"</h2>
                    <div id="activities-list" inner_html=board_html />
                </section>
                <section>
                    <h2>"Sign Up"</h2>
                    <div inner_html=form_html />
                </section>
            </body>
        </html>
    }
    .to_html()
}

fn render_status(status: Option<&StatusMessage>) -> String {
    match status {
        None => view! { <div id="message" class="hidden"></div> }.to_html(),
        Some(msg) => {
            let css = match msg.level {
                StatusLevel::Success => "success",
                StatusLevel::Error => "error",
            }
            .to_string();
            let text = msg.text.clone();
            view! { <div id="message" class=css>{text}</div> }.to_html()
        }
    }
}

fn render_card(card: &ActivityCard) -> String {
    let name = card.name.clone();
    let description = card.description.clone();
    let schedule = card.schedule.clone();
    let availability = format!("{} spots left", card.spots_left);
    let roster_html = render_roster(card);

    view! {
        <div class="activity-card">
            <h4>{name}</h4>
            <p>{description}</p>
            <p><strong>"Schedule: "</strong>{schedule}</p>
            <p><strong>"Availability: "</strong>{availability}</p>
            <div class="participants-section">
                <h5>"Participants"</h5>
                <div inner_html=roster_html />
            </div>
        </div>
    }
    .to_html()
}

fn render_roster(card: &ActivityCard) -> String {
    if card.roster.is_empty() {
        return view! { <p class="no-participants">"No participants yet"</p> }.to_html();
    }

    let rows_html: String = card
        .roster
        .iter()
        .map(|row| {
            let email = row.email.clone();
            let email_title = row.email.clone();
            let email_label = row.email.clone();
            let avatar = row.initials.clone();
            let activity = card.name.clone();

            view! {
                <li>
                    <span class="avatar" title=email_title>{avatar}</span>
                    <span class="participant-name">{email_label}</span>
                    <form method="post" action="/unregister" class="inline">
                        <input type="hidden" name="activity" value=activity />
                        <input type="hidden" name="email" value=email />
                        <button class="delete-btn" title="Remove participant">"\u{2715}"</button>
                    </form>
                </li>
            }
            .to_html()
        })
        .collect();

    view! { <ul class="participants-list" inner_html=rows_html /> }.to_html()
}

fn render_signup_form(cards: &[ActivityCard], form_email: &str, load_failed: bool) -> String {
    if load_failed {
        return view! { <p class="empty">"Sign-up unavailable while activities cannot be loaded."</p> }
            .to_html();
    }

    let options_html: String = cards
        .iter()
        .map(|card| {
            let value = card.name.clone();
            let label = card.name.clone();
            view! { <option value=value>{label}</option> }.to_html()
        })
        .collect();
    let email = form_email.to_string();

    view! {
        <form id="signup-form" method="post" action="/signup">
            <label>"Email"</label>
            <input type="email" id="email" name="email" value=email required=true />
            <label>"Activity"</label>
            <select id="activity" name="activity" required=true inner_html=options_html />
            <button type="submit">"Sign Up"</button>
        </form>
    }
    .to_html()
}
