//! Pure view-model layer: everything the board shows is derived here, with no
//! I/O, so initials and capacity logic stay testable on their own.

use crate::models::{Activity, Catalog};

/// One rendered activity card.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub roster: Vec<RosterRow>,
}

/// One participant line on a card: the raw identifier plus its avatar label.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub email: String,
    pub initials: String,
}

/// Derive the 1–2 character avatar label for a participant identifier.
///
/// When the local part (before `@`) splits on `.`, `-`, `_` or `+` into two
/// or more non-empty segments, the label is the uppercased first letter of
/// the first two. Otherwise (no delimiter, or only one usable segment) it is
/// the first two characters of the local part — or of the raw identifier
/// when the local part is empty — uppercased.
pub fn initials(identifier: &str) -> String {
    let local = identifier.split('@').next().unwrap_or(identifier);
    let local = if local.is_empty() { identifier } else { local };

    let segments: Vec<&str> = local
        .split(['.', '-', '_', '+'])
        .filter(|seg| !seg.is_empty())
        .collect();

    if segments.len() >= 2 {
        segments
            .iter()
            .take(2)
            .filter_map(|seg| seg.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    } else {
        local.chars().take(2).flat_map(|c| c.to_uppercase()).collect()
    }
}

pub fn card_for(name: &str, activity: &Activity) -> ActivityCard {
    ActivityCard {
        name: name.to_string(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        spots_left: activity.spots_left(),
        roster: activity
            .participants
            .iter()
            .map(|email| RosterRow {
                email: email.clone(),
                initials: initials(email),
            })
            .collect(),
    }
}

/// Derive the full board, one card per catalog entry, in catalog order.
pub fn build_cards(catalog: &Catalog) -> Vec<ActivityCard> {
    catalog
        .iter()
        .map(|(name, activity)| card_for(name, activity))
        .collect()
}

/// Drop exactly the row matching `email` from the named activity's cached
/// roster. Returns whether a row was removed. Used after a confirmed
/// unregister so the board reflects the removal without a full re-fetch.
pub fn remove_participant(catalog: &mut Catalog, activity_name: &str, email: &str) -> bool {
    match catalog.get_mut(activity_name) {
        Some(activity) => {
            let before = activity.participants.len();
            activity.participants.retain(|p| p != email);
            activity.participants.len() < before
        }
        None => false,
    }
}
