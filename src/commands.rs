use anyhow::Result;

use crate::client::{ActivitiesClient, SIGNUP_FALLBACK, UNREGISTER_FALLBACK};
use crate::roster;

/// Fetch the catalog and print one card per activity.
pub async fn run_board(base_url: &str, verbose: bool) -> Result<()> {
    let client = ActivitiesClient::new(base_url)?;
    let catalog = client.get_activities().await?;

    if verbose {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No activities available.");
        return Ok(());
    }

    for card in roster::build_cards(&catalog) {
        println!("{}", card.name);
        println!("  {}", card.description);
        println!("  Schedule: {}", card.schedule);
        println!("  Availability: {} spots left", card.spots_left);
        if card.roster.is_empty() {
            println!("  Participants: none yet");
        } else {
            println!("  Participants:");
            for row in &card.roster {
                println!("    [{}] {}", row.initials, row.email);
            }
        }
        println!();
    }

    Ok(())
}

pub async fn run_signup(base_url: &str, activity: &str, email: &str) -> Result<()> {
    let client = ActivitiesClient::new(base_url)?;
    let outcome = client.signup(activity, email).await?;

    if !outcome.is_success() {
        anyhow::bail!("{}", outcome.display_text(SIGNUP_FALLBACK));
    }
    println!("{}", outcome.display_text(SIGNUP_FALLBACK));

    Ok(())
}

pub async fn run_unregister(base_url: &str, activity: &str, email: &str) -> Result<()> {
    let client = ActivitiesClient::new(base_url)?;
    let outcome = client.unregister(activity, email).await?;

    if !outcome.is_success() {
        anyhow::bail!("{}", outcome.display_text(UNREGISTER_FALLBACK));
    }
    println!("{}", outcome.display_text(UNREGISTER_FALLBACK));

    Ok(())
}
