// Diagnostic CLI for the venue directory pipeline.
//
// This binary's job is to:
// 1. Load configuration (VENUE_API_URL, falling back to the production URL)
// 2. Initialize logging
// 3. Run one fetch and print what came back
//
// Useful for checking what the directory service currently returns for a
// venue or a manager without starting the whole bot.

use anyhow::{bail, Context, Result};

use venue_directory::core::locations;
use venue_directory::core::venues::{VenueDirectory, VenueRecord};
use venue_directory::infra::directory::{VenueDirectoryClient, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Load .env file if present (for local development)
    dotenv::dotenv().ok();

    let base_url =
        std::env::var("VENUE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let client = VenueDirectoryClient::with_base_url(base_url)?;

    let mut args = std::env::args().skip(1);
    let venues = match args.next().as_deref() {
        Some("all") | None => client.fetch_all().await?,
        Some("manager") => {
            let id: u64 = args
                .next()
                .context("usage: manager <discord-user-id>")?
                .parse()
                .context("manager ID must be numeric")?;
            client.fetch_by_manager(id).await?
        }
        Some("venue") => {
            let id = args.next().context("usage: venue <venue-id>")?;
            match client.fetch_by_id(&id).await? {
                Some(venue) => vec![venue],
                None => {
                    println!("No venue with ID {id}");
                    return Ok(());
                }
            }
        }
        Some(other) => bail!("unknown subcommand `{other}` (expected: all, manager, venue)"),
    };

    println!("{} venue(s)", venues.len());
    for venue in &venues {
        print_venue(venue);
    }
    Ok(())
}

fn print_venue(venue: &VenueRecord) {
    // Skip-vs-abort on unresolved locations is a caller decision; here we
    // just flag the record and keep listing.
    let address = match &venue.location {
        Some(raw) => match locations::normalize(raw) {
            Ok(normalized) => normalized.address().unwrap_or_else(|| "-".to_string()),
            Err(err) => {
                tracing::warn!("Venue {}: {err}", venue.id);
                "(unresolved location)".to_string()
            }
        },
        None => "-".to_string(),
    };

    println!(
        "{} [{}] {} @ {} ({} slot(s), {} manager(s))",
        venue.id,
        if venue.sfw { "SFW" } else { "NSFW" },
        venue.name,
        address,
        venue.schedule.len(),
        venue.managers.len(),
    );
}
