#![deny(missing_docs)]
//! SpaceFleet command-line interface.
//!
//! Lists, counts, creates, updates, and deletes ships through the REST API.

mod client;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::{DEFAULT_SERVER_URL, ShipClient};
use spacefleet_core::{PageRequest, Ship, ShipCriteria, ShipDraft, ShipOrder, ShipPatch, ShipType};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "spacefleet", version, about = "SpaceFleet CLI")]
struct Cli {
    /// Base URL of the SpaceFleet server.
    #[arg(long, global = true, env = "SPACEFLEET_API_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug, Default)]
struct FilterArgs {
    /// Substring of the ship name.
    #[arg(long)]
    name: Option<String>,
    /// Substring of the home planet.
    #[arg(long)]
    planet: Option<String>,
    /// Ship class (TRANSPORT, MILITARY, MERCHANT).
    #[arg(long)]
    ship_type: Option<ShipType>,
    /// Produced strictly after this date (YYYY-MM-DD, RFC 3339, or epoch millis).
    #[arg(long, value_parser = parse_date)]
    after: Option<DateTime<Utc>>,
    /// Produced strictly before this date (YYYY-MM-DD, RFC 3339, or epoch millis).
    #[arg(long, value_parser = parse_date)]
    before: Option<DateTime<Utc>>,
    /// Usage flag.
    #[arg(long)]
    is_used: Option<bool>,
    /// Minimum speed.
    #[arg(long)]
    min_speed: Option<f64>,
    /// Maximum speed.
    #[arg(long)]
    max_speed: Option<f64>,
    /// Minimum crew size.
    #[arg(long)]
    min_crew_size: Option<i32>,
    /// Maximum crew size.
    #[arg(long)]
    max_crew_size: Option<i32>,
    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f64>,
    /// Maximum rating.
    #[arg(long)]
    max_rating: Option<f64>,
}

impl FilterArgs {
    fn to_criteria(&self) -> ShipCriteria {
        ShipCriteria {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            after: self.after.map(|date| date.timestamp_millis()),
            before: self.before.map(|date| date.timestamp_millis()),
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
struct ShipFieldArgs {
    /// Ship name.
    #[arg(long)]
    name: Option<String>,
    /// Home planet.
    #[arg(long)]
    planet: Option<String>,
    /// Ship class (TRANSPORT, MILITARY, MERCHANT).
    #[arg(long)]
    ship_type: Option<ShipType>,
    /// Production date (YYYY-MM-DD, RFC 3339, or epoch millis).
    #[arg(long, value_parser = parse_date)]
    prod_date: Option<DateTime<Utc>>,
    /// Usage flag.
    #[arg(long)]
    is_used: Option<bool>,
    /// Cruising speed.
    #[arg(long)]
    speed: Option<f64>,
    /// Crew size.
    #[arg(long)]
    crew_size: Option<i32>,
}

impl ShipFieldArgs {
    fn to_draft(&self) -> ShipDraft {
        ShipDraft {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }

    fn to_patch(&self) -> ShipPatch {
        ShipPatch {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List ships matching the filters, sorted and paged.
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort key (ID, SPEED, DATE, RATING).
        #[arg(long)]
        order: Option<ShipOrder>,
        /// Zero-based page index.
        #[arg(long)]
        page_number: Option<u32>,
        /// Ships per page.
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Count ships matching the filters.
    Count {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show a single ship.
    Get {
        /// Ship identifier.
        id: i64,
    },
    /// Register a new ship.
    Create {
        #[command(flatten)]
        fields: ShipFieldArgs,
    },
    /// Change selected fields of a ship.
    Update {
        /// Ship identifier.
        id: i64,
        #[command(flatten)]
        fields: ShipFieldArgs,
    },
    /// Remove a ship.
    Delete {
        /// Ship identifier.
        id: i64,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let client = ShipClient::new(&cli.server_url)?;
    let output = run_command(&client, cli.command, cli.format).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_command(
    client: &ShipClient,
    command: Commands,
    format: OutputFormat,
) -> CliResult<String> {
    match command {
        Commands::List {
            filters,
            order,
            page_number,
            page_size,
        } => {
            let ships = client
                .list(
                    &filters.to_criteria(),
                    order.unwrap_or_default(),
                    PageRequest::new(page_number, page_size),
                )
                .await?;
            render_ships(&ships, format)
        }
        Commands::Count { filters } => {
            let count = client.count(&filters.to_criteria()).await?;
            Ok(count.to_string())
        }
        Commands::Get { id } => render_ship(&client.get(id).await?, format),
        Commands::Create { fields } => render_ship(&client.create(&fields.to_draft()).await?, format),
        Commands::Update { id, fields } => {
            render_ship(&client.update(id, &fields.to_patch()).await?, format)
        }
        Commands::Delete { id } => {
            client.delete(id).await?;
            Ok(format!("Deleted ship {id}."))
        }
    }
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| format!("timestamp out of range: {raw}"));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
        .map_err(|_| format!("expected YYYY-MM-DD, RFC 3339, or epoch millis, got {raw:?}"))
}

fn render_ship(ship: &Ship, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ship)?),
        OutputFormat::Text => Ok(ship_line(ship)),
    }
}

fn render_ships(ships: &[Ship], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ships)?),
        OutputFormat::Text if ships.is_empty() => Ok("No ships found.".to_string()),
        OutputFormat::Text => Ok(ships.iter().map(ship_line).collect::<Vec<_>>().join("\n")),
    }
}

fn ship_line(ship: &Ship) -> String {
    format!(
        "#{} {} [{}] planet={} year={} used={} speed={:.2} crew={} rating={:.2}",
        ship.id,
        ship.name,
        ship.ship_type,
        ship.planet,
        ship.prod_year(),
        ship.is_used,
        ship.speed,
        ship.crew_size,
        ship.rating
    )
}
