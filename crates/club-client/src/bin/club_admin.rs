use std::path::PathBuf;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use club_client::{ClubApi, ClubClient, Snapshot};
use membership::{
    ActiveMembership, Athlete,
    dto::{
        athlete::{AthleteAttachments, AthleteForm},
        fee::{FeeForm, FeeWithAthlete},
        menu::MenuEntry,
    },
    models::{accessible_menu, calendar::parse_instant},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "club-admin")]
#[command(about = "Club athletes and membership fees administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root of the club backend, e.g. http://localhost:8000
    #[arg(long, env = "CLUB_API_URL", global = true)]
    base_url: Option<String>,

    #[arg(long, env = "CLUB_API_TIMEOUT_SECS", default_value_t = 10, global = true)]
    timeout_secs: u64,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Memberships started in the last 30 days, soonest to expire first
    Active {
        /// Evaluate at this date or datetime instead of now
        #[arg(long, value_parser = parse_at)]
        at: Option<NaiveDateTime>,

        /// Read fees and athletes from a saved snapshot instead of the API
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },
    /// Save fees and athletes to a JSON file
    Snapshot {
        #[arg(long)]
        output: PathBuf,
    },
    Athletes {
        #[command(subcommand)]
        command: AthleteCommands,
    },
    Fees {
        #[command(subcommand)]
        command: FeeCommands,
    },
    /// Dashboard sections visible to a role list
    Menu {
        #[arg(long = "role")]
        roles: Vec<i32>,
    },
}

#[derive(Subcommand)]
enum AthleteCommands {
    List,
    Show {
        id: i64,
    },
    Create {
        #[command(flatten)]
        fields: AthleteArgs,
    },
    /// Update an athlete; unspecified fields keep their stored value
    Update {
        id: i64,

        #[command(flatten)]
        fields: AthleteArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(clap::Args)]
struct AthleteArgs {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    father_name: Option<String>,

    #[arg(long)]
    current_location: Option<String>,

    #[arg(long)]
    permanent_location: Option<String>,

    #[arg(long)]
    date_of_birth: Option<NaiveDate>,

    /// National id scan to upload
    #[arg(long)]
    nic: Option<PathBuf>,

    #[arg(long)]
    picture: Option<PathBuf>,

    #[arg(long)]
    document: Option<PathBuf>,
}

impl AthleteArgs {
    fn into_parts(self, mut form: AthleteForm) -> (AthleteForm, AthleteAttachments) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(last_name) = self.last_name {
            form.last_name = last_name;
        }
        if self.father_name.is_some() {
            form.father_name = self.father_name;
        }
        if self.current_location.is_some() {
            form.current_location = self.current_location;
        }
        if self.permanent_location.is_some() {
            form.permanent_location = self.permanent_location;
        }
        if self.date_of_birth.is_some() {
            form.date_of_birth = self.date_of_birth;
        }

        let attachments = AthleteAttachments {
            nic: self.nic,
            picture: self.picture,
            document: self.document,
        };

        (form, attachments)
    }
}

#[derive(Subcommand)]
enum FeeCommands {
    List,
    Create {
        #[command(flatten)]
        fields: FeeArgs,
    },
    Update {
        id: i64,

        #[command(flatten)]
        fields: FeeArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(clap::Args)]
struct FeeArgs {
    #[arg(long)]
    athlete: i64,

    #[arg(long)]
    fee: Decimal,

    #[arg(long, default_value_t = Decimal::ZERO)]
    taken: Decimal,

    #[arg(long)]
    starting_date: NaiveDate,
}

impl From<FeeArgs> for FeeForm {
    fn from(args: FeeArgs) -> Self {
        Self {
            athlete: args.athlete,
            fee: args.fee,
            taken: args.taken,
            starting_date: args.starting_date,
        }
    }
}

fn parse_at(raw: &str) -> Result<NaiveDateTime, String> {
    parse_instant(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("club_admin={},club_client={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout_secs),
        json: cli.json,
    };

    match cli.command {
        Commands::Active { at, snapshot } => handle_active(&settings, at, snapshot).await?,
        Commands::Snapshot { output } => handle_snapshot_export(&settings, output).await?,
        Commands::Athletes { command } => handle_athletes(&settings, command).await?,
        Commands::Fees { command } => handle_fees(&settings, command).await?,
        Commands::Menu { roles } => {
            let entries: Vec<MenuEntry> = accessible_menu(&roles)
                .into_iter()
                .map(MenuEntry::from)
                .collect();
            if settings.json {
                print_json(&entries)?;
            } else {
                for entry in entries {
                    println!("{:<16} {}", entry.value.value(), entry.label);
                }
            }
        }
    }

    Ok(())
}

struct Settings {
    base_url: Option<String>,
    timeout: Duration,
    json: bool,
}

impl Settings {
    fn client(&self) -> Result<ClubClient, Box<dyn std::error::Error>> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or("No club API configured: pass --base-url or set CLUB_API_URL")?;

        Ok(ClubClient::with_timeout(base_url, self.timeout)?)
    }
}

async fn handle_active(
    settings: &Settings,
    at: Option<NaiveDateTime>,
    snapshot_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = match snapshot_file {
        Some(path) => {
            tracing::info!("Loading snapshot from: {}", path.display());
            let content = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str::<Snapshot>(&content)?
        }
        None => {
            let client = settings.client()?;
            tracing::info!("Fetching fees and athletes from {}", client.base_url());
            Snapshot::fetch(&client).await?
        }
    };

    let now = at.unwrap_or_else(|| chrono::Local::now().naive_local());
    let active = snapshot.active_memberships(now);
    tracing::info!(
        "{} active memberships out of {} fees at {}",
        active.len(),
        snapshot.fees.len(),
        now
    );

    if settings.json {
        return print_json(&active);
    }

    if active.is_empty() {
        println!("No active athletes found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<28} {:<11} {:>10} {:>10} {:>10}  {}",
        "FEE", "ATHLETE", "STARTED", "FEE", "TAKEN", "LEFT", "DAYS"
    );
    for membership in &active {
        println!("{}", membership_row(membership));
    }

    Ok(())
}

fn membership_row(membership: &ActiveMembership) -> String {
    let athlete = membership
        .athlete
        .as_ref()
        .map(Athlete::full_name)
        .unwrap_or_else(|| "Unknown".to_string());
    let days = if membership.is_expired() {
        "finished".to_string()
    } else {
        membership.remaining_days.to_string()
    };

    format!(
        "{:<6} {:<28} {:<11} {:>10} {:>10} {:>10}  {}",
        membership.id,
        athlete,
        membership.starting_date.to_string(),
        membership.fee.to_string(),
        membership.taken.to_string(),
        membership.remainder.to_string(),
        days
    )
}

async fn handle_snapshot_export(
    settings: &Settings,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = settings.client()?;
    let snapshot = Snapshot::fetch(&client).await?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(&snapshot)?;
    tokio::fs::write(&output, json).await?;

    tracing::info!(
        "Saved {} fees and {} athletes to: {}",
        snapshot.fees.len(),
        snapshot.athletes.len(),
        output.display()
    );

    Ok(())
}

async fn handle_athletes(
    settings: &Settings,
    command: AthleteCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = settings.client()?;

    match command {
        AthleteCommands::List => {
            let athletes = client.list_athletes().await?;
            if settings.json {
                return print_json(&athletes);
            }
            for athlete in &athletes {
                print_athlete(athlete);
            }
        }
        AthleteCommands::Show { id } => {
            let athlete = client.get_athlete(id).await?;
            if settings.json {
                return print_json(&athlete);
            }
            print_athlete(&athlete);
        }
        AthleteCommands::Create { fields } => {
            let (form, attachments) = fields.into_parts(AthleteForm::default());
            let athlete = client.create_athlete(&form, &attachments).await?;
            tracing::info!("✓ Created athlete {} ({})", athlete.full_name(), athlete.id);
            if settings.json {
                return print_json(&athlete);
            }
        }
        AthleteCommands::Update { id, fields } => {
            let existing = client.get_athlete(id).await?;
            let (form, attachments) = fields.into_parts(AthleteForm::from(&existing));
            let athlete = client.update_athlete(id, &form, &attachments).await?;
            tracing::info!("✓ Updated athlete {} ({})", athlete.full_name(), athlete.id);
            if settings.json {
                return print_json(&athlete);
            }
        }
        AthleteCommands::Delete { id } => {
            client.delete_athlete(id).await?;
            tracing::info!("✓ Deleted athlete {}", id);
        }
    }

    Ok(())
}

fn print_athlete(athlete: &Athlete) {
    println!(
        "{:<6} {:<28} {}",
        athlete.id,
        athlete.full_name(),
        athlete.picture.as_deref().unwrap_or("-")
    );
}

async fn handle_fees(
    settings: &Settings,
    command: FeeCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = settings.client()?;

    match command {
        FeeCommands::List => {
            let snapshot = Snapshot::fetch(&client).await?;
            let listing = snapshot.fee_listing();
            if settings.json {
                return print_json(&listing);
            }
            for entry in &listing {
                println!("{}", fee_row(entry));
            }
        }
        FeeCommands::Create { fields } => {
            let form = FeeForm::from(fields);
            if form.taken > form.fee {
                tracing::warn!("Taken amount {} exceeds the fee {}", form.taken, form.fee);
            }
            let fee = client.create_fee(&form).await?;
            tracing::info!("✓ Created fee {} (remainder {})", fee.id, fee.remainder);
            if settings.json {
                return print_json(&fee);
            }
        }
        FeeCommands::Update { id, fields } => {
            let form = FeeForm::from(fields);
            let fee = client.update_fee(id, &form).await?;
            tracing::info!("✓ Updated fee {} (remainder {})", fee.id, fee.remainder);
            if settings.json {
                return print_json(&fee);
            }
        }
        FeeCommands::Delete { id } => {
            client.delete_fee(id).await?;
            tracing::info!("✓ Deleted fee {}", id);
        }
    }

    Ok(())
}

fn fee_row(entry: &FeeWithAthlete) -> String {
    format!(
        "{:<6} {:<28} {:<11} {:>10} {:>10} {:>10}",
        entry.fee.id,
        entry.athlete_name.as_deref().unwrap_or("Unknown"),
        entry.fee.starting_date.as_deref().unwrap_or("-"),
        entry.fee.fee.to_string(),
        entry.fee.taken.to_string(),
        entry.fee.remainder.to_string()
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use membership::Fee;

    fn membership(remaining_days: u32, athlete: Option<Athlete>) -> ActiveMembership {
        ActiveMembership {
            id: 7,
            athlete_id: Some(3),
            athlete,
            starting_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            expires_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            fee: Decimal::from(1000),
            taken: Decimal::from(600),
            remainder: Decimal::from(400),
            remaining_days,
        }
    }

    #[test]
    fn test_membership_row_falls_back_for_missing_athlete_and_expiry() {
        let row = membership_row(&membership(0, None));

        assert!(row.contains("Unknown"));
        assert!(row.contains("finished"));
        assert!(row.starts_with("7 "));
    }

    #[test]
    fn test_membership_row_shows_name_and_days() {
        let athlete = Athlete {
            id: 3,
            name: "Sara".to_string(),
            last_name: "Ahmadi".to_string(),
            father_name: None,
            current_location: None,
            permanent_location: None,
            date_of_birth: None,
            picture: None,
            nic: None,
            document: None,
        };
        let row = membership_row(&membership(12, Some(athlete)));

        assert!(row.contains("Sara Ahmadi"));
        assert!(row.ends_with(" 12"));
        assert!(!row.contains("finished"));
    }

    #[test]
    fn test_fee_row_falls_back_for_missing_athlete_and_date() {
        let entry = FeeWithAthlete {
            fee: Fee {
                id: 9,
                athlete: None,
                starting_date: None,
                fee: Decimal::from(500),
                taken: Decimal::ZERO,
                remainder: Decimal::from(500),
            },
            athlete_name: None,
        };
        let row = fee_row(&entry);

        assert!(row.contains("Unknown"));
        assert!(row.contains(" - "));
        assert!(row.ends_with("500"));
    }
}
