use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use darksky_core::{
    Config, ForecastOptions, ForecastSection, Language, Units, client_from_config,
};

use crate::{configure, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "darksky", version, about = "Dark Sky forecast CLI")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default units/language.
    Configure,

    /// Show the forecast for a location.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Latitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in decimal degrees.
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Point in time (RFC 3339 or unix seconds); if absent, means "now".
    #[arg(long)]
    pub time: Option<String>,

    /// Return hourly data for the next 168 hours instead of 48.
    #[arg(long, conflicts_with = "time")]
    pub extend_hourly: bool,

    /// Comma-separated sections to leave out, e.g. "minutely,flags".
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<ForecastSection>,

    /// Unit system; overrides the configured one.
    #[arg(long)]
    pub units: Option<Units>,

    /// Summary language; overrides the configured one.
    #[arg(long)]
    pub lang: Option<Language>,

    /// Print the decoded forecast as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure::run(),
            Command::Show(args) => show(args).await,
        }
    }
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut client = client_from_config(&config)?;

    if args.units.is_some() {
        client.set_units(args.units);
    }
    if args.lang.is_some() {
        client.set_language(args.lang);
    }

    let result = match args.time.as_deref() {
        Some(raw) => {
            let time = parse_time(raw)?;
            tracing::info!(%time, "requesting time machine forecast");
            client
                .get_forecast_at(args.latitude, args.longitude, time, &args.exclude)
                .await
        }
        None => {
            let options = ForecastOptions::new()
                .extend_hourly(args.extend_hourly)
                .excluding(args.exclude);
            client
                .get_forecast(args.latitude, args.longitude, &options)
                .await
        }
    };

    let (forecast, metadata) = result
        .into_result()
        .context("Failed to fetch forecast")?;

    if args.json {
        let json = serde_json::to_string_pretty(&forecast)
            .context("Failed to serialize forecast as JSON")?;
        println!("{json}");
    } else {
        print!("{}", render::summary(&forecast, &metadata));
    }

    Ok(())
}

/// Accepts RFC 3339 (`2017-11-06T18:00:00Z`) or unix seconds (`1509991200`).
fn parse_time(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(secs) = raw.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| anyhow!("Timestamp {secs} is out of range"));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| {
            format!("Invalid time '{raw}'. Use RFC 3339 (2017-11-06T18:00:00Z) or unix seconds.")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_arguments() {
        let cli = Cli::try_parse_from([
            "darksky",
            "-vv",
            "show",
            "37.8",
            "-122.4",
            "--exclude",
            "minutely,flags",
            "--units",
            "si",
            "--lang",
            "zh-tw",
            "--json",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.verbose, 2);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.latitude, 37.8);
        assert_eq!(args.longitude, -122.4);
        assert_eq!(args.exclude, vec![ForecastSection::Minutely, ForecastSection::Flags]);
        assert_eq!(args.units, Some(Units::Si));
        assert_eq!(args.lang, Some(Language::TraditionalChinese));
        assert!(args.json);
    }

    #[test]
    fn rejects_unknown_section() {
        let err = Cli::try_parse_from(["darksky", "show", "1", "2", "--exclude", "weekly"])
            .unwrap_err();
        assert!(err.to_string().contains("Unknown forecast section 'weekly'"));
    }

    #[test]
    fn extend_hourly_conflicts_with_time() {
        let err = Cli::try_parse_from([
            "darksky",
            "show",
            "1",
            "2",
            "--time",
            "1509991200",
            "--extend-hourly",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn parse_time_formats() {
        assert_eq!(parse_time("1000000000").unwrap().timestamp(), 1_000_000_000);
        assert_eq!(
            parse_time("2017-11-06T10:00:00-08:00").unwrap().timestamp(),
            1_509_991_200
        );
        assert!(parse_time("next tuesday").is_err());
    }
}
