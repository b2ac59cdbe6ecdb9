//! `slots` CLI — generate bookable slots and check working hours from the
//! command line.
//!
//! ## Usage
//!
//! ```sh
//! # Hourly slots for one date, grouped by opening block
//! slots generate --schedule week.json --date 2026-03-16 --duration 60
//!
//! # Same, flattened, with the round-hour extension
//! slots generate --schedule week.json --date 2026-03-16 --duration 45 --extend-to-next-hour --flat
//!
//! # Month view for the booking calendar, with fully booked dates
//! slots calendar --schedule week.json --month 2026-03 --unavailable 2026-03-18,2026-03-19
//!
//! # Is an appointment inside working hours?
//! slots check --schedule week.json --start 2026-03-16T18:00:00 --end 2026-03-16T19:00:00
//!
//! # Which list filters show an appointment?
//! slots period --at 2026-03-20T10:00:00Z --now 2026-03-16T12:00:00Z
//!
//! # Time-picker choices at 15-minute precision
//! slots picker --precision 15
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` or pass `--verbose` for debug output.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use slot_engine::{
    applicable_periods, classify_period, flatten, generate_day_slots, is_within_working_hours,
    list_calendar, month_calendar, SlotOptions, TimeOfDay, TimeRange, WeekSchedule,
};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Bookable time-slot generator for appointment schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate slots for one date
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Print one flat list instead of per-block groups
        #[arg(long)]
        flat: bool,
    },
    /// List slots and selectability for a span of dates
    Calendar {
        #[command(flatten)]
        generation: GenerationArgs,
        /// First date (YYYY-MM-DD)
        #[arg(long, requires = "to", conflicts_with = "month")]
        from: Option<NaiveDate>,
        /// Last date, inclusive (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
        /// Whole calendar month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        /// Comma-separated dates that are already fully booked
        #[arg(long, value_delimiter = ',')]
        unavailable: Vec<NaiveDate>,
    },
    /// Check whether an appointment falls within working hours
    Check {
        /// Week schedule JSON file
        #[arg(short, long)]
        schedule: String,
        /// Appointment start (RFC 3339, naive wall-clock, or Unix seconds)
        #[arg(long)]
        start: String,
        /// Appointment end (same formats as --start)
        #[arg(long)]
        end: String,
        /// IANA timezone of the business
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Classify an appointment time into a relative period bucket
    Period {
        /// Appointment start (RFC 3339, naive wall-clock, or Unix seconds)
        #[arg(long)]
        at: String,
        /// Reference time (defaults to the current time)
        #[arg(long)]
        now: Option<String>,
        /// IANA timezone used for naive inputs
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// List time-picker choices at a given minute precision
    Picker {
        #[arg(long, default_value_t = 15)]
        precision: u32,
    },
}

/// Flags shared by the slot-producing subcommands.
#[derive(Args)]
struct GenerationArgs {
    /// Week schedule JSON file
    #[arg(short, long)]
    schedule: String,
    /// Generation options JSON file (durationMinutes, extendToNextHour)
    #[arg(long)]
    options: Option<String>,
    /// Appointment duration in minutes (overrides --options)
    #[arg(short, long)]
    duration: Option<u32>,
    /// Offer the round hour reached by the last slot as an extra start
    #[arg(long)]
    extend_to_next_hour: bool,
}

impl GenerationArgs {
    fn load(&self) -> Result<(WeekSchedule, SlotOptions)> {
        let week = read_schedule(&self.schedule)?;

        let mut options = match &self.options {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file: {}", path))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("Invalid options file: {}", path))?
            }
            None => SlotOptions::default(),
        };
        if let Some(duration) = self.duration {
            options.duration_minutes = duration;
        }
        if self.extend_to_next_hour {
            options.extend_to_next_hour = true;
        }

        debug!(
            schedule = %self.schedule,
            duration = options.duration_minutes,
            extend = options.extend_to_next_hour,
            "loaded generation inputs"
        );
        Ok((week, options))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            generation,
            date,
            flat,
        } => {
            let (week, options) = generation.load()?;
            let blocks = generate_day_slots(week.for_date(date), date, &options)
                .context("Failed to generate slots")?;
            debug!(%date, blocks = blocks.len(), "generated slots");

            let json = if flat {
                serde_json::to_string_pretty(&flatten(&blocks))?
            } else {
                serde_json::to_string_pretty(&blocks)?
            };
            println!("{}", json);
        }
        Commands::Calendar {
            generation,
            from,
            to,
            month,
            unavailable,
        } => {
            let (week, options) = generation.load()?;
            let unavailable: BTreeSet<NaiveDate> = unavailable.into_iter().collect();

            let days = match (month, from, to) {
                (Some(month), _, _) => {
                    let (year, month) = parse_month(&month)?;
                    month_calendar(&week, year, month, &options, &unavailable)
                }
                (None, Some(from), Some(to)) => {
                    list_calendar(&week, from, to, &options, &unavailable)
                }
                _ => bail!("Either --month or both --from and --to are required"),
            }
            .context("Failed to build calendar")?;
            debug!(days = days.len(), "built calendar");

            println!("{}", serde_json::to_string_pretty(&days)?);
        }
        Commands::Check {
            schedule,
            start,
            end,
            timezone,
        } => {
            let week = read_schedule(&schedule)?;
            let tz = parse_timezone(&timezone)?;
            let proposed = TimeRange::new(wall_clock(&start, tz)?, wall_clock(&end, tz)?)
                .context("Invalid appointment range")?;

            if is_within_working_hours(&week, &proposed) {
                println!("within");
            } else {
                warn!(
                    start = %proposed.start(),
                    end = %proposed.end(),
                    "appointment is outside working hours"
                );
                println!("outside");
            }
        }
        Commands::Period { at, now, timezone } => {
            let tz = parse_timezone(&timezone)?;
            let appointment = instant(&at, tz)?;
            let now = match now {
                Some(now) => instant(&now, tz)?,
                None => Utc::now(),
            };

            let period = classify_period(&appointment, &now);
            let applicable = applicable_periods(&appointment, &now);
            debug!(%appointment, %now, %period, "classified appointment");

            let out = serde_json::json!({ "period": period, "applicable": applicable });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Picker { precision } => {
            let options = TimeOfDay::picker_options(precision).context("Invalid precision")?;
            for option in options {
                println!("{}", option);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_schedule(path: &str) -> Result<WeekSchedule> {
    let json = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("Failed to read schedule file: {}", path))?;
    WeekSchedule::from_json(&json).with_context(|| format!("Invalid schedule file: {}", path))
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Invalid timezone: {}", name))
}

/// Parse `YYYY-MM` into (year, month).
fn parse_month(s: &str) -> Result<(i32, u32)> {
    let (year, month) = s
        .split_once('-')
        .with_context(|| format!("Invalid month '{}': expected YYYY-MM", s))?;
    let year = year
        .parse::<i32>()
        .with_context(|| format!("Invalid year in '{}'", s))?;
    let month = month
        .parse::<u32>()
        .with_context(|| format!("Invalid month in '{}'", s))?;
    Ok((year, month))
}

/// An input instant as given: RFC 3339 with offset, naive local time, or
/// Unix seconds.
enum RawInstant {
    Zoned(DateTime<Utc>),
    Naive(NaiveDateTime),
}

fn parse_raw_instant(s: &str) -> Result<RawInstant> {
    if let Ok(secs) = s.parse::<i64>() {
        let dt = DateTime::from_timestamp(secs, 0)
            .with_context(|| format!("Unix timestamp out of range: {}", s))?;
        return Ok(RawInstant::Zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(RawInstant::Zoned(dt.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(RawInstant::Naive(naive));
        }
    }
    bail!("Invalid datetime '{}': expected RFC 3339, YYYY-MM-DDTHH:MM[:SS], or Unix seconds", s)
}

/// The business wall-clock time for an input instant.
fn wall_clock(s: &str, tz: Tz) -> Result<NaiveDateTime> {
    Ok(match parse_raw_instant(s)? {
        RawInstant::Zoned(dt) => dt.with_timezone(&tz).naive_local(),
        RawInstant::Naive(naive) => naive,
    })
}

/// The absolute instant for an input, reading naive values in `tz`.
fn instant(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    Ok(match parse_raw_instant(s)? {
        RawInstant::Zoned(dt) => dt,
        RawInstant::Naive(naive) => tz
            .from_local_datetime(&naive)
            .earliest()
            .with_context(|| format!("{} does not exist in {}", s, tz))?
            .with_timezone(&Utc),
    })
}
