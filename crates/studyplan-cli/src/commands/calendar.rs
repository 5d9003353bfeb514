use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::Args;
use studyplan_core::{
    month_view_days, parse_local_date, project_reviews, today_local, CalendarEngine, Config,
    CoreError, DayEvents, Snapshot, SnapshotError,
};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Args)]
pub struct SnapshotArgs {
    /// JSON file with themes, tasks, goals and projects
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// As-of date (YYYY-MM-DD); defaults to the local date
    #[arg(long, value_parser = parse_day)]
    today: Option<NaiveDate>,
}

#[derive(Args)]
pub struct DayArgs {
    /// Day to show (YYYY-MM-DD)
    #[arg(value_parser = parse_day)]
    date: NaiveDate,
    #[command(flatten)]
    common: SnapshotArgs,
}

#[derive(Args)]
pub struct MonthArgs {
    /// Month to show (YYYY-MM)
    #[arg(value_parser = parse_month)]
    month: (i32, u32),
    #[command(flatten)]
    common: SnapshotArgs,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    parse_local_date(value).ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DD"))
}

fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("invalid month '{value}', expected YYYY-MM");
    let (year, month) = value.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

impl SnapshotArgs {
    fn load(&self, config: &Config) -> Result<Snapshot, CoreError> {
        let path = self
            .snapshot
            .clone()
            .or_else(|| config.snapshot_path.clone())
            .ok_or(SnapshotError::NotConfigured)?;
        Snapshot::load(&path)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(today_local)
    }
}

fn visible_month(year: i32, month: u32, config: &Config) -> Result<Vec<NaiveDate>, String> {
    month_view_days(year, month, config.calendar.week_start)
        .ok_or_else(|| format!("invalid month {year}-{month:02}"))
}

pub fn run_day(args: DayArgs, config: &Config) -> CmdResult {
    let snapshot = args.common.load(config)?;
    let visible = visible_month(args.date.year(), args.date.month(), config)?;

    let mut engine = CalendarEngine::new();
    engine.refresh(&snapshot, &visible, args.common.today());
    let events = engine.events_for_day(&snapshot, args.date);

    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

pub fn run_projected(args: SnapshotArgs, config: &Config) -> CmdResult {
    let snapshot = args.load(config)?;
    let projected = project_reviews(&snapshot.themes, args.today());
    println!("{}", serde_json::to_string_pretty(&projected)?);
    Ok(())
}

pub fn run_month(args: MonthArgs, config: &Config) -> CmdResult {
    let snapshot = args.common.load(config)?;
    let (year, month) = args.month;
    let visible = visible_month(year, month, config)?;

    let mut engine = CalendarEngine::new();
    engine.refresh(&snapshot, &visible, args.common.today());

    let days: BTreeMap<NaiveDate, DayEvents> = visible
        .iter()
        .map(|day| (*day, engine.events_for_day(&snapshot, *day)))
        .filter(|(_, events)| !events.is_empty())
        .collect();

    tracing::info!(days = days.len(), year, month, "month view");
    println!("{}", serde_json::to_string_pretty(&days)?);
    Ok(())
}
