use clap::Args;
use habitrack_core::habit::today;
use habitrack_core::storage::MAX_STRIP_DAYS;
use habitrack_core::{last_n_days, Config, DayKey};

#[derive(Args)]
pub struct DaysArgs {
    /// Number of days, 1 to 31 (default: strip.days from config)
    #[arg(long, value_parser = parse_strip_days)]
    count: Option<usize>,
    /// Last day of the window, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_day)]
    reference: Option<DayKey>,
    /// Print a JSON array instead of one day per line
    #[arg(long)]
    json: bool,
}

pub(crate) fn parse_day(value: &str) -> Result<DayKey, String> {
    DayKey::parse(value).map_err(|e| e.to_string())
}

/// Strip width within the range the config file accepts.
pub(crate) fn parse_strip_days(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(days) if (1..=MAX_STRIP_DAYS).contains(&days) => Ok(days),
        _ => Err(format!("expected a number of days between 1 and {MAX_STRIP_DAYS}")),
    }
}

pub fn run(args: DaysArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let count = args.count.unwrap_or(config.strip.days);
    let reference = args
        .reference
        .unwrap_or_else(|| today(config.strip.day_boundary));

    let days = last_n_days(count, reference);
    if args.json {
        println!("{}", serde_json::to_string(&days)?);
    } else {
        for day in days {
            println!("{day}");
        }
    }
    Ok(())
}
