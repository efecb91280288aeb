//! # weekgrid CLI
//!
//! Command-line interface for inspecting and editing weekly availability
//! schedules stored as JSON block arrays.
//!
//! ## Usage
//!
//! ```sh
//! # Start from the default fully-available week
//! weekgrid init -o schedule.json
//!
//! # Render the week as half-hour cells
//! weekgrid show -i schedule.json
//!
//! # Set 09:00-17:00 on Monday, Wednesday and Friday, replacing collisions
//! weekgrid add -i schedule.json -o schedule.json --days mon,wed,fri --start 09:00 --end 17:00
//!
//! # Remove one block, or clear a whole day
//! weekgrid remove -i schedule.json -o schedule.json --id 3
//! weekgrid clear-day -i schedule.json -o schedule.json --day sun
//!
//! # Reads stdin and writes stdout when -i/-o are omitted, so pipes work
//! weekgrid init | weekgrid add --days tue --start 10:00 --end 12:15 | weekgrid show
//! ```

use std::collections::BTreeSet;
use std::io::Read;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use weekgrid_engine::{
    apply_entry, display_time, to_time, BlockId, Day, ManualEntry, SaveKind, WeekSchedule,
};

/// Lowercase day tokens accepted on the command line, Monday first.
const DAY_NAMES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Row labels for `show`, indexed by day.
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Minutes covered by one cell of the `show` bar.
const CELL_MINUTES: u16 = 30;

#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(version)]
#[command(about = "Edit weekly availability schedules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the default schedule: one full-day block on each of the 7 days
    Init {
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Render a schedule as one row per day with half-hour cells
    Show {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Add a block to one or more days, replacing anything it overlaps
    Add {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Comma-separated days: names (mon..sun) or indices (0..6)
        #[arg(long)]
        days: String,

        /// Start time as HH:MM
        #[arg(long)]
        start: String,

        /// End time as HH:MM (24:00 means end of day)
        #[arg(long)]
        end: String,

        /// Treat the commit as an edit of this block id
        #[arg(long)]
        replace: Option<u64>,
    },
    /// Remove a single block by id
    Remove {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Id of the block to remove
        #[arg(long)]
        id: u64,
    },
    /// Remove every block on one day
    ClearDay {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Day to clear: a name (mon..sun) or an index (0..6)
        #[arg(long)]
        day: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            write_schedule(output.as_deref(), &WeekSchedule::full_week())?;
        }
        Commands::Show { input } => {
            let schedule = read_schedule(input.as_deref())?;
            for day in Day::ALL {
                println!("{}", render_day(&schedule, day));
            }
        }
        Commands::Add {
            input,
            output,
            days,
            start,
            end,
            replace,
        } => {
            let schedule = read_schedule(input.as_deref())?;
            let entry = ManualEntry {
                days: parse_days(&days)?,
                start,
                end,
                editing: replace.map(BlockId::from),
            };
            let save = apply_entry(&schedule, &entry).context("Failed to apply entry")?;
            report_save(&entry, save.kind, save.replaced);
            write_schedule(output.as_deref(), &save.schedule)?;
        }
        Commands::Remove { input, output, id } => {
            let schedule = read_schedule(input.as_deref())?;
            let (next, removed) = schedule.remove(BlockId::from(id));
            let removed = removed.ok_or_else(|| anyhow!("No block with id {}", id))?;
            eprintln!(
                "Removed block {} ({} {})",
                id,
                DAY_LABELS[removed.day.index()],
                span_label(removed.start, removed.end)
            );
            write_schedule(output.as_deref(), &next)?;
        }
        Commands::ClearDay { input, output, day } => {
            let schedule = read_schedule(input.as_deref())?;
            let day = parse_day(&day)?;
            let (next, cleared) = schedule.clear_day(day);
            eprintln!(
                "Cleared {} block(s) from {}",
                cleared,
                DAY_LABELS[day.index()]
            );
            write_schedule(output.as_deref(), &next)?;
        }
    }

    Ok(())
}

/// Read input from a file or stdin.
fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Write output to a file or stdout.
fn write_output(output: Option<&str>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path)),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

/// Parse a schedule from a file or stdin.
fn read_schedule(input: Option<&str>) -> Result<WeekSchedule> {
    let json = read_input(input)?;
    serde_json::from_str(&json).context("Failed to parse schedule JSON")
}

/// Serialize a schedule as pretty JSON to a file or stdout.
fn write_schedule(output: Option<&str>, schedule: &WeekSchedule) -> Result<()> {
    let json =
        serde_json::to_string_pretty(schedule).context("Failed to serialize schedule JSON")?;
    write_output(output, &json)
}

/// Parse a comma-separated day list.
///
/// Accepts three-letter names (`mon..sun`, case-insensitive) and numeric
/// indices (`0..6`, Monday first). Duplicates collapse.
fn parse_days(raw: &str) -> Result<BTreeSet<Day>> {
    let mut days = BTreeSet::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        days.insert(parse_day(token)?);
    }
    Ok(days)
}

/// Parse one day token, by name or by index.
fn parse_day(token: &str) -> Result<Day> {
    let lowered = token.to_ascii_lowercase();
    if let Some(index) = DAY_NAMES.iter().position(|&name| name == lowered) {
        return Ok(Day::new(index as u8)?);
    }
    let index: u8 = lowered
        .parse()
        .map_err(|_| anyhow!("Unknown day '{}': use mon..sun or 0..6", token))?;
    Day::new(index).with_context(|| format!("Unknown day '{}'", token))
}

/// `"09:00-17:00"` label for a stored block span.
fn span_label(start: u16, end: u16) -> String {
    format!(
        "{}-{}",
        display_time(&to_time(start)),
        display_time(&to_time(end))
    )
}

/// Render one day as a 48-cell bar plus span labels.
///
/// A cell is `#` when any block overlaps its half hour, `.` otherwise, so a
/// fully available day shows 48 `#` cells. Span labels use display form,
/// where a block running to end of day shows `00:00` for its end.
fn render_day(schedule: &WeekSchedule, day: Day) -> String {
    let mut bar = [b'.'; 48];
    for block in schedule.day_blocks(day) {
        for (cell, slot) in bar.iter_mut().enumerate() {
            let cell_start = cell as u16 * CELL_MINUTES;
            if block.overlaps(cell_start, cell_start + CELL_MINUTES) {
                *slot = b'#';
            }
        }
    }

    let spans: Vec<String> = schedule
        .day_blocks(day)
        .map(|block| span_label(block.start, block.end))
        .collect();
    let spans = if spans.is_empty() {
        "-".to_string()
    } else {
        spans.join(", ")
    };

    format!(
        "{} |{}| {}",
        DAY_LABELS[day.index()],
        String::from_utf8_lossy(&bar),
        spans
    )
}

/// Print the outcome of an `add` to stderr.
fn report_save(entry: &ManualEntry, kind: SaveKind, replaced: usize) {
    let span = format!(
        "{}-{}",
        display_time(&entry.start),
        display_time(&entry.end)
    );
    match kind {
        SaveKind::Added => {
            eprintln!("Added {} on {} day(s)", span, entry.days.len());
        }
        SaveKind::AddedWithReplacements => {
            eprintln!(
                "Added {} on {} day(s), replacing {} overlapping block(s)",
                span,
                entry.days.len(),
                replaced
            );
        }
        SaveKind::Updated => {
            eprintln!("Updated block to {} on {} day(s)", span, entry.days.len());
        }
    }
}
