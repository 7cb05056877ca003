use chrono::{DateTime, Local, Utc};
use clap::{Args, Subcommand};
use planline_core::feed::parse_instant;
use planline_core::{
    project_items, task_items, Bar, Config, Granularity, Item, Layout, LayoutEngine,
    ProjectRecord, TaskRecord, Zone,
};
use serde::Serialize;
use std::io::Read;

use crate::chart;

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Lay out timeline items (id, label, start, end, progress)
    Items(LayoutArgs),
    /// Lay out project records (id, name, startDate, endDate)
    Projects(LayoutArgs),
    /// Lay out task records (id, title, status, points, startDate, dueDate)
    Tasks(LayoutArgs),
}

#[derive(Args)]
pub struct LayoutArgs {
    /// JSON array to read, or "-" for stdin
    #[arg(short, long, default_value = "-")]
    input: String,
    /// Bucket size: day, week or month (defaults to the configured value)
    #[arg(short, long)]
    granularity: Option<Granularity>,
    /// Override the current instant (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    now: Option<String>,
    /// Print the layout as JSON instead of a chart
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Row<'a> {
    id: &'a str,
    label: &'a str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    progress: f64,
    bar: Option<Bar>,
}

#[derive(Serialize)]
struct Report<'a> {
    layout: &'a Layout,
    rows: Vec<Row<'a>>,
}

pub fn run(action: TimelineAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    let (args, source) = match &action {
        TimelineAction::Items(args) => (args, Source::Items),
        TimelineAction::Projects(args) => (args, Source::Projects),
        TimelineAction::Tasks(args) => (args, Source::Tasks),
    };
    let granularity = args
        .granularity
        .unwrap_or(config.timeline.default_granularity);
    let now = match &args.now {
        Some(value) => parse_instant(value)?,
        None => Utc::now(),
    };

    let input = read_input(&args.input)?;
    let items = source.items(&input, granularity)?;
    tracing::debug!(count = items.len(), %granularity, "loaded timeline items");

    let layout = match config.zone()? {
        Zone::Local => LayoutEngine::new(Local).compute(&items, granularity, now),
        Zone::Utc => LayoutEngine::new(Utc).compute(&items, granularity, now),
        Zone::Fixed(offset) => LayoutEngine::new(offset).compute(&items, granularity, now),
    };

    if args.json {
        let rows = items
            .iter()
            .map(|item| Row {
                id: &item.id,
                label: &item.label,
                start: item.start,
                end: item.end,
                progress: item.progress,
                bar: layout.bar(item),
            })
            .collect();
        let report = Report {
            layout: &layout,
            rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", chart::render(&items, &layout, &config.chart));
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Source {
    Items,
    Projects,
    Tasks,
}

impl Source {
    fn items(
        self,
        input: &str,
        granularity: Granularity,
    ) -> Result<Vec<Item>, Box<dyn std::error::Error>> {
        let items = match self {
            Self::Items => serde_json::from_str::<Vec<Item>>(input)?,
            Self::Projects => project_items(&serde_json::from_str::<Vec<ProjectRecord>>(input)?),
            Self::Tasks => task_items(&serde_json::from_str::<Vec<TaskRecord>>(input)?, granularity),
        };
        Ok(items)
    }
}

fn read_input(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}").into())
    }
}
