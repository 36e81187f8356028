use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use tracing::info;

use crate::clients::scheduler_client::{SchedulerApi, SchedulerClient};
use crate::config::Settings;
use crate::models::schedule::{CalendarData, CalendarQuery};
use crate::service::date_picker::{DatePicker, DayCell};
use crate::service::layout_service::{DayColumn, FixedAdvance, LayoutService};
use crate::service::panel_service::Panel;
use crate::service::schedule_form::ScheduleFormState;
use crate::tasks::panel_loop::{panel_tick, StdoutSink};

#[derive(Parser)]
#[command(about = "Technician schedule board client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a saved calendar_data JSON response.
    Layout { file: PathBuf },
    /// Fetch one week from the server and lay it out.
    Week {
        #[arg(long)]
        week_start: Option<NaiveDate>,
        #[arg(long)]
        location_id: Option<i64>,
        #[arg(long)]
        personal: bool,
    },
    /// Print the repeat-date picker for a month.
    Picker {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        primary: Option<NaiveDate>,
        #[arg(long = "select")]
        selected: Vec<NaiveDate>,
    },
    /// Refresh both sidebar panels once.
    Panels,
    Delete { schedule_id: i64 },
    /// Create a schedule from interactive prompts.
    Create,
}

pub async fn cli(settings: Settings) {
    // Fine to exit here on bad arguments
    let cli = Cli::parse();
    let api: Arc<dyn SchedulerApi> = Arc::new(SchedulerClient::new(
        settings.base_url.clone(),
        settings.csrf_token.clone(),
    ));

    match cli.command {
        Commands::Layout { file } => {
            if let Err(e) = layout_file(&settings, &file) {
                println!("Failed to lay out {}: {}", file.display(), e);
            }
        }
        Commands::Week {
            week_start,
            location_id,
            personal,
        } => {
            let query = CalendarQuery {
                week_start,
                location_id,
                personal_view: personal,
            };
            match api.calendar_data(&query).await {
                Ok(data) => print_week(&settings, &data),
                Err(e) => println!("Failed to load calendar: {}", e),
            }
        }
        Commands::Picker {
            year,
            month,
            primary,
            selected,
        } => {
            let today = Local::now().date_naive();
            let mut picker = DatePicker::new(today, primary);
            picker.show_month(
                year.unwrap_or(picker.year()),
                month.unwrap_or(picker.month()),
            );
            for date in selected {
                picker.toggle(date);
            }
            print_picker(&picker, today);
        }
        Commands::Panels => {
            for panel in Panel::ALL {
                if let Err(e) = panel_tick(api.as_ref(), &StdoutSink, panel).await {
                    println!("Failed to update {}: {}", panel.element_id(), e);
                }
            }
        }
        Commands::Delete { schedule_id } => match api.delete_schedule(schedule_id).await {
            Ok(()) => println!("Deleted schedule {}", schedule_id),
            Err(e) => println!("Failed to delete schedule: {}", e),
        },
        Commands::Create => {
            if let Err(e) = create_schedule_from_prompt(api.as_ref(), &settings.csrf_token).await {
                println!("Failed to create schedule: {}", e);
            }
        }
    }
}

fn layout_file(settings: &Settings, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file)?;
    let data: CalendarData = serde_json::from_str(&content)?;
    print_week(settings, &data);
    Ok(())
}

fn print_week(settings: &Settings, data: &CalendarData) {
    let columns =
        LayoutService::layout_week(data, settings.timezone, &settings.layout, &FixedAdvance::default());
    info!(days = columns.len(), "Calendar laid out");
    if !data.date_range.is_empty() {
        println!("{}", data.date_range);
    }
    for column in &columns {
        print_column(column);
    }
}

fn print_column(column: &DayColumn) {
    println!(
        "{} {}{}",
        column.date.format("%a %Y-%m-%d"),
        column.label.as_deref().unwrap_or(""),
        if column.is_today { " (today)" } else { "" }
    );
    if column.layout.events.is_empty() {
        println!("  (no schedules)");
    }
    for (event, placement) in column.layout.events.iter().zip(&column.layout.placements) {
        println!(
            "  {} [group {} slot {}] {}",
            event.label(),
            placement.group,
            placement.slot,
            placement.style()
        );
    }
}

fn print_picker(picker: &DatePicker, today: NaiveDate) {
    println!("{}", picker.header());
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in picker.grid(today).chunks(7) {
        let row: Vec<String> = week.iter().map(cell_text).collect();
        println!("{}", row.join(""));
    }
    println!("Selected: {}", picker.display());
    println!("direct_repeat_days_list={}", picker.form_value());
}

fn cell_text(cell: &DayCell) -> String {
    let marker = if cell.is_primary {
        'P'
    } else if cell.is_selected {
        '*'
    } else if cell.is_today {
        't'
    } else if cell.outside_month {
        '.'
    } else {
        ' '
    };
    format!(" {:>2}{}", cell.date.day(), marker)
}

async fn create_schedule_from_prompt(
    api: &dyn SchedulerApi,
    csrf_token: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let date: NaiveDate = Text::new("Schedule date (YYYY-MM-DD)").prompt()?.trim().parse()?;
    let start_hour: u32 = Text::new("Start hour (00-23)").prompt()?.trim().parse()?;
    let end_hour: u32 = Text::new("End hour (00 means midnight)").prompt()?.trim().parse()?;
    if start_hour > 23 || end_hour > 23 {
        return Err("Hours must be between 00 and 23".into());
    }
    let description = Text::new("Description").prompt()?;
    let time_off = Confirm::new("Is this time off?").with_default(false).prompt()?;
    let repeat = Text::new("Repeat on other dates (comma separated, blank for none)").prompt()?;

    let mut form = ScheduleFormState::for_slot(date, start_hour);
    form.end_hour = end_hour;
    form.description = description;
    form.time_off = time_off;

    let mut picker = DatePicker::new(date, Some(date));
    for raw in repeat.split(',').map(str::trim).filter(|raw| !raw.is_empty()) {
        picker.toggle(raw.parse::<NaiveDate>()?);
    }

    api.save_schedule(&form.submission(Some(&picker), csrf_token))
        .await?;
    println!(
        "Saved {} to {}{}",
        form.start_time_value(),
        form.end_time_value(),
        if picker.selected().is_empty() {
            String::new()
        } else {
            format!(" (also {})", picker.display())
        }
    );
    Ok(())
}
