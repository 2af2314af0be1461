use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dosha_balance::models::{Archetype, EventType, Intensity, LocalEvent};
use dosha_balance::quiz::{self, QuizSession, QUESTIONS};
use dosha_balance::{db, evaluate, profiles, report};

const DEFAULT_DATABASE_URL: &str = "sqlite://dosha-balance.db";

#[derive(Parser)]
#[command(name = "dosha-balance")]
#[command(about = "Dosha-aware burnout scoring for your calendar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Take the dosha quiz and store the result
    Quiz {
        /// Comma-separated answers (v/p/k, 1-3, or - to skip) instead of prompting
        #[arg(long)]
        answers: Option<String>,
    },
    /// Show the archetype profile and burnout protocol
    Profile {
        #[arg(long)]
        archetype: Option<Archetype>,
    },
    /// Quick-add a local event
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "type")]
        event_type: Option<EventType>,
        #[arg(long)]
        duration: Option<i64>,
        #[arg(long)]
        intensity: Option<Intensity>,
    },
    /// Replace all events with the default demo schedule
    ResetEvents,
    /// Import calendar entries from a CSV file (id,summary,start,end)
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Score the current schedule
    Score {
        #[arg(long)]
        archetype: Option<Archetype>,
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown insights report
    Report {
        #[arg(long)]
        archetype: Option<Archetype>,
        #[arg(long, default_value = "insights.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let pool = db::connect(&database_url).await?;
    db::init_db(&pool)
        .await
        .context("failed to apply migrations")?;

    match cli.command {
        Commands::InitDb => {
            println!("Schema ready.");
        }
        Commands::Quiz { answers } => {
            let dominant = match answers {
                Some(script) => quiz::dominant_archetype(&quiz::parse_answers(&script)?),
                None => run_interactive_quiz()?,
            };
            db::save_archetype(&pool, dominant).await?;
            let profile = profiles::profile(dominant);
            println!("Your dominant dosha is {dominant}.");
            println!("{}", profile.profile);
        }
        Commands::Profile { archetype } => {
            let archetype = match archetype {
                Some(value) => value,
                None => db::load_archetype(&pool).await?.resolve().unwrap_or(Archetype::Vata),
            };
            print_profile(archetype);
        }
        Commands::Add {
            title,
            event_type,
            duration,
            intensity,
        } => {
            let event = LocalEvent::quick_add(title, event_type, duration, intensity);
            db::insert_local_event(&pool, &event).await?;
            println!("Added event {}.", event.id);
        }
        Commands::ResetEvents => {
            let count = db::reset_events(&pool).await?;
            println!("Restored {count} default events.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} events from {}.", csv.display());
        }
        Commands::Score { archetype, json } => {
            let archetype = resolve_archetype(&pool, archetype).await?;
            let raw = db::fetch_events_or_empty(&pool).await;
            let dashboard = evaluate(&raw, archetype);
            info!(
                events = dashboard.events.len(),
                percentage = dashboard.insights.burnout.percentage,
                "schedule scored"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
                return Ok(());
            }

            let insights = &dashboard.insights;
            println!(
                "Burnout threshold {}% ({}): {}",
                insights.burnout.percentage,
                insights.burnout.color().as_str(),
                insights.burnout.status_text()
            );
            println!(
                "Alignment {}% - {}: {}",
                insights.alignment.percentage, insights.alignment.status, insights.alignment.subtext
            );
            println!("Drainer: {} - {}", insights.drainer.title, insights.drainer.subtext);
            println!(
                "Recommendation: {} - {} [{}]",
                insights.recommendation.title,
                insights.recommendation.text,
                insights.recommendation.button_text
            );
            println!("{}", insights.ai_summary.sentence());
            for ritual in &insights.rituals {
                println!("  {} {}", ritual.icon, ritual.label);
            }
        }
        Commands::Report { archetype, out } => {
            let archetype = resolve_archetype(&pool, archetype).await?;
            let raw = db::fetch_events_or_empty(&pool).await;
            let dashboard = evaluate(&raw, archetype);
            let report = report::render_report(
                archetype,
                Utc::now().date_naive(),
                &dashboard.events,
                &dashboard.insights,
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

async fn resolve_archetype(
    pool: &SqlitePool,
    explicit: Option<Archetype>,
) -> anyhow::Result<Option<Archetype>> {
    if let Some(archetype) = explicit {
        return Ok(Some(archetype));
    }
    Ok(db::load_archetype(pool).await?.resolve())
}

fn run_interactive_quiz() -> anyhow::Result<Archetype> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = QuizSession::new();

    while let Some(question) = session.current_question() {
        println!();
        println!("{} ({}/{})", question.part, question.id, QUESTIONS.len());
        println!("{}", question.text);
        for (index, answer) in question.answers.iter().enumerate() {
            println!("  {}. {}", index + 1, answer.text);
        }
        print!("Answer [1-3, b to go back]: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("quiz aborted before the last question");
        };
        match line?.trim() {
            "b" | "B" => session.back(),
            "1" => {
                session.choose(0)?;
            }
            "2" => {
                session.choose(1)?;
            }
            "3" => {
                session.choose(2)?;
            }
            other => println!("'{other}' is not an answer."),
        }
    }

    Ok(session.dominant())
}

fn print_profile(archetype: Archetype) {
    let profile = profiles::profile(archetype);
    let protocol = profiles::burnout_protocol(archetype);
    let breathing = profiles::breathing(archetype);
    let movement = profiles::desk_movement(archetype);

    println!("{archetype} ({})", profile.color);
    println!("{}", profile.profile);
    println!("Calendar strategy: {}", profile.calendar_strategy);
    println!("Intervention: {}", profile.intervention);
    println!("Notifications: {}", profile.notification_style);
    println!();
    println!("{}", protocol.title);
    println!("Goal: {}", protocol.goal);
    for activity in protocol.activities.iter() {
        println!("- {}: {}", activity.name, activity.description);
    }
    println!("Dietary nudge: {}", protocol.diet);
    println!();
    println!("{} ({})", breathing.title, breathing.audio);
    let mut phase = profiles::BreathingPhase::Inhale;
    let mut steps = vec![format!("{} {}s", phase.label(), breathing.inhale)];
    loop {
        let (next, seconds) = breathing.next_phase(phase);
        if next == profiles::BreathingPhase::Inhale {
            break;
        }
        steps.push(format!("{} {}s", next.label(), seconds));
        phase = next;
    }
    println!("{}", steps.join(" / "));
    println!();
    println!("Desk movement: {} ({})", movement.title, movement.benefit);
    println!("{}", movement.instruction);
}
