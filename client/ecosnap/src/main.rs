//! EcoSnap command-line client.
//!
//! Log eco actions with photo or video proof, browse them, and check the
//! dashboard and leaderboard against an EcoSnap backend.  Each subcommand
//! drives one page controller; notifications the page raises are printed
//! once it finishes.

use std::path::PathBuf;

use anyhow::bail;
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use ecosnap_core::leaderboard::{rank_color, LeaderboardScope};
use ecosnap_core::upload_zone::status_color;
use ecosnap_core::validator::format_file_size;
use ecosnap_core::{ActionCategory, MediaKind, TypeFilter, UploadStatus, ZoneEvent, ZoneOutcome};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ecosnap::config::Config;
use ecosnap::media;
use ecosnap::notify::{Notification, Severity};
use ecosnap::pages::actions::{ActionDetail, ActionsPage};
use ecosnap::pages::create_action::CreateActionPage;
use ecosnap::pages::dashboard::DashboardPage;
use ecosnap::pages::leaderboard::{LeaderboardPage, Source};
use ecosnap::pages::register::RegisterPage;
use ecosnap::{AppContext, ClientError};

#[derive(Debug, Parser)]
#[command(name = "ecosnap", version, about = "Log and track eco actions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Points, impact estimates, streak and weekly activity
    Dashboard,
    /// List your actions, newest first
    Actions {
        /// Only show actions whose title, description or location contains this
        #[arg(long)]
        search: Option<String>,
        /// Only fetch actions of this category
        #[arg(long = "type")]
        category: Option<ActionCategory>,
        /// Show the full record of one action
        #[arg(long)]
        show: Option<String>,
    },
    /// Create an action with an optional proof image
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: ActionCategory,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        location: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        date: String,
        #[arg(long)]
        file: Option<PathBuf>,
        /// Declared MIME type; guessed from the extension when omitted
        #[arg(long)]
        mime: Option<String>,
    },
    /// Quick upload: a photo or video with a title
    Upload {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        location: String,
        /// Treat the file as a video (100MB limit); implied by a video/* type
        #[arg(long)]
        video: bool,
        #[arg(long)]
        mime: Option<String>,
    },
    /// Ranked users by points
    Leaderboard {
        #[arg(long, value_enum, default_value_t = Scope::Global)]
        scope: Scope,
    },
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "")]
        country: String,
        #[arg(long, default_value = "")]
        city: String,
    },
    /// Log in and print a token for ECOSNAP_TOKEN
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scope {
    Global,
    Regional,
    Monthly,
    AllTime,
}

impl From<Scope> for LeaderboardScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Global => LeaderboardScope::Global,
            Scope::Regional => LeaderboardScope::Regional,
            Scope::Monthly => LeaderboardScope::Monthly,
            Scope::AllTime => LeaderboardScope::AllTime,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Logs go to stderr so command output stays clean (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    debug!(api = %config.api_url, "Configuration loaded");
    let ctx = AppContext::connect(config)?;

    let outcome = run(cli.command, &ctx).await;
    for notification in ctx.notifications.drain() {
        print_notification(&notification);
    }
    outcome
}

async fn run(command: Command, ctx: &AppContext) -> anyhow::Result<()> {
    let needs_login = !matches!(
        command,
        Command::Leaderboard { .. } | Command::Register { .. } | Command::Login { .. }
    );
    if needs_login && !ctx.session.is_authenticated().await {
        eprintln!("Run `ecosnap login` and export ECOSNAP_TOKEN first.");
        return Err(ClientError::NotAuthenticated.into());
    }

    match command {
        Command::Dashboard => dashboard(ctx).await,
        Command::Actions {
            search,
            category,
            show,
        } => actions(ctx, search, category, show).await,
        Command::Create {
            title,
            category,
            description,
            location,
            date,
            file,
            mime,
        } => {
            let mut page = CreateActionPage::new();
            page.set_field("title", &title)?;
            page.set_field("category", category.as_str())?;
            page.set_field("description", &description)?;
            page.set_field("location", &location)?;
            page.set_field("date", &date)?;
            if let Some(path) = file {
                let candidate = media::candidate(&path, mime.as_deref()).await?;
                println!(
                    "Proof: {} ({})",
                    candidate.file_name,
                    format_file_size(candidate.size_bytes)
                );
                if let ZoneOutcome::Rejected(rejection) =
                    page.handle_zone(ZoneEvent::Pick(vec![candidate]), ctx)
                {
                    bail!("{rejection} ({})", page.zone().size_hint());
                }
            }

            let bar = show_progress(page.watch_status());
            let result = page.submit(ctx).await;
            bar.abort();
            let action = result?;
            println!(
                "Created {} \"{}\" ({} points, {})",
                action.id,
                action.title,
                action.points,
                action.status.as_str()
            );
            Ok(())
        }
        Command::Upload {
            file,
            title,
            location,
            video,
            mime,
        } => {
            let mut page = DashboardPage::new();
            let candidate = media::candidate(&file, mime.as_deref()).await?;
            let bubble = page.bubble_mut();
            bubble.open();
            if video || MediaKind::from_mime(&candidate.mime_type) == MediaKind::Video {
                bubble.set_kind(MediaKind::Video);
            }
            if let ZoneOutcome::Rejected(rejection) =
                bubble.handle_zone(ZoneEvent::Pick(vec![candidate]), ctx)
            {
                bail!("{rejection} ({})", bubble.zone().size_hint());
            }
            bubble.set_title(title);
            bubble.set_location(location);

            let bar = show_progress(bubble.watch_status());
            let result = page.submit_quick_upload(ctx).await;
            bar.abort();
            let action = result?;
            println!("Created {} \"{}\"", action.id, action.title);
            Ok(())
        }
        Command::Leaderboard { scope } => {
            let mut page = LeaderboardPage::new();
            page.select_scope(scope.into(), ctx).await;
            println!("{} leaderboard", page.scope());
            if page.source() == Source::Fallback {
                println!("(backend unavailable, showing sample ranking)");
            }
            for entry in page.entries() {
                println!(
                    "{:>3}. {:<20} {:>6} pts {:>4} actions  {}  {} [{}]",
                    entry.rank,
                    entry.name,
                    entry.points,
                    entry.actions,
                    entry.location.as_deref().unwrap_or("-"),
                    entry.badge.as_deref().unwrap_or(""),
                    rank_color(entry.rank),
                );
            }
            Ok(())
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
            first_name,
            last_name,
            country,
            city,
        } => {
            let mut page = RegisterPage::new();
            for (name, value) in [
                ("username", username),
                ("email", email),
                ("password", password),
                ("confirmPassword", confirm_password),
                ("firstName", first_name),
                ("lastName", last_name),
                ("location.country", country),
                ("location.city", city),
            ] {
                page.set_field(name, &value)?;
            }
            match page.submit(ctx).await {
                Ok(user) => {
                    println!("Welcome, {}!", user.username.as_deref().unwrap_or("eco hero"));
                    print_token(ctx).await;
                    Ok(())
                }
                Err(err) => {
                    for (field, message) in page.errors() {
                        eprintln!("  {field}: {message}");
                    }
                    Err(err.into())
                }
            }
        }
        Command::Login { email, password } => {
            let user = ctx.session.login(ctx.api.as_ref(), &email, &password).await?;
            println!("Logged in as {}", user.username.as_deref().unwrap_or(&email));
            print_token(ctx).await;
            Ok(())
        }
    }
}

async fn dashboard(ctx: &AppContext) -> anyhow::Result<()> {
    let mut page = DashboardPage::new();
    page.load(ctx).await?;
    let snapshot = page.snapshot_now(ctx).await;

    if let Some(name) = &page.profile().first_name {
        println!("Welcome back, {name}!");
    }
    println!(
        "{} points  |  {}  |  {} {}",
        snapshot.total_points, snapshot.level, snapshot.badge.icon, snapshot.badge.name
    );
    println!("Actions this month: {}", snapshot.actions_this_month);
    println!("Streak: {} day(s)", snapshot.streak);
    println!(
        "Impact: {} kg CO2, {} L water, {} kWh energy",
        snapshot.impact.co2_saved, snapshot.impact.water_saved, snapshot.impact.energy_saved
    );
    println!("This week:");
    for day in &snapshot.weekly {
        println!("  {} {} {}", day.day, day.date, "#".repeat(day.actions));
    }
    if !page.recent().is_empty() {
        println!("Recent:");
        for action in page.recent() {
            println!("  {} ({} pts, {})", action.title, action.points, action.status.as_str());
        }
    }
    Ok(())
}

async fn actions(
    ctx: &AppContext,
    search: Option<String>,
    category: Option<ActionCategory>,
    show: Option<String>,
) -> anyhow::Result<()> {
    let mut page = ActionsPage::new();
    match category {
        Some(category) => page.set_type_filter(TypeFilter::Category(category), ctx).await?,
        None => page.load(ctx).await?,
    }

    if let Some(id) = show {
        let Some(detail) = page.open_detail(&id, ctx) else {
            bail!("No action with id {id}");
        };
        print_detail(&detail);
        return Ok(());
    }

    if let Some(term) = search {
        page.set_search(term);
    }
    let visible = page.visible();
    if visible.is_empty() {
        println!("No actions found");
    }
    for action in visible {
        println!(
            "{}  {}  {:<30} {:<20} {:>4} pts  {}",
            action.id,
            action.created_at.with_timezone(&Local).format("%Y-%m-%d"),
            action.title,
            action.category,
            action.points,
            action.status.as_str(),
        );
    }
    Ok(())
}

fn print_detail(detail: &ActionDetail) {
    println!("{}  {}", detail.id, detail.title);
    println!("  Category: {}", detail.category);
    println!("  Status:   {}", detail.status.as_str());
    println!("  Points:   {}", detail.points);
    if let Some(location) = &detail.location {
        println!("  Location: {location}");
    }
    println!(
        "  Created:  {}",
        detail.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    if !detail.description.is_empty() {
        println!("  {}", detail.description);
    }
    if let Some(url) = &detail.proof_url {
        println!("  Proof:    {url}");
    }
}

async fn print_token(ctx: &AppContext) {
    if let Some(token) = ctx.session.token().await {
        println!("export ECOSNAP_TOKEN={token}");
    }
}

fn print_notification(notification: &Notification) {
    let tag = match notification.severity {
        Severity::Success => "ok",
        Severity::Info => "info",
        Severity::Warning => "warn",
        Severity::Error => "error",
    };
    println!("[{tag}] {}", notification.message);
}

/// Render upload progress on stderr until aborted.
fn show_progress(mut status: watch::Receiver<UploadStatus>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let current = status.borrow_and_update().clone();
            if let UploadStatus::Uploading { progress } = current {
                debug!(color = status_color(&current), "progress {progress}%");
                eprint!("\rUploading... {progress:>3}%");
            } else {
                eprintln!();
                break;
            }
        }
    })
}
