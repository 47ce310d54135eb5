use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::progress_commands::*;
use crate::application::commands::CommandHandler;
use crate::application::dtos::{
    BadgeDto, CelebrationDto, LeaderboardRowDto, ProgressOverviewDto, StreakDto,
};
use crate::application::services::{ConfigService, LogLevel};
use crate::presentation::bootstrap::build_app_state;
use crate::presentation::cli::{Cli, Command};
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;

const APP_DIR: &str = "eduverse";
const DB_FILE: &str = "eduverse.db";

/// Entry point of the `eduverse` binary
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_dir = resolve_dir(cli.config_dir.clone(), dirs::config_dir())?;
    let data_dir = resolve_dir(cli.data_dir.clone(), dirs::data_local_dir())?;

    let config = Arc::new(ConfigService::load(&config_dir).context("Failed to load config")?);
    let settings = config.snapshot();

    let log_dir = data_dir.join("logs");
    if let Err(e) = eduverse_infrastructure::logging::init_logger(
        log_dir.clone(),
        settings.log_level.as_str(),
    ) {
        eprintln!("⚠️  Failed to initialize file logging: {}", e);
    } else {
        tracing::info!("🚀 EduVerse starting, logs at {}", log_dir.display());
    }

    let db_path = settings
        .database_path
        .clone()
        .unwrap_or_else(|| data_dir.join(DB_FILE));
    let state = build_app_state(config, &db_path)
        .await
        .map_err(CommandError::from)?;

    let json = cli.json;
    let outcome = execute(&state, cli.command, json).await;

    // Celebrations queued by this command, even if a later step failed
    print_celebrations(&state.services.celebrations.drain().await, json);
    state.runtime.db.close().await;

    if let Err(err) = outcome {
        tracing::error!("Command failed: {}", err);
        if json {
            eprintln!("{}", serde_json::to_string_pretty(&err)?);
        }
        return Err(anyhow!(err));
    }

    Ok(())
}

fn resolve_dir(explicit: Option<PathBuf>, platform: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => platform
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| anyhow!("Could not determine a platform directory; pass it explicitly")),
    }
}

fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

pub async fn execute(state: &AppState, command: Command, json: bool) -> Result<(), CommandError> {
    match command {
        Command::Register {
            display_name,
            id,
            avatar,
        } => {
            let result = state
                .command_handlers
                .register_learner
                .handle(RegisterLearnerCommand {
                    user_id: id,
                    display_name,
                    avatar,
                })
                .await?;
            emit(json, &result, |r| {
                let verb = if r.created { "Registered" } else { "Updated" };
                format!("{} learner {}", verb, r.user_id)
            })
        }

        Command::Activity {
            user_id,
            kind,
            date,
        } => {
            let result = state
                .command_handlers
                .record_activity
                .handle(RecordActivityCommand {
                    user_id,
                    kind,
                    occurred_on: today_or(date),
                })
                .await?;
            emit(json, &result, |r| {
                let mut out = format!("Streak {}: {}", r.transition, streak_line(&r.streak));
                append_badges(&mut out, &r.unlocked_badges);
                out
            })
        }

        Command::CompleteGame {
            user_id,
            game_id,
            subject,
            score,
            max_score,
            date,
            result_id,
        } => {
            let result = state
                .command_handlers
                .complete_game
                .handle(CompleteGameCommand {
                    user_id,
                    game_id,
                    subject,
                    score,
                    max_score,
                    played_on: today_or(date),
                    result_id,
                })
                .await?;
            emit(json, &result, |r| {
                let verb = if r.newly_recorded { "saved" } else { "already saved" };
                let mut out = format!(
                    "Game {} {} ({:.0}%). {}",
                    r.game_result_id,
                    verb,
                    r.score_percent,
                    streak_line(&r.streak)
                );
                append_badges(&mut out, &r.unlocked_badges);
                out
            })
        }

        Command::Streak {
            user_id,
            kind,
            date,
        } => {
            let today = today_or(date);
            let streaks: Vec<StreakDto> = match kind {
                Some(kind) => state
                    .queries
                    .streak
                    .get_streak(&user_id, Some(&kind), today)
                    .await?
                    .into_iter()
                    .collect(),
                None => state.queries.streak.list_streaks(&user_id, today).await?,
            };
            emit(json, &streaks, |streaks| {
                if streaks.is_empty() {
                    return "No activity recorded yet".to_string();
                }
                streaks
                    .iter()
                    .map(streak_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        Command::Leaderboard { limit, date } => {
            let limit = limit.unwrap_or(state.services.config.snapshot().leaderboard_limit);
            let rows = state
                .queries
                .leaderboard
                .top(limit, today_or(date))
                .await?;
            emit(json, &rows, |rows: &Vec<LeaderboardRowDto>| {
                rows.iter()
                    .map(|r| {
                        format!(
                            "{:>3}. {} {:<20} {:>6}  {}",
                            r.rank, r.avatar, r.display_name, r.rank_score, r.title
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        Command::Overview {
            user_id,
            date,
            recent,
        } => {
            let recent =
                recent.unwrap_or(state.services.config.snapshot().recent_games_limit);
            let overview = state
                .queries
                .progress
                .overview(&user_id, today_or(date), recent)
                .await?;
            emit(json, &overview, overview_text)
        }

        Command::LogLevel { level: None } => {
            let level = state.services.config.get_log_level();
            emit(json, &level, |l| l.as_str().to_string())
        }

        Command::LogLevel { level: Some(level) } => {
            let level = LogLevel::parse(&level).ok_or_else(|| {
                CommandError::validation(
                    "Invalid log level. Must be one of: error, warn, info, debug, trace",
                )
            })?;
            state
                .services
                .config
                .set_log_level(level)
                .map_err(|e| {
                    CommandError::infrastructure(format!("Failed to save log level: {}", e))
                })?;
            emit(json, &level, |l| format!("Log level set to {}", l.as_str()))
        }
    }
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    human: impl FnOnce(&T) -> String,
) -> Result<(), CommandError> {
    if json {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| CommandError::infrastructure(format!("Serialize output: {}", e)))?;
        println!("{}", text);
    } else {
        println!("{}", human(value));
    }
    Ok(())
}

fn print_celebrations(celebrations: &[CelebrationDto], json: bool) {
    // JSON callers get the unlocks inside the command result
    if json {
        return;
    }
    for celebration in celebrations {
        println!("{}", celebration.message);
    }
}

fn streak_line(streak: &StreakDto) -> String {
    format!(
        "{}: {} day(s), best {}, last active {}{}",
        streak.kind,
        streak.active_streak,
        streak.longest_streak,
        streak.last_active,
        if streak.active_today { " ✔" } else { "" }
    )
}

fn append_badges(out: &mut String, badges: &[BadgeDto]) {
    if badges.is_empty() {
        return;
    }
    let names: Vec<_> = badges.iter().map(|b| b.name.as_str()).collect();
    out.push_str(&format!("\nNew badges: {}", names.join(", ")));
}

fn overview_text(o: &ProgressOverviewDto) -> String {
    let mut lines = vec![
        format!("{} {} ({})", o.avatar, o.display_name, o.user_id),
        format!(
            "Learned today: {}",
            if o.learned_today { "yes" } else { "not yet" }
        ),
        format!("Games played: {}, total score: {}", o.games_played, o.total_score),
    ];
    if let Some(avg) = o.average_score_percent {
        lines.push(format!("Average recent score: {:.0}%", avg));
    }
    lines.extend(o.streaks.iter().map(streak_line));
    lines.push(format!(
        "Badges: {} unlocked, {} to go",
        o.unlocked_badges.len(),
        o.locked_badges.len()
    ));
    for badge in &o.unlocked_badges {
        lines.push(format!("  {} {}", badge.icon, badge.name));
    }
    for game in &o.recent_games {
        lines.push(format!(
            "  {} {} [{}] {}/{}",
            game.played_on, game.game_id, game.subject, game.score, game.max_score
        ));
    }
    lines.join("\n")
}
