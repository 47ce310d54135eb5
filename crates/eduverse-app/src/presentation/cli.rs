use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Streaks, badges and leaderboard for EduVerse learners
#[derive(Debug, Parser)]
#[command(name = "eduverse", version, about)]
pub struct Cli {
    /// Directory holding app_config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Directory for the database and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a learner profile, or rename an existing one
    Register {
        display_name: String,
        /// Reuse a known id instead of generating one
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },

    /// Record a daily activity for a learner
    Activity {
        user_id: String,
        /// Streak kind, `learning` when omitted
        #[arg(long)]
        kind: Option<String>,
        /// Activity date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Store a finished mini-game and award badges
    CompleteGame {
        user_id: String,
        game_id: String,
        #[arg(long, default_value = "general")]
        subject: String,
        #[arg(long)]
        score: u32,
        #[arg(long)]
        max_score: u32,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Reuse an id when resubmitting a result that may already be stored
        #[arg(long)]
        result_id: Option<String>,
    },

    /// Show a learner's streaks
    Streak {
        user_id: String,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Ranked top learners
    Leaderboard {
        /// Defaults to `leaderboard_limit` from the config file
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Parent overview of one learner
    Overview {
        user_id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Number of recent games to include
        #[arg(long)]
        recent: Option<u32>,
    },

    /// Show or persist the log level
    LogLevel { level: Option<String> },
}
