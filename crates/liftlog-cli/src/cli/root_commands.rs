use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Record a workout (stored locally, synced later).
    Log(LogArgs),
    /// List logged workouts, newest first.
    History(HistoryArgs),
    /// Show sync state counts.
    Status,
    /// Upload pending entries once.
    Sync,
    /// Re-enqueue entries whose upload failed.
    Retry,
    /// Keep syncing in the background until interrupted.
    Watch(WatchArgs),
    /// Show the sync status history of one entry.
    Events(EventsArgs),
}

#[derive(Clone, Debug, Args)]
pub struct LogArgs {
    /// Exercise name, e.g. "Squat".
    pub exercise: String,
    /// Number of sets.
    #[arg(long)]
    pub sets: u32,
    /// Repetitions per set.
    #[arg(long)]
    pub reps: u32,
    /// Load per repetition (0 for bodyweight).
    #[arg(long, default_value_t = 0.0)]
    pub weight: f64,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Oldest first instead of newest first.
    #[arg(long)]
    pub ascending: bool,
    /// Max entries (overrides --limit and general.history_limit).
    #[arg(short = 'n', long)]
    pub count: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct WatchArgs {
    /// Seconds between successful passes (overrides sync.interval_secs).
    #[arg(long)]
    pub interval: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct EventsArgs {
    /// Entry id (wkl-...).
    pub id: String,
}
