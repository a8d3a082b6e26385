use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lift log`.
pub async fn handle(args: &LogArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let entry = ctx
        .logger()
        .log_workout(&args.exercise, args.sets, args.reps, args.weight)
        .await?;
    output(&entry, flags.format)
}
