//! `kit run` -- dispatch one slash-command line and exit.
//!
//! With `--only <kit>`, the line is dispatched with exactly that kit's
//! commands installed, whether or not it is enabled. Enablement is not
//! changed.
//!
//! ```text
//! kit run /upper hello
//! kit run --only memkit mem-list
//! ```

use clap::Args;

use kitbox_types::{CommandOutcome, InvocationContext};

use super::{as_slash_line, open_registry, print_outcome};

/// Arguments for the `kit run` subcommand.
#[derive(Args)]
pub struct RunArgs {
    /// Dispatch against this kit alone instead of the enabled kits.
    #[arg(long)]
    pub only: Option<String>,

    /// Kits file path (overrides auto-discovery).
    #[arg(long)]
    pub kits_file: Option<String>,

    /// Command line, e.g. `/upper hello` (leading `/` optional).
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub line: Vec<String>,
}

/// Run the command.
pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let registry = open_registry(args.kits_file.as_deref()).await?;
    let line = as_slash_line(&args.line.join(" "));
    let mut ctx = InvocationContext::new();

    let outcome = match args.only.as_deref() {
        Some(kit_id) => {
            let registry = &registry;
            let line = line.as_str();
            let ctx = &mut ctx;
            registry
                .with_registered_kit(kit_id, || async move { registry.dispatch(line, ctx).await })
                .await?
        }
        None => registry.dispatch(&line, &mut ctx).await,
    };

    match outcome {
        Some(CommandOutcome::Error(reason)) => anyhow::bail!("{reason}"),
        Some(outcome) => {
            print_outcome(&outcome);
            Ok(())
        }
        None => anyhow::bail!("unknown command: {line}"),
    }
}
