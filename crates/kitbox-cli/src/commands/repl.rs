//! `kit repl` -- interactive slash-command session.
//!
//! Session built-ins are handled by the loop itself; every other `/name`
//! line goes through the live registry, so only enabled kits answer.
//!
//! ```text
//! kit repl
//! > /enable memkit
//! > /mem-add-text buy milk
//! > /mem-list
//! > /quit
//! ```

use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use kitbox_core::KitRegistry;
use kitbox_types::InvocationContext;

use super::{open_registry, print_outcome};

/// Arguments for the `kit repl` subcommand.
#[derive(Args)]
pub struct ReplArgs {
    /// Kits file path (overrides auto-discovery).
    #[arg(long)]
    pub kits_file: Option<String>,
}

/// Commands the loop answers without consulting the registry.
#[derive(Debug, PartialEq, Eq)]
enum Builtin {
    Help,
    Kits,
    Enable(String),
    Disable(String),
    Quit,
}

fn parse_builtin(input: &str) -> Option<Builtin> {
    let without_slash = input.strip_prefix('/')?;
    let (name, args) = match without_slash.split_once(char::is_whitespace) {
        Some((n, a)) => (n, a.trim()),
        None => (without_slash, ""),
    };
    match name {
        "help" => Some(Builtin::Help),
        "kits" => Some(Builtin::Kits),
        "enable" => Some(Builtin::Enable(args.to_string())),
        "disable" => Some(Builtin::Disable(args.to_string())),
        "quit" | "exit" => Some(Builtin::Quit),
        _ => None,
    }
}

/// Run the REPL on stdin.
pub async fn run(args: ReplArgs) -> anyhow::Result<()> {
    let registry = open_registry(args.kits_file.as_deref()).await?;
    println!("kit repl -- type /help for commands, /quit to exit");
    println!();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run_session(&registry, stdin).await?;

    println!("Goodbye.");
    Ok(())
}

/// Process lines from `reader` until EOF or a quit.
///
/// Returns the session context so callers can inspect session variables.
pub async fn run_session<R>(registry: &KitRegistry, reader: R) -> anyhow::Result<InvocationContext>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut ctx = InvocationContext::new();

    loop {
        eprint!("> ");
        // Flush stderr so the prompt appears before blocking on read.
        use std::io::Write;
        std::io::stderr().flush().ok();

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(builtin) = parse_builtin(input) {
            if !handle_builtin(registry, builtin).await {
                break;
            }
            continue;
        }

        match registry.dispatch(input, &mut ctx).await {
            Some(outcome) => {
                if print_outcome(&outcome) {
                    break;
                }
            }
            None if input.starts_with('/') => {
                println!("Unknown command: {input} (type /help)");
            }
            None => println!("Commands start with '/'. Type /help."),
        }
    }

    Ok(ctx)
}

/// Returns `false` when the session should end.
async fn handle_builtin(registry: &KitRegistry, builtin: Builtin) -> bool {
    match builtin {
        Builtin::Help => print_help(registry),
        Builtin::Kits => {
            for status in registry.list_status() {
                let marker = if status.enabled { " (enabled)" } else { "" };
                println!("  - {} {}{marker}", status.kit.id(), status.kit.version());
            }
        }
        Builtin::Enable(id) | Builtin::Disable(id) if id.is_empty() => {
            println!("Usage: /enable <kit-id> | /disable <kit-id>");
        }
        Builtin::Enable(id) => match registry.enable(&id).await {
            Ok(()) => println!("Enabled kit '{id}'."),
            Err(e) if e.is_persistence() => {
                println!("Enabled kit '{id}' for this session only: {e}");
            }
            Err(e) => println!("error: {e}"),
        },
        Builtin::Disable(id) => match registry.disable(&id).await {
            Ok(()) => println!("Disabled kit '{id}'."),
            Err(e) if e.is_persistence() => {
                println!("Disabled kit '{id}' for this session only: {e}");
            }
            Err(e) => println!("error: {e}"),
        },
        Builtin::Quit => return false,
    }
    true
}

fn print_help(registry: &KitRegistry) {
    println!("Commands:");
    println!("  /help                -- Show this help");
    println!("  /kits                -- List kits and their status");
    println!("  /enable <kit-id>     -- Enable a kit");
    println!("  /disable <kit-id>    -- Disable a kit");
    println!("  /quit                -- Exit the session");

    let live = registry.commands().read();
    if live.is_empty() {
        println!("\nNo kit commands installed. Try /kits and /enable <kit-id>.");
        return;
    }
    println!("\nKit commands:");
    for name in live.names() {
        let description = live.get(name).map(|c| c.description()).unwrap_or_default();
        println!("  /{name:<19} -- {description}");
    }
}
