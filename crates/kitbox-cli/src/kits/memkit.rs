//! `memkit` -- session notes.
//!
//! Notes live in the invocation context's session variables, one per line
//! under [`NOTES_VAR`], so they last as long as the REPL session.

use kitbox_types::{CommandDefinition, CommandOutcome, InvocationContext, Kit, Result, create_kit};

/// Session variable holding the notes.
pub const NOTES_VAR: &str = "memkit.notes";

/// Build the kit.
pub fn kit() -> Result<Kit> {
    create_kit(
        "memkit",
        "Memory Kit",
        "1.0.0",
        "Remember short notes for the current session",
        vec![
            CommandDefinition::from_fn("mem-add-text", "Remember a line of text", add_text),
            CommandDefinition::from_fn("mem-list", "List remembered notes", list),
            CommandDefinition::from_fn("mem-clear", "Forget all notes", clear),
        ],
    )
}

fn notes(ctx: &InvocationContext) -> Vec<&str> {
    ctx.vars
        .get(NOTES_VAR)
        .map(|v| v.lines().collect())
        .unwrap_or_default()
}

fn add_text(ctx: &mut InvocationContext) -> CommandOutcome {
    let text = ctx.args.trim().to_string();
    if text.is_empty() {
        return CommandOutcome::error("usage: /mem-add-text <text>");
    }
    let entry = ctx.vars.entry(NOTES_VAR.to_string()).or_default();
    if !entry.is_empty() {
        entry.push('\n');
    }
    entry.push_str(&text);
    let count = entry.lines().count();
    CommandOutcome::reply(format!("Remembered note #{count}."))
}

fn list(ctx: &mut InvocationContext) -> CommandOutcome {
    let notes = notes(ctx);
    if notes.is_empty() {
        return CommandOutcome::reply("No notes yet.");
    }
    let mut output = format!("Notes ({}):", notes.len());
    for (i, note) in notes.iter().enumerate() {
        output.push_str(&format!("\n  {}. {note}", i + 1));
    }
    CommandOutcome::reply(output)
}

fn clear(ctx: &mut InvocationContext) -> CommandOutcome {
    let removed = notes(ctx).len();
    ctx.vars.remove(NOTES_VAR);
    CommandOutcome::reply(format!("Forgot {removed} note(s)."))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(kit: &Kit, name: &str, args: &str, ctx: &mut InvocationContext) -> CommandOutcome {
        ctx.begin(name, args, Some("memkit"));
        kit.command(name).unwrap().invoke(ctx).await
    }

    #[tokio::test]
    async fn add_list_clear() {
        let kit = kit().unwrap();
        let mut ctx = InvocationContext::new();

        assert_eq!(
            run(&kit, "mem-add-text", "buy milk", &mut ctx).await,
            CommandOutcome::reply("Remembered note #1.")
        );
        run(&kit, "mem-add-text", "call bob", &mut ctx).await;

        assert_eq!(
            run(&kit, "mem-list", "", &mut ctx).await,
            CommandOutcome::reply("Notes (2):\n  1. buy milk\n  2. call bob")
        );
        assert_eq!(
            run(&kit, "mem-clear", "", &mut ctx).await,
            CommandOutcome::reply("Forgot 2 note(s).")
        );
        assert_eq!(
            run(&kit, "mem-list", "", &mut ctx).await,
            CommandOutcome::reply("No notes yet.")
        );
    }

    #[tokio::test]
    async fn add_requires_text() {
        let kit = kit().unwrap();
        let mut ctx = InvocationContext::new();
        assert!(matches!(
            run(&kit, "mem-add-text", "  ", &mut ctx).await,
            CommandOutcome::Error(_)
        ));
    }
}
