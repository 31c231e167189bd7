//! `textkit` -- text transformations.

use kitbox_types::{CommandDefinition, CommandOutcome, Kit, Result, create_kit};

/// Build the kit.
pub fn kit() -> Result<Kit> {
    create_kit(
        "textkit",
        "Text Kit",
        "0.3.0",
        "Small text transformations",
        vec![
            CommandDefinition::from_fn("upper", "Uppercase the arguments", |ctx| {
                CommandOutcome::reply(ctx.args.to_uppercase())
            }),
            CommandDefinition::from_fn("lower", "Lowercase the arguments", |ctx| {
                CommandOutcome::reply(ctx.args.to_lowercase())
            }),
            CommandDefinition::from_fn("count", "Count words and characters", |ctx| {
                let words = ctx.args.split_whitespace().count();
                let chars = ctx.args.chars().count();
                CommandOutcome::reply(format!("{words} word(s), {chars} character(s)"))
            }),
            CommandDefinition::from_fn("echo", "Echo arguments back", |ctx| {
                CommandOutcome::reply(ctx.args.clone())
            }),
        ],
    )
}
