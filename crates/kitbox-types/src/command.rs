//! Command definitions and the handler protocol.
//!
//! A [`CommandDefinition`] is the unit the slash-command registry routes to:
//! a name, a one-line description and a shared [`CommandHandler`]. The
//! registry never interprets what a handler returns; it only routes. The
//! hosting loop pattern-matches on [`CommandOutcome`].
//!
//! Handler identity matters: the registry removes a command only if the
//! installed handler is the *same* `Arc` as the one being removed, so
//! cloning a definition keeps its identity.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

/// Result of running a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep the session going, optionally displaying some text.
    Continue(Option<String>),
    /// End the interactive session.
    Exit,
    /// The command failed; the reason is shown to the user.
    Error(String),
}

impl CommandOutcome {
    /// `Continue` with a message to display.
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Continue(Some(text.into()))
    }

    /// `Continue` with nothing to display.
    pub fn done() -> Self {
        Self::Continue(None)
    }

    /// `Error` with the given reason.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error(reason.into())
    }
}

/// Mutable context handed to a handler for one invocation.
///
/// `vars` is session-scoped scratch state owned by the host loop; handlers
/// may read and write it freely (e.g. a notes kit keeps its notes there).
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    /// Name the command was dispatched under (without the `/`).
    pub command: String,

    /// Raw argument string following the command name, trimmed.
    pub args: String,

    /// Id of the kit that owns the command, when known.
    pub kit_id: Option<String>,

    /// Session variables shared across invocations.
    pub vars: HashMap<String, String>,
}

impl InvocationContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the context for the next invocation, keeping `vars`.
    pub fn begin(&mut self, command: &str, args: &str, kit_id: Option<&str>) {
        self.command = command.to_string();
        self.args = args.to_string();
        self.kit_id = kit_id.map(String::from);
    }
}

/// Behavior behind a slash command.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run the command.
    async fn invoke(&self, ctx: &mut InvocationContext) -> CommandOutcome;
}

/// Adapter turning a synchronous closure into a [`CommandHandler`].
struct FnHandler<F>(F);

#[async_trait]
impl<F> CommandHandler for FnHandler<F>
where
    F: Fn(&mut InvocationContext) -> CommandOutcome + Send + Sync,
{
    async fn invoke(&self, ctx: &mut InvocationContext) -> CommandOutcome {
        (self.0)(ctx)
    }
}

/// A named, dispatchable command.
#[derive(Clone)]
pub struct CommandDefinition {
    name: String,
    description: String,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDefinition {
    /// Create a definition from an existing handler.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler,
        }
    }

    /// Create a definition whose handler is a synchronous closure.
    pub fn from_fn<F>(name: impl Into<String>, description: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut InvocationContext) -> CommandOutcome + Send + Sync + 'static,
    {
        Self::new(name, description, Arc::new(FnHandler(f)))
    }

    /// Command name without the leading `/`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description for help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether `other` routes to the very same handler instance.
    pub fn same_handler(&self, other: &CommandDefinition) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }

    /// Run the handler.
    pub async fn invoke(&self, ctx: &mut InvocationContext) -> CommandOutcome {
        self.handler.invoke(ctx).await
    }
}

impl fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo() -> CommandDefinition {
        CommandDefinition::from_fn("echo", "Echo arguments back", |ctx| {
            CommandOutcome::reply(format!("echo: {}", ctx.args))
        })
    }

    #[tokio::test]
    async fn from_fn_handler_runs() {
        let cmd = echo();
        let mut ctx = InvocationContext::new();
        ctx.begin("echo", "hello", None);

        let outcome = cmd.invoke(&mut ctx).await;
        assert_eq!(outcome, CommandOutcome::reply("echo: hello"));
    }

    #[tokio::test]
    async fn handler_can_mutate_vars() {
        let cmd = CommandDefinition::from_fn("set", "Set a var", |ctx| {
            let args = ctx.args.clone();
            ctx.vars.insert("last".into(), args);
            CommandOutcome::done()
        });
        let mut ctx = InvocationContext::new();
        ctx.begin("set", "value-1", Some("kit"));

        assert_eq!(cmd.invoke(&mut ctx).await, CommandOutcome::Continue(None));
        assert_eq!(ctx.vars.get("last").map(String::as_str), Some("value-1"));
        assert_eq!(ctx.kit_id.as_deref(), Some("kit"));
    }

    #[test]
    fn clone_preserves_handler_identity() {
        let a = echo();
        let b = a.clone();
        assert!(a.same_handler(&b));
    }

    #[test]
    fn separate_definitions_are_distinct() {
        let a = echo();
        let b = echo();
        assert_eq!(a.name(), b.name());
        assert!(!a.same_handler(&b));
    }

    #[test]
    fn begin_keeps_vars() {
        let mut ctx = InvocationContext::new();
        ctx.vars.insert("k".into(), "v".into());
        ctx.begin("cmd", "a b", None);
        assert_eq!(ctx.command, "cmd");
        assert_eq!(ctx.args, "a b");
        assert!(ctx.kit_id.is_none());
        assert_eq!(ctx.vars.len(), 1);
    }

    #[test]
    fn outcome_constructors() {
        assert_eq!(CommandOutcome::done(), CommandOutcome::Continue(None));
        assert_eq!(
            CommandOutcome::error("boom"),
            CommandOutcome::Error("boom".into())
        );
    }

    #[test]
    fn debug_omits_handler() {
        let dbg = format!("{:?}", echo());
        assert!(dbg.contains("echo"));
        assert!(dbg.contains(".."));
    }
}
