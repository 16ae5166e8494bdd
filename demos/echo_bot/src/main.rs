//! Echo Bot Example
//!
//! A line-oriented demonstration of the Switchyard router. Each line on stdin
//! is one JSON-encoded message; replies are printed to stdout.
//!
//! ```text
//! {"chat_id": 1, "user_id": 7, "username": "ada", "text": "/echo hello"}
//! ```
//!
//! # Routing
//!
//! Endpoints are tried in registration order and the first match wins:
//! - reply rules from `switchyard.toml` (`/ping`, `/help`)
//! - `/start` and `/info` literals
//! - an `/echo <text>` predicate
//! - an admin group whose middleware turns away everyone not listed with
//!   `--admin`
//!
//! # Usage
//!
//! ```bash
//! cargo run --package echo-bot -- --config demos/echo_bot/switchyard.toml --admin 7 < messages.jsonl
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use switchyard::prelude::*;
use switchyard::runtime::config::ConfigLoader;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "echo-bot")]
struct Args {
    /// Config file path; searches the current directory when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Configuration profile (falls back to SWITCHYARD_PROFILE).
    #[arg(long)]
    profile: Option<String>,
    /// User ids allowed past the admin group.
    #[arg(long = "admin")]
    admins: Vec<i64>,
}

// ============================================================================
// Transport
// ============================================================================

/// One decoded inbound message.
#[derive(Debug, Clone, Deserialize)]
struct Message {
    chat_id: i64,
    user_id: i64,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl Update for Message {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn kind(&self) -> &'static str {
        "message"
    }
}

/// Writes replies to stdout, one line per chat message.
struct ConsoleBot {
    out: Mutex<io::Stdout>,
}

impl ConsoleBot {
    fn new() -> Self {
        Self {
            out: Mutex::new(io::stdout()),
        }
    }

    fn send(&self, chat_id: i64, text: &str) -> Result<(), BoxError> {
        let mut out = self.out.lock().map_err(|_| "stdout lock poisoned")?;
        for line in text.lines() {
            writeln!(out, "[chat {chat_id}] {line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

type Ctx = Context<Message, Arc<ConsoleBot>>;

fn reply(ctx: &mut Ctx, text: &str) -> Result<(), BoxError> {
    ctx.bot().send(ctx.update().chat_id, text)
}

/// Marker field set on contexts whose sender is an admin.
struct IsAdmin;

// ============================================================================
// Handlers
// ============================================================================

fn start_handler(ctx: &mut Ctx) -> Result<(), BoxError> {
    let name = ctx.update().username.clone().unwrap_or_else(|| "there".to_string());
    reply(ctx, &format!("Hello, {name}! Send /help to see what I can do."))
}

fn info_handler(ctx: &mut Ctx) -> Result<(), BoxError> {
    let msg = ctx.update();
    let text = format!(
        "Message Info\n\
         - Chat: {}\n\
         - From: {} ({})\n\
         - Admin: {}",
        msg.chat_id,
        msg.username.as_deref().unwrap_or("Unknown"),
        msg.user_id,
        ctx.fields().contains::<IsAdmin>(),
    );
    reply(ctx, &text)
}

fn echo_handler(ctx: &mut Ctx) -> Result<(), BoxError> {
    let content = ctx
        .update()
        .text
        .as_deref()
        .and_then(|t| t.strip_prefix("/echo "))
        .unwrap_or_default()
        .to_string();
    reply(ctx, &content)
}

fn ban_handler(ctx: &mut Ctx) -> Result<(), BoxError> {
    let target = ctx
        .update()
        .text
        .as_deref()
        .and_then(|t| t.strip_prefix("/ban "))
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if target.is_empty() {
        return Err("usage: /ban <user>".into());
    }
    reply(ctx, &format!("{target} has been banned."))
}

fn has_prefix(prefix: &'static str) -> Condition<Ctx> {
    Condition::predicate(move |ctx: &Ctx| ctx.text().is_some_and(|t| t.starts_with(prefix)))
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new().with_current_dir();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    if let Some(profile) = &args.profile {
        loader = loader.profile(profile);
    }
    let config = loader.load()?;

    let runtime: Runtime<Ctx> = Runtime::from_config(&config)?;
    let router = runtime.router();

    // Root middleware must be in place before any endpoint is registered.
    router.middleware(Middleware::from_fn(|ctx: &mut Ctx, next| {
        let msg = ctx.update();
        info!(
            chat = msg.chat_id,
            user = msg.user_id,
            text = msg.text.as_deref().unwrap_or(""),
            "Incoming message"
        );
        next.call(ctx)
    }));

    let count = runtime.load_replies(reply)?;
    info!(count, "Loaded reply rules");

    router
        .handler("/start", start_handler)
        .handler("/info", info_handler)
        .handler(has_prefix("/echo "), echo_handler);

    let mut admin = router.group();
    admin.middleware(Middleware::from_fn(|ctx: &mut Ctx, next| {
        if ctx.fields().contains::<IsAdmin>() {
            next.call(ctx)
        } else {
            reply(ctx, "Sorry, that command is for admins only.")
        }
    }));
    admin.handler(has_prefix("/ban"), ban_handler);

    let bot = Arc::new(ConsoleBot::new());
    let admins = args.admins;
    let contexts = io::stdin().lock().lines().filter_map(|line| {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read stdin");
                return None;
            }
        };
        if line.trim().is_empty() {
            return None;
        }
        match serde_json::from_str::<Message>(&line) {
            Ok(msg) => {
                let mut fields = Fields::new();
                if admins.contains(&msg.user_id) {
                    fields.insert(IsAdmin);
                }
                Some(Context::new(msg, Arc::clone(&bot)).with_fields(fields))
            }
            Err(e) => {
                warn!(error = %e, "Skipping malformed message");
                None
            }
        }
    });

    let summary = runtime.run(contexts);
    info!(?summary, "Echo bot finished");
    Ok(())
}
