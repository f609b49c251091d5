use crate::output::print_json;
use pitch_core::clock::TickOutcome;
use pitch_core::config::Config;
use pitch_core::hooks::{Recorded, RecordingHooks};
use pitch_core::session::SessionSettings;
use pitch_core::{Mode, SessionEvent, TimerSession};
use serde::Serialize;
use std::sync::Arc;

/// One side effect, stamped with the clock display at which it happened.
#[derive(Serialize)]
struct LogEntry {
    at: String,
    kind: &'static str,
    detail: serde_json::Value,
}

/// Run a full countdown without sleeping and print every side effect except
/// per-second clock updates.
pub fn run(config: &Config, automatic: bool, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let catalog = config.catalog()?;
    let hooks = Arc::new(RecordingHooks::new());
    let mut session = TimerSession::new(SessionSettings::from(config), catalog, hooks.clone());
    if let Some(seed) = seed {
        session = session.with_seed(seed);
    }

    let mut log = Vec::new();
    if automatic {
        session.set_mode(Mode::Automatic);
    }
    let assignment: Vec<serde_json::Value> = session
        .checkpoints()
        .iter()
        .map(|&c| {
            serde_json::json!({
                "checkpoint": c,
                "segment": session.assignment().get(c).map(|s| s.name.clone()),
            })
        })
        .collect();

    session.start();
    collect(&hooks, &session, &mut log);
    let mut ticks = 0u32;
    loop {
        let outcome = session.tick();
        collect(&hooks, &session, &mut log);
        if !matches!(outcome, TickOutcome::Counted { .. }) {
            break;
        }
        ticks += 1;
    }
    tracing::info!(ticks, events = log.len(), "simulation finished");

    if json {
        return print_json(&serde_json::json!({
            "mode": session.mode(),
            "assignment": assignment,
            "events": log,
        }));
    }

    println!("Mode: {}", session.mode());
    for entry in &assignment {
        let label = entry["checkpoint"].as_u64().unwrap_or(0);
        let name = entry["segment"].as_str().unwrap_or("(none)");
        println!("  {label:02}:00 → {name}");
    }
    for entry in &log {
        println!("[{}] {:<18} {}", entry.at, entry.kind, describe(&entry.detail));
    }
    Ok(())
}

fn collect(hooks: &RecordingHooks, session: &TimerSession, log: &mut Vec<LogEntry>) {
    let at = session.clock().view().display;
    for recorded in hooks.drain() {
        let (kind, detail) = match recorded {
            Recorded::Event(SessionEvent::Clock(_)) => continue,
            Recorded::Event(event) => (
                event.kind(),
                serde_json::to_value(&event).unwrap_or_default(),
            ),
            Recorded::Perform(action) => (
                "perform",
                serde_json::to_value(&action).unwrap_or_default(),
            ),
            Recorded::StopCue(cue) => ("stop_cue", serde_json::json!({ "cue": cue })),
        };
        log.push(LogEntry {
            at: at.clone(),
            kind,
            detail,
        });
    }
}

fn describe(detail: &serde_json::Value) -> String {
    let field = |k: &str| detail.get(k).and_then(|v| v.as_str()).map(str::to_string);
    if let Some(segment) = field("segment") {
        return segment;
    }
    if let Some(message) = field("message").or_else(|| field("mode")) {
        return message;
    }
    if let Some(rows) = detail.get("rows").and_then(|r| r.as_array()) {
        let parts: Vec<String> = rows
            .iter()
            .map(|r| {
                let state = if r["triggered"] == true { "fired" } else { "pending" };
                format!("{} {state}", r["label"].as_str().unwrap_or("?"))
            })
            .collect();
        return parts.join(", ");
    }
    if let Some(kind) = field("type") {
        let cue = field("cue").map(|c| format!(" {c}")).unwrap_or_default();
        return format!("{kind}{cue}");
    }
    detail.to_string()
}
