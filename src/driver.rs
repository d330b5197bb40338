//! Event loop that drives a `LiveSession`: ticks and presentation events,
//! one at a time.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::field::{Field, parse_field};
use crate::render::Renderer;
use crate::session::{LiveSession, SessionEvent};

enum Wake {
    Tick,
    Expiry,
    Event(Option<SessionEvent>),
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Calculates once, then serves ticks and events until `Unload` or until
/// every event sender is gone.
pub async fn run<R: Renderer, C: Clock>(
    session: &mut LiveSession<R, C>,
    mut events: mpsc::Receiver<SessionEvent>,
) -> Result<()> {
    session
        .handle(SessionEvent::Recalculate)
        .await
        .context("Initial calculation failed")?;

    loop {
        let expiry = session.next_expiry();
        let wake = tokio::select! {
            _ = session.next_tick() => Wake::Tick,
            _ = sleep_until(expiry) => Wake::Expiry,
            event = events.recv() => Wake::Event(event),
        };

        match wake {
            Wake::Tick => session.on_tick(),
            Wake::Expiry => session.on_expiry().context("Failed to redraw")?,
            Wake::Event(Some(event)) => {
                let keep_going = session
                    .handle(event)
                    .await
                    .with_context(|| format!("Failed to handle {event:?}"))?;
                if !keep_going {
                    break;
                }
            }
            Wake::Event(None) => {
                debug!("event channel closed");
                session.stop();
                break;
            }
        }
    }

    info!("session ended");
    Ok(())
}

/// Maps a typed command to an event. Fields are edited with `bday=14` or
/// `set bday 14`; an empty value clears the field.
pub fn parse_command(line: &str) -> Option<SessionEvent> {
    let line = line.trim();
    if let Some(event) = parse_edit(line) {
        return Some(event);
    }
    match line {
        "c" | "calc" | "" => Some(SessionEvent::Recalculate),
        "p" | "pause" => Some(SessionEvent::Hidden),
        "r" | "resume" => Some(SessionEvent::Visible),
        "b" | "back" => Some(SessionEvent::Back),
        "q" | "quit" => Some(SessionEvent::Unload),
        _ => None,
    }
}

fn parse_edit(line: &str) -> Option<SessionEvent> {
    let (id, value) = match line.split_once('=') {
        Some((id, value)) => (id.trim(), value),
        None => {
            let rest = line.strip_prefix("set ")?.trim_start();
            rest.split_once(char::is_whitespace).unwrap_or((rest, ""))
        }
    };
    let field = Field::from_id(id)?;
    Some(SessionEvent::Edit(field, parse_field(value)))
}

/// Forwards stdin commands and Ctrl+C into `tx`.
pub fn spawn_input_tasks(tx: mpsc::Sender<SessionEvent>) {
    let stdin_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let Some(event) = parse_command(&line) else {
                debug!(input = %line, "unknown command");
                continue;
            };
            if stdin_tx.send(event).await.is_err() {
                break;
            }
        }
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(SessionEvent::Unload).await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_map_to_events() {
        assert_eq!(parse_command("c"), Some(SessionEvent::Recalculate));
        assert_eq!(parse_command(""), Some(SessionEvent::Recalculate));
        assert_eq!(parse_command(" p "), Some(SessionEvent::Hidden));
        assert_eq!(parse_command("resume"), Some(SessionEvent::Visible));
        assert_eq!(parse_command("b"), Some(SessionEvent::Back));
        assert_eq!(parse_command("q"), Some(SessionEvent::Unload));
        assert_eq!(parse_command("x"), None);
    }

    #[test]
    fn edit_commands_name_a_field() {
        assert_eq!(
            parse_command("bday=14"),
            Some(SessionEvent::Edit(Field::BirthDay, Some(14)))
        );
        assert_eq!(
            parse_command("set dyear 2070"),
            Some(SessionEvent::Edit(Field::DeathYear, Some(2070)))
        );
        assert_eq!(
            parse_command("bmonth="),
            Some(SessionEvent::Edit(Field::BirthMonth, None))
        );
        assert_eq!(
            parse_command("set byear"),
            Some(SessionEvent::Edit(Field::BirthYear, None))
        );
        assert_eq!(parse_command("age=3"), None);
        assert_eq!(parse_command("set nothing 3"), None);
    }
}
