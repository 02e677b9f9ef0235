use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use chrono::Local;
use docqa_core::{update, AppState, Msg};
use docqa_logging::{docqa_info, docqa_warn};

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::ui::commands::{self, parse_command, Command};
use crate::ui::{picker, render};

/// Everything the main loop reacts to, in arrival order.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    /// Text shown to the user without touching state.
    Notice(String),
    Quit,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    docqa_info!("Starting docqa against {}", config.base_url);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.service_settings(), tx.clone())?;
    spawn_input_reader(tx.clone())?;

    println!("{}", commands::HELP);
    let _ = tx.send(AppEvent::Msg(Msg::SessionStarted));

    // Single consumer: each message is applied to the state on its own,
    // in the order it arrived, no matter which operation produced it.
    let mut state = AppState::new();
    while let Ok(event) = rx.recv() {
        match event {
            AppEvent::Msg(msg) => {
                let (next, effects) = update(state, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    print_frame(&state);
                }
            }
            AppEvent::Notice(text) => println!("{text}"),
            AppEvent::Quit => break,
        }
    }

    docqa_info!(
        "Shutting down with {} operation(s) still pending",
        state.notifier().pending_count()
    );
    Ok(())
}

fn print_frame(state: &AppState) {
    println!("--- {} ---", Local::now().format("%H:%M:%S"));
    for line in render::render(&state.view()) {
        println!("{line}");
    }
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("docqa-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        docqa_warn!("Failed to read input: {}", err);
                        break;
                    }
                };
                for event in events_for_line(&line) {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
            }
            // End of input closes the session like `quit`.
            let _ = tx.send(AppEvent::Quit);
        })?;
    Ok(())
}

/// Turns one line of user input into the events it stands for.
fn events_for_line(line: &str) -> Vec<AppEvent> {
    let command = match parse_command(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Vec::new(),
        Err(err) => return vec![AppEvent::Notice(err.to_string())],
    };

    match command {
        Command::Select(paths) => {
            let (accepted, rejected) = picker::pick_pdfs(&paths);
            let mut events: Vec<AppEvent> = rejected
                .iter()
                .map(|rejection| {
                    let text = rejection.describe();
                    docqa_warn!("Rejected selection: {}", text);
                    AppEvent::Notice(format!("Skipped: {text}"))
                })
                .collect();
            events.push(AppEvent::Msg(Msg::FilesSelected(accepted)));
            events
        }
        Command::Process => vec![AppEvent::Msg(Msg::ProcessClicked)],
        Command::Ask(text) => vec![
            AppEvent::Msg(Msg::QueryChanged(text)),
            AppEvent::Msg(Msg::SendClicked),
        ],
        Command::Dismiss(op_id) => vec![AppEvent::Msg(Msg::NotificationDismissed(op_id))],
        Command::History => vec![AppEvent::Msg(Msg::HistoryRequested)],
        Command::Help => vec![AppEvent::Notice(commands::HELP.to_string())],
        Command::Quit => vec![AppEvent::Quit],
    }
}
