//! Line-oriented console driver
//!
//! Reads user input from stdin and renders session snapshots as they
//! arrive. Both feed one select! loop, so a result can land while the
//! prompt is waiting and output never blocks input.
//!
//! Plain input is analyzed; slash commands inspect or change the session.

use anyhow::Result;
use sentiment_application::{SessionHandle, SessionSnapshot};
use sentiment_domain::OperationStatus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn run(
    session: &SessionHandle,
    mut snapshots: mpsc::UnboundedReceiver<SessionSnapshot>,
    show_status_lines: bool,
) -> Result<()> {
    print_welcome();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut latest: Option<SessionSnapshot> = None;

    loop {
        tokio::select! {
            snapshot = snapshots.recv() => {
                let Some(snapshot) = snapshot else { break };
                render_transitions(latest.as_ref(), &snapshot, show_status_lines);
                latest = Some(snapshot);
            }

            line = lines.next_line() => {
                let Some(line) = line? else { break }; // stdin closed
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if let Some(command) = input.strip_prefix('/') {
                    if !handle_command(command, session, latest.as_ref()) {
                        break;
                    }
                } else {
                    session.analyze(input);
                }
            }
        }
    }

    Ok(())
}

fn print_welcome() {
    println!();
    println!("╭─────────────────────────────────────────────╮");
    println!("│          Sentiment Console                  │");
    println!("╰─────────────────────────────────────────────╯");
    println!();
    println!("Type any text to analyze its sentiment.");
    println!();
    println!("Commands:");
    println!("  /name <name> - Create or rename your profile");
    println!("  /history     - Show all analyzed texts");
    println!("  /status      - Show operation statuses");
    println!("  /help        - Show this help");
    println!("  /quit        - Exit");
    println!();
}

/// Handle one slash command; returns false when the console should exit
fn handle_command(
    command: &str,
    session: &SessionHandle,
    latest: Option<&SessionSnapshot>,
) -> bool {
    let (name, args) = match command.split_once(' ') {
        Some((name, args)) => (name, args.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "exit" | "q" => {
            println!("Bye!");
            return false;
        }
        "help" | "h" | "?" => {
            println!();
            println!("Commands:");
            println!("  /name <name>    - Create or rename your profile");
            println!("  /history        - Show all analyzed texts");
            println!("  /status         - Show operation statuses");
            println!("  /help, /h, /?   - Show this help");
            println!("  /quit, /exit, /q - Exit");
            println!();
        }
        "name" => {
            if args.is_empty() {
                println!("Usage: /name <display name>");
            } else {
                session.submit_profile(args);
            }
        }
        "history" => match latest {
            Some(snapshot) if !snapshot.history.is_empty() => {
                println!();
                for (index, record) in snapshot.history.iter().enumerate() {
                    println!(
                        "  {}. [{} {:.2}%] {}",
                        index + 1,
                        record.sentiment,
                        record.confidence * 100.0,
                        record.text
                    );
                }
                println!();
            }
            _ => println!("No analyses yet."),
        },
        "status" => match latest {
            Some(snapshot) => {
                println!();
                println!("  profile:  {}", snapshot.profile_status);
                println!("  history:  {}", snapshot.history_status);
                println!("  analysis: {}", snapshot.analyze_status);
                println!();
            }
            None => println!("No session activity yet."),
        },
        _ => {
            println!("Unknown command: /{}", name);
            println!("Type /help for available commands.");
        }
    }

    true
}

/// Print what changed between two consecutive snapshots
fn render_transitions(
    previous: Option<&SessionSnapshot>,
    current: &SessionSnapshot,
    show_status_lines: bool,
) {
    if previous.map(|p| &p.profile_status) != Some(&current.profile_status) {
        match &current.profile_status {
            OperationStatus::InFlight if show_status_lines => println!("... profile"),
            OperationStatus::Succeeded => {
                if let Some(identity) = &current.identity {
                    println!("Welcome back, {}!", identity.name());
                }
            }
            OperationStatus::Failed(reason) => println!("Profile: {}", reason),
            _ => {}
        }
    }

    if previous.map(|p| &p.history_status) != Some(&current.history_status) {
        match &current.history_status {
            OperationStatus::InFlight if show_status_lines => println!("... loading history"),
            OperationStatus::Succeeded => {
                println!("{} stored analyses loaded.", current.history.len());
            }
            OperationStatus::Failed(reason) => println!("History: {}", reason),
            _ => {}
        }
    }

    if previous.map(|p| &p.analyze_status) != Some(&current.analyze_status) {
        match &current.analyze_status {
            OperationStatus::InFlight if show_status_lines => println!("... analyzing"),
            OperationStatus::Succeeded => {
                if let Some(outcome) = &current.current_analysis {
                    println!(
                        "Sentiment: {}  Confidence: {:.2}%",
                        outcome.result,
                        outcome.confidence * 100.0
                    );
                }
            }
            OperationStatus::Failed(reason) => println!("Analysis: {}", reason),
            _ => {}
        }
    }
}
