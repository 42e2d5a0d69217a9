//! Interactive shell: the event loop that hosts the session.

use std::io::Write as _;

use anyhow::Context;
use roof_session::{Action, Screen, Session, ViewSelector};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bootstrap::Services;
use crate::command::{self, Command};
use crate::render;
use crate::ui;

/// Run the shell until `quit`, end of input, or Ctrl-C.
pub async fn run(services: Services) -> anyhow::Result<()> {
    let Services {
        identity,
        store,
        collection,
    } = services;
    let color = ui::prefs().color;

    let mut session = Session::mount(identity.clone(), store, collection);
    draw(&session, color);

    identity.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let result = loop {
        tokio::select! {
            screen = session.next_notification() => {
                if screen.is_none() {
                    break Ok(());
                }
                session.drain_notifications();
                draw(&session, color);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    break Ok(());
                };
                if !handle(&mut session, &line, color).await {
                    break Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("interrupted");
                break Ok(());
            }
        }
    };

    session.unmount();
    result
}

/// Handle one input line. Returns `false` when the member asked to leave.
async fn handle(session: &mut Session, line: &str, color: bool) -> bool {
    let command = match command::parse(line, session.screen()) {
        Ok(command) => command,
        Err(error) => {
            notice(&format!("{error:#}"), color);
            return true;
        }
    };

    match command {
        Command::Nothing => {}
        Command::Quit => return false,
        Command::Help => print(&render::help(session.screen())),
        Command::OpenImage(image) => {
            if session.screen() == Screen::LoggedIn(ViewSelector::Resources) {
                println!("Opening {}", image.src);
                if let Err(error) = open::that(image.src) {
                    notice(&format!("failed to open browser: {error}"), color);
                }
            } else {
                notice("'open' is only available on the resources screen", color);
            }
        }
        Command::Session(action) => {
            if let Some(progress) = progress_line(&action) {
                println!("{progress}");
            }
            let dispatched = interruptible(session.dispatch(action), async {
                // A listener failure only means Ctrl-C cannot cut the wait short.
                if tokio::signal::ctrl_c().await.is_err() {
                    std::future::pending::<()>().await;
                }
            })
            .await;
            let Some(outcome) = dispatched else {
                tracing::debug!("interrupted while waiting on a gateway");
                return false;
            };
            match outcome {
                Ok(()) => {
                    // Gateways publish before returning; apply those first.
                    session.drain_notifications();
                    draw(session, color);
                }
                Err(error) => notice(&error.to_string(), color),
            }
        }
    }
    true
}

/// Run `work` unless `interrupt` resolves first, in which case `work` is
/// dropped mid-flight.
async fn interruptible<T>(
    work: impl Future<Output = T>,
    interrupt: impl Future<Output = ()>,
) -> Option<T> {
    tokio::select! {
        output = work => Some(output),
        () = interrupt => None,
    }
}

const fn progress_line(action: &Action) -> Option<&'static str> {
    match action {
        Action::SubmitAuth => Some("Contacting the identity service..."),
        Action::SubmitAssessment => Some("Submitting your request..."),
        Action::SignOut => Some("Signing out..."),
        _ => None,
    }
}

fn draw(session: &Session, color: bool) {
    print(&format!("\n{}", render::screen(session, color)));
    if session.screen() != Screen::Loading {
        println!("(type 'help' for commands)");
    }
}

fn notice(message: &str, color: bool) {
    println!("{}", ui::paint("31", message, color));
}

fn print(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}
