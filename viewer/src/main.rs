use std::io::BufRead;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;

use clap::{Parser, Subcommand};
use machines_core::{MachineClient, DEFAULT_BASE_URL};
use machines_viewer::command::{self, Command, HELP};
use machines_viewer::{App, Event, Page, UreqTransport};
use tracing_subscriber::EnvFilter;

/// Browse the remote machines inventory.
#[derive(Debug, Parser)]
#[command(name = "machines-viewer", version)]
struct Cli {
    /// Address of the inventory service.
    #[arg(long, env = "MACHINES_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Run a single query and exit instead of starting a session.
    #[command(subcommand)]
    query: Option<OneShot>,
}

#[derive(Debug, Subcommand)]
enum OneShot {
    /// Look up one machine by IP address.
    Ip { ip_address: String },
    /// List machines sharing a contact.
    Contact { contact_info: String },
    /// List every machine.
    All,
}

fn print_page(page: &Page) {
    println!("{page}");
}

fn one_shot(mut app: App, query: OneShot) -> ExitCode {
    let events = match query {
        OneShot::Ip { ip_address } => {
            vec![Event::IpAddressChanged(ip_address), Event::SearchByIpAddress]
        }
        OneShot::Contact { contact_info } => vec![
            Event::ContactInfoChanged(contact_info),
            Event::SearchByContactInfo,
        ],
        OneShot::All => vec![Event::GetAllMachines],
    };
    for event in events {
        app.handle(event);
    }
    app.wait_idle();
    print_page(&app.page());

    if app.state().error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn interactive(mut app: App) -> ExitCode {
    let tx = app.sender();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read stdin");
                    break;
                }
            };
            match command::parse(&line) {
                Ok(Some(Command::Event(event))) => {
                    let quit = matches!(event, Event::Quit);
                    if tx.send(event).is_err() || quit {
                        return;
                    }
                }
                Ok(Some(Command::Help)) => println!("{HELP}"),
                Ok(None) => {}
                Err(e) => eprintln!("{e}"),
            }
        }
        let _ = tx.send(Event::Quit);
    });

    app.run(print_page);
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!(base_url = %cli.base_url, "starting viewer");

    let app = App::new(
        MachineClient::new(&cli.base_url),
        Arc::new(UreqTransport::new()),
    );
    match cli.query {
        Some(query) => one_shot(app, query),
        None => interactive(app),
    }
}
