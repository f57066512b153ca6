//! Single-threaded event loop driving the view.
//!
//! # Design
//! `App` owns the `ViewState` and is the only thing that mutates it. Every
//! input arrives as an `Event` on one channel and is handled to completion
//! before the next is taken. Queries run on short-lived worker threads that
//! own nothing but the request; they post a `Completed` event back and exit.
//! Queries are never cancelled and never ordered: completions are applied in
//! arrival order.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use machines_core::{ApiError, Machine, MachineClient};

use crate::query::{Query, QueryKind};
use crate::render::{render, Page};
use crate::state::ViewState;
use crate::transport::Transport;

#[derive(Debug)]
pub enum Event {
    IpAddressChanged(String),
    ContactInfoChanged(String),
    SearchByIpAddress,
    SearchByContactInfo,
    GetAllMachines,
    Completed {
        query: Query,
        outcome: Result<Vec<Machine>, ApiError>,
    },
    Redraw,
    Quit,
}

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// State changed; re-render.
    Render,
    /// Nothing visible changed.
    Continue,
    Quit,
}

pub struct App {
    state: ViewState,
    client: MachineClient,
    transport: Arc<dyn Transport>,
    tx: Sender<Event>,
    rx: Receiver<Event>,
    in_flight: usize,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("client", &self.client)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(client: MachineClient, transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: ViewState::new(),
            client,
            transport,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn page(&self) -> Page {
        render(&self.state)
    }

    /// Queries dispatched whose completion has not been handled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Handle for posting input events from other threads.
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn handle(&mut self, event: Event) -> Control {
        match event {
            Event::IpAddressChanged(value) => {
                self.state.set_ip_address(value);
                Control::Render
            }
            Event::ContactInfoChanged(value) => {
                self.state.set_contact_info(value);
                Control::Render
            }
            Event::SearchByIpAddress => self.dispatch(QueryKind::ByIpAddress),
            Event::SearchByContactInfo => self.dispatch(QueryKind::ByContactInfo),
            Event::GetAllMachines => self.dispatch(QueryKind::All),
            Event::Completed { query, outcome } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match &outcome {
                    Ok(machines) => {
                        tracing::info!(?query, records = machines.len(), "query succeeded")
                    }
                    Err(err) => tracing::warn!(?query, error = %err, "query failed"),
                }
                self.state.apply(&outcome);
                Control::Render
            }
            Event::Redraw => Control::Render,
            Event::Quit => Control::Quit,
        }
    }

    fn dispatch(&mut self, kind: QueryKind) -> Control {
        let query = self.state.query(kind);
        tracing::debug!(?kind, ?query, "dispatching query");
        self.in_flight += 1;

        let client = self.client.clone();
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = query.fetch(&client, transport.as_ref());
            // The loop may already be gone after Quit; the result is dropped.
            let _ = tx.send(Event::Completed { query, outcome });
        });
        Control::Continue
    }

    /// Block for the next event and handle it.
    pub fn step(&mut self) -> Control {
        match self.rx.recv() {
            Ok(event) => self.handle(event),
            // `self.tx` keeps the channel open, so this is unreachable in
            // practice; treat it as a request to stop.
            Err(_) => Control::Quit,
        }
    }

    /// Run until a `Quit` event, calling `on_render` after every visible
    /// change.
    pub fn run(&mut self, mut on_render: impl FnMut(&Page)) {
        on_render(&self.page());
        loop {
            match self.step() {
                Control::Render => on_render(&self.page()),
                Control::Continue => {}
                Control::Quit => break,
            }
        }
    }

    /// Handle events until every dispatched query has completed.
    pub fn wait_idle(&mut self) {
        while self.in_flight > 0 {
            if self.step() == Control::Quit {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::tests::CannedTransport;

    const BASE: &str = "http://inventory";

    fn app(transport: CannedTransport) -> App {
        App::new(MachineClient::new(BASE), Arc::new(transport))
    }

    #[test]
    fn field_edits_update_state_synchronously() {
        let mut app = app(CannedTransport::new());
        assert_eq!(app.handle(Event::IpAddressChanged("10.0".to_string())), Control::Render);
        assert_eq!(app.handle(Event::ContactInfoChanged("ops".to_string())), Control::Render);
        assert_eq!(app.state().ip_address(), "10.0");
        assert_eq!(app.state().contact_info(), "ops");
        assert_eq!(app.in_flight(), 0);
    }

    #[test]
    fn search_by_ip_shows_single_row() {
        let mut app = app(CannedTransport::new().respond(
            "http://inventory/remote_machines/10.0.0.1",
            200,
            r#"{"ip_address":"10.0.0.1","description":"edge","contact_info":"x@y.com"}"#,
        ));
        app.handle(Event::IpAddressChanged("10.0.0.1".to_string()));
        assert_eq!(app.handle(Event::SearchByIpAddress), Control::Continue);
        assert_eq!(app.in_flight(), 1);
        app.wait_idle();

        let page = app.page();
        assert!(page.error.is_none());
        assert_eq!(
            page.rows,
            vec![["10.0.0.1".to_string(), "edge".to_string(), "x@y.com".to_string()]]
        );
    }

    #[test]
    fn not_found_keeps_previous_table() {
        let mut app = app(
            CannedTransport::new()
                .respond(
                    "http://inventory/remote_machines",
                    200,
                    r#"[{"ip_address":"10.0.0.1","description":"a","contact_info":"ops"}]"#,
                )
                .respond(
                    "http://inventory/remote_machines/10.0.0.9",
                    404,
                    r#"{"detail":"not found"}"#,
                ),
        );
        app.handle(Event::GetAllMachines);
        app.wait_idle();
        app.handle(Event::IpAddressChanged("10.0.0.9".to_string()));
        app.handle(Event::SearchByIpAddress);
        app.wait_idle();

        let page = app.page();
        assert_eq!(
            page.error,
            Some(vec![
                "An error occurred".to_string(),
                "Status: 404".to_string(),
                "Detail: not found".to_string(),
            ])
        );
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn empty_contact_info_is_sent_as_is() {
        let mut app = app(CannedTransport::new().respond(
            "http://inventory/remote_machines/contact_info/",
            404,
            r#"{"detail":"Not Found"}"#,
        ));
        app.handle(Event::SearchByContactInfo);
        app.wait_idle();
        assert_eq!(app.state().error().and_then(|e| e.status), Some(404));
    }

    #[test]
    fn transport_failure_shows_message_only() {
        let mut app = app(CannedTransport::new());
        app.handle(Event::GetAllMachines);
        app.wait_idle();
        assert_eq!(app.page().error, Some(vec!["An error occurred".to_string()]));
    }

    #[test]
    fn stale_completion_overwrites_newer_result() {
        let mut app = app(CannedTransport::new());
        let newer = Event::Completed {
            query: Query::ByIpAddress("10.0.0.2".to_string()),
            outcome: Ok(vec![Machine::new("10.0.0.2", "new", "ops")]),
        };
        let stale = Event::Completed {
            query: Query::ByIpAddress("10.0.0.1".to_string()),
            outcome: Ok(vec![Machine::new("10.0.0.1", "old", "ops")]),
        };
        app.handle(newer);
        app.handle(stale);
        assert_eq!(app.state().machines()[0].ip_address, "10.0.0.1");
    }

    #[test]
    fn overlapping_queries_all_complete() {
        let mut app = app(
            CannedTransport::new()
                .respond("http://inventory/remote_machines", 200, "[]")
                .respond("http://inventory/remote_machines/contact_info/ops", 200, "[]"),
        );
        app.handle(Event::ContactInfoChanged("ops".to_string()));
        app.handle(Event::GetAllMachines);
        app.handle(Event::SearchByContactInfo);
        assert_eq!(app.in_flight(), 2);
        app.wait_idle();
        assert_eq!(app.in_flight(), 0);
        assert!(app.state().error().is_none());
    }

    #[test]
    fn run_renders_initial_page_and_stops_on_quit() {
        let mut app = app(CannedTransport::new());
        let tx = app.sender();
        tx.send(Event::IpAddressChanged("10.0.0.1".to_string())).unwrap();
        tx.send(Event::Redraw).unwrap();
        tx.send(Event::Quit).unwrap();

        let mut pages = Vec::new();
        app.run(|page| pages.push(page.clone()));
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].ip_address, "");
        assert_eq!(pages[2].ip_address, "10.0.0.1");
    }
}
