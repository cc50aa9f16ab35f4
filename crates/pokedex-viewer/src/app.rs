//! The viewer's event loop.
//!
//! ```text
//! roster task ----\
//! resolve tasks ---+--> mpsc --> App::handle --> Session --> render --> stdout
//! stdin reader ---/
//! ```
//!
//! The loop runs on one cooperative thread. Network work happens in
//! spawned tasks that report back as [`AppEvent`]s; only `handle` touches
//! the [`Session`]. Resolutions are not serialized against later
//! selections, the session's ticket check drops whichever finishes stale.
//!
//! Standard input is read on its own OS thread. A blocking read there is
//! never awaited by the runtime, so `quit` returns without waiting for
//! another line.

use std::io::{BufRead, ErrorKind, Write};
use std::ops::RangeInclusive;
use std::thread;

use pokedex_client::{ClientError, PokeApiClient, load_roster, resolve};
use pokedex_core::{Evolution, ResolveRequest, ResolveTicket, Session, SessionError};
use pokedex_types::Pokemon;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandError};
use crate::error::ViewerError;
use crate::render;

/// Something the event loop must react to.
#[derive(Debug)]
pub enum AppEvent {
    /// The roster load finished.
    RosterLoaded(Result<Vec<Pokemon>, ClientError>),
    /// An evolution resolution finished.
    EvolutionResolved {
        /// Which selection it was started for.
        ticket: ResolveTicket,
        /// Flattened names, empty on failure.
        names: Vec<String>,
    },
    /// A parsed input line.
    Command(Command),
    /// An input line that did not parse.
    BadInput(CommandError),
    /// Standard input reached end of file.
    InputClosed,
}

/// Whether the loop keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Wait for the next event.
    Continue,
    /// Leave the loop.
    Exit,
}

/// The viewer: session state, an API client, and an output sink.
pub struct App<W: Write> {
    client: PokeApiClient,
    roster_ids: RangeInclusive<u32>,
    session: Session,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    out: W,
    input_closed: bool,
}

impl<W: Write> App<W> {
    /// Create a viewer that will load `roster_ids` and print to `out`.
    pub fn new(client: PokeApiClient, roster_ids: RangeInclusive<u32>, out: W) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            client,
            roster_ids,
            session: Session::new(),
            events_tx,
            events_rx,
            out,
            input_closed: false,
        }
    }

    /// Run until the user quits, or until input ends and no work is pending.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError`] if writing to the output fails or a session
    /// transition is attempted out of order.
    pub async fn run(mut self) -> Result<(), ViewerError> {
        self.print(&render::loading())?;
        self.spawn_roster_load();
        spawn_input_reader(self.events_tx.clone())?;

        while let Some(event) = self.events_rx.recv().await {
            if self.handle(event)? == Flow::Exit {
                break;
            }
        }

        info!("viewer exiting");
        Ok(())
    }

    /// Apply one event to the session and print whatever changed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError`] if writing to the output fails or a session
    /// transition is attempted out of order.
    pub fn handle(&mut self, event: AppEvent) -> Result<Flow, ViewerError> {
        match event {
            AppEvent::RosterLoaded(Ok(roster)) => {
                let request = self.session.load_succeeded(roster)?;
                self.print_roster()?;
                if let Some(request) = request {
                    self.spawn_resolution(request);
                    self.print_detail()?;
                }
            }
            AppEvent::RosterLoaded(Err(e)) => {
                self.session.load_failed(e.to_string())?;
                self.print_roster()?;
            }
            AppEvent::EvolutionResolved { ticket, names } => {
                if self.session.evolution_resolved(ticket, names) {
                    self.print_detail()?;
                }
            }
            AppEvent::Command(command) => return self.command(command),
            AppEvent::BadInput(CommandError::Empty) => {}
            AppEvent::BadInput(e) => self.print(&e.to_string())?,
            AppEvent::InputClosed => {
                debug!("input closed");
                self.input_closed = true;
            }
        }

        if self.input_closed && self.settled() {
            return Ok(Flow::Exit);
        }
        Ok(Flow::Continue)
    }

    fn command(&mut self, command: Command) -> Result<Flow, ViewerError> {
        let selection = match command {
            Command::Select(id) => self.session.select(id),
            Command::SelectName(name) => self.session.select_by_name(&name),
            Command::Next => self.session.select_next(),
            Command::Previous => self.session.select_previous(),
            Command::List => {
                self.print_roster()?;
                return Ok(Flow::Continue);
            }
            Command::Show => {
                self.print_detail()?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                self.print(&render::help())?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Exit),
        };

        match selection {
            Ok(request) => {
                self.spawn_resolution(request);
                self.print_detail()?;
            }
            Err(SessionError::NotReady) => self.print(&render::loading())?,
            Err(e) => self.print(&e.to_string())?,
        }
        Ok(Flow::Continue)
    }

    /// Loaded, and no resolution is in flight for the selection.
    fn settled(&self) -> bool {
        self.session
            .ready()
            .is_some_and(|ready| !matches!(ready.evolution(), Evolution::Pending))
    }

    fn spawn_roster_load(&self) {
        let client = self.client.clone();
        let ids = self.roster_ids.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = load_roster(&client, ids).await;
            if tx.send(AppEvent::RosterLoaded(result)).is_err() {
                debug!("event loop gone, dropping roster");
            }
        });
    }

    fn spawn_resolution(&self, request: ResolveRequest) {
        debug!(
            pokemon = request.pokemon.name,
            generation = request.ticket.generation(),
            "resolving evolutions"
        );
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let ResolveRequest { ticket, pokemon } = request;
            let names = resolve(&client, &pokemon).await;
            if tx
                .send(AppEvent::EvolutionResolved { ticket, names })
                .is_err()
            {
                debug!("event loop gone, dropping evolution result");
            }
        });
    }

    fn print_roster(&mut self) -> Result<(), ViewerError> {
        let text = self
            .session
            .ready()
            .map_or_else(render::loading, render::roster);
        self.print(&text)
    }

    fn print_detail(&mut self) -> Result<(), ViewerError> {
        let text = self
            .session
            .ready()
            .map_or_else(render::loading, render::detail);
        self.print(&text)
    }

    fn print(&mut self, text: &str) -> Result<(), ViewerError> {
        writeln!(self.out, "{text}\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Forward stdin lines to the event loop from a dedicated thread.
fn spawn_input_reader(tx: mpsc::UnboundedSender<AppEvent>) -> Result<(), ViewerError> {
    thread::Builder::new()
        .name("stdin-reader".to_owned())
        .spawn(move || read_input(std::io::stdin().lock(), &tx))?;
    Ok(())
}

/// Turn input lines into events until end of input, `quit`, or the loop
/// going away. Lines that are not UTF-8 are skipped.
fn read_input<R: BufRead>(mut input: R, tx: &mpsc::UnboundedSender<AppEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let event = match input.read_until(b'\n', &mut buf) {
            Ok(0) => AppEvent::InputClosed,
            Ok(_) => match std::str::from_utf8(&buf) {
                Ok(line) => match line.parse::<Command>() {
                    Ok(command) => AppEvent::Command(command),
                    Err(e) => AppEvent::BadInput(e),
                },
                Err(e) => {
                    warn!(error = %e, "skipping input line that is not UTF-8");
                    continue;
                }
            },
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(error = %e, "failed to read input");
                AppEvent::InputClosed
            }
        };
        let done = matches!(event, AppEvent::InputClosed | AppEvent::Command(Command::Quit));
        if tx.send(event).is_err() || done {
            break;
        }
    }
}
