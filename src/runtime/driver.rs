//! Async event loop connecting the controller to its collaborators.
//!
//! [`Driver`] owns the [`AppState`] and feeds it one event at a time. Fetch and
//! transfer actions are executed here as spawned tokio tasks; each task sends
//! its completion back through an unbounded channel as an [`Event`], so new
//! input keeps flowing while requests are in flight. Actions meant for the
//! rendering surface are returned to the caller.

use crate::api::{FetchRequest, PixabayClient, SearchFetcher};
use crate::app::{handle_event, Action, AppState, Event};
use crate::domain::error::Result;
use crate::platform::{run_transfer, LocalPlatform, PlatformServices, TransferRequest};
use crate::Config;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;

/// Event loop owning the controller state.
pub struct Driver {
    state: AppState,
    fetcher: Arc<dyn SearchFetcher>,
    platform: Arc<dyn PlatformServices>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    in_flight: usize,
}

impl Driver {
    #[must_use]
    pub fn new(state: AppState, fetcher: Arc<dyn SearchFetcher>, platform: Arc<dyn PlatformServices>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            fetcher,
            platform,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Builds a driver with the HTTP search client and local platform services.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = Arc::new(PixabayClient::new(config)?);
        let platform = Arc::new(LocalPlatform::new(config)?);
        let state = crate::initialize(config);

        tracing::debug!(client = ?fetcher, "driver constructed");
        Ok(Self::new(state, fetcher, platform))
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of fetches and transfers whose completion has not been handled.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// True when no background work or debounced search is outstanding.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.in_flight == 0 && !self.state.search_debounce.is_pending()
    }

    /// Handles one event and executes the resulting background actions.
    ///
    /// Returns whether the view changed and the actions left for the surface.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`]; state is unchanged in that case.
    pub fn dispatch(&mut self, event: &Event) -> Result<(bool, Vec<Action>)> {
        if matches!(event, Event::FetchCompleted { .. } | Event::TransferCompleted { .. }) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }

        let (changed, actions) = handle_event(&mut self.state, event)?;

        let mut surface = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                Action::Fetch(request) => self.spawn_fetch(request),
                Action::Transfer(request) => self.spawn_transfer(request),
                other => surface.push(other),
            }
        }

        tracing::debug!(
            changed,
            surface_actions = surface.len(),
            in_flight = self.in_flight,
            "event dispatched"
        );
        Ok((changed, surface))
    }

    /// Waits for the next completion or debounce deadline.
    ///
    /// A due debounce produces [`Event::Tick`].
    pub async fn next_event(&mut self) -> Event {
        let deadline = self.state.search_debounce.deadline();

        tokio::select! {
            Some(event) = self.rx.recv() => event,
            () = wait_until(deadline) => Event::Tick { now: Instant::now() },
        }
    }

    /// Waits for the next internal event and dispatches it.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`dispatch`](Self::dispatch).
    pub async fn step(&mut self) -> Result<(bool, Vec<Action>)> {
        let event = self.next_event().await;
        self.dispatch(&event)
    }

    /// Steps until no background work remains, or `limit` elapses.
    ///
    /// Returns the surface actions produced along the way.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`dispatch`](Self::dispatch).
    pub async fn settle(&mut self, limit: Duration) -> Result<Vec<Action>> {
        let mut surface = Vec::new();
        let work = async {
            while !self.is_idle() {
                let (_, actions) = self.step().await?;
                surface.extend(actions);
            }
            Ok::<(), crate::PixgridError>(())
        };

        let outcome = tokio::time::timeout(limit, work).await;
        match outcome {
            Ok(result) => result?,
            Err(_) => tracing::warn!(in_flight = self.in_flight, "driver did not settle in time"),
        }
        Ok(surface)
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let FetchRequest { ticket, params } = request;
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let span = tracing::debug_span!("fetch", session = ticket.session, page = ticket.page);

        self.in_flight += 1;
        tokio::spawn(
            async move {
                let outcome = fetcher.fetch(&params).await;
                tracing::debug!(success = outcome.is_success(), "fetch finished");
                if tx.send(Event::FetchCompleted { ticket, outcome }).is_err() {
                    tracing::debug!("driver dropped before fetch completed");
                }
            }
            .instrument(span),
        );
    }

    fn spawn_transfer(&mut self, request: TransferRequest) {
        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        let span = tracing::debug_span!("transfer", id = request.id, intent = ?request.intent, file = %request.file_name);

        self.in_flight += 1;
        tokio::spawn(
            async move {
                let notice = run_transfer(platform.as_ref(), &request).await;
                let event = Event::TransferCompleted {
                    id: request.id,
                    intent: request.intent,
                    notice,
                };
                if tx.send(event).is_err() {
                    tracing::debug!("driver dropped before transfer completed");
                }
            }
            .instrument(span),
        );
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("session", &self.state.session)
            .field("page", &self.state.page)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}
