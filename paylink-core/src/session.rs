//! Session: the foreground owner of a payment window's [`DisplayState`].
//!
//! The session is responsible for:
//! - Resolving the launch argument once at start-up
//! - Spawning at most one background fetch at a time
//! - Applying the fetch result on the foreground task, never from the
//!   background task itself
//! - Publishing every applied state to a [`StateStore`] for the renderer
//! - Cancelling the fetch when the window goes away

use crate::cancel::CancelHandle;
use crate::resolver::{FetchOutcome, PaymentDataResolver, Resolution};
use crate::source::{FetchError, PaymentSource};
use crate::state::DisplayState;
use crate::store::{StateStore, StateWatcher};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use url::Url;

pub struct Session<S> {
    resolver: Arc<PaymentDataResolver<S>>,
    state: DisplayState,
    store: StateStore<DisplayState>,
    cancel: CancelHandle,
    in_flight: Option<JoinHandle<Option<FetchOutcome>>>,
}

impl<S: PaymentSource + 'static> Session<S> {
    pub fn new(resolver: Arc<PaymentDataResolver<S>>) -> Self {
        let state = resolver.initial_state();
        Self {
            store: StateStore::new(state.clone()),
            resolver,
            state,
            cancel: CancelHandle::new(),
            in_flight: None,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn subscribe(&self) -> StateWatcher<DisplayState> {
        self.store.subscribe()
    }

    /// Target of the "visit website" action.
    pub fn website_url(&self) -> &Url {
        &self.state.fallback_url
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Resolve the launch argument; fetch when there is nothing to show.
    pub fn start(&mut self, launch: Option<&str>) {
        match self
            .resolver
            .resolve_from_launch_payload(launch, self.state.clone())
        {
            Resolution::NoPayload => {
                info!("No launch payload, loading payment from the remote endpoint");
                self.request_fetch();
            }
            Resolution::Resolved(state) => self.apply(state),
            Resolution::Recover(state) => {
                self.apply(state);
                info!("Recovering from undecodable payload with a remote fetch");
                self.request_fetch();
            }
        }
    }

    /// Start a background fetch.
    ///
    /// Returns `false` without doing anything while a fetch is already in
    /// flight or after [`close`](Self::close).
    pub fn request_fetch(&mut self) -> bool {
        if self.state.loading {
            debug!("Fetch already in flight, ignoring request");
            return false;
        }
        if self.cancel.is_cancelled() {
            debug!("Session closed, ignoring fetch request");
            return false;
        }

        self.apply(self.resolver.loading_state(self.state.clone()));

        let resolver = Arc::clone(&self.resolver);
        let mut token = self.cancel.token();
        self.in_flight = Some(tokio::spawn(async move {
            let Some(outcome) = resolver.fetch(&mut token).await else {
                return None;
            };
            if token.is_cancelled() {
                return None;
            }
            Some(outcome)
        }));
        true
    }

    /// Wait for the in-flight fetch and apply its result.
    ///
    /// Returns `None` when nothing is in flight or the fetch was cancelled.
    pub async fn next_completion(&mut self) -> Option<&DisplayState> {
        let handle = self.in_flight.take()?;
        let outcome = match handle.await {
            Ok(Some(outcome)) => outcome,
            Ok(None) => {
                debug!("Fetch ended without a result");
                return None;
            }
            Err(e) => {
                error!(error = %e, "Payment fetch task failed");
                Err(FetchError::Unavailable(e.to_string()))
            }
        };
        if self.cancel.is_cancelled() {
            return None;
        }
        let next = self.resolver.complete_fetch(self.state.clone(), outcome);
        self.apply(next);
        Some(&self.state)
    }

    /// Cancel any in-flight fetch. Its result, if any, is discarded.
    pub fn close(&mut self) {
        if !self.cancel.is_cancelled() {
            debug!("Closing session");
            self.cancel.cancel();
        }
    }

    fn apply(&mut self, next: DisplayState) {
        debug!(status = %next.status, loading = next.loading, "Display state updated");
        self.state = next;
        self.store.publish(self.state.clone());
    }
}
