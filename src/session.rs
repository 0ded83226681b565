use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::models::GeneratedPost;

/// What the page shows for one client: the newest generation and its posts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub loading: bool,
    pub posts: Vec<GeneratedPost>,
}

struct ClientState {
    snapshot: SessionSnapshot,
    touched: Instant,
}

impl ClientState {
    fn new() -> Self {
        ClientState {
            snapshot: SessionSnapshot::default(),
            touched: Instant::now(),
        }
    }
}

/// Per-client generation state. Every generation takes a ticket from a
/// monotonically increasing counter; only the holder of the newest ticket
/// may write results, so a slow response can never overwrite a newer one.
pub struct SessionStore {
    clients: Mutex<HashMap<String, ClientState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            clients: Mutex::new(HashMap::new()),
        }
    }

    fn clients(&self) -> MutexGuard<'_, HashMap<String, ClientState>> {
        self.clients.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Start a generation: bump the counter, clear old posts, mark loading.
    pub fn begin(&self, client: &str) -> u64 {
        let mut map = self.clients();
        let state = map.entry(client.to_string()).or_insert_with(ClientState::new);
        state.snapshot.generation += 1;
        state.snapshot.loading = true;
        state.snapshot.posts.clear();
        state.touched = Instant::now();
        state.snapshot.generation
    }

    pub fn is_current(&self, client: &str, ticket: u64) -> bool {
        self.clients()
            .get(client)
            .map(|s| s.snapshot.generation == ticket)
            .unwrap_or(false)
    }

    /// Store results for `ticket`. Returns false, leaving state untouched,
    /// when a newer generation has started since.
    pub fn complete(&self, client: &str, ticket: u64, posts: Vec<GeneratedPost>) -> bool {
        let mut map = self.clients();
        match map.get_mut(client) {
            Some(state) if state.snapshot.generation == ticket => {
                state.snapshot.posts = posts;
                state.snapshot.loading = false;
                state.touched = Instant::now();
                true
            }
            _ => false,
        }
    }

    /// Finish `ticket` without posts. Stale tickets are ignored.
    pub fn fail(&self, client: &str, ticket: u64) -> bool {
        self.complete(client, ticket, Vec::new())
    }

    pub fn snapshot(&self, client: &str) -> SessionSnapshot {
        self.clients()
            .get(client)
            .map(|s| s.snapshot.clone())
            .unwrap_or_default()
    }

    /// Forget clients idle for longer than `max_age`.
    pub fn cleanup(&self, max_age: Duration) -> usize {
        let mut map = self.clients();
        let before = map.len();
        map.retain(|_, s| s.touched.elapsed() < max_age);
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.clients().len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
