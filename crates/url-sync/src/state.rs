//! State container: the glue between the pure codec and a host's URL.
//!
//! [`UrlState`] owns the parsed value tree and a [`UrlBackend`] that reads
//! and writes the actual query string (a browser history shim, a test
//! buffer, anything). Mutations go through [`UrlState::set`], which gates
//! the path against the schema, fires the registered on-change hook, and
//! re-serializes into the backend. Writes may be coalesced by a debounce
//! window; the container is synchronous, so an expired window is committed
//! by [`UrlState::poll`] or forced by [`UrlState::flush`].

use std::time::{Duration, Instant};

use crate::codec::{parse_query, serialize_query};
use crate::params::FlatParams;
use crate::schema::{is_valid_path, validate_schema, Schema, SchemaError};
use crate::value::QueryValue;
use url_sync_path::parse_path;

/// Reads and writes the host's current query string.
pub trait UrlBackend {
    /// Returns the current query string, with or without a leading `?`.
    fn read(&self) -> String;
    /// Commits a new query string (never prefixed with `?`).
    fn write(&mut self, query: &str);
}

/// An in-memory backend. Stands in for a browser in tests and servers.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    query: String,
}

impl MemoryBackend {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl UrlBackend for MemoryBackend {
    fn read(&self) -> String {
        self.query.clone()
    }

    fn write(&mut self, query: &str) {
        self.query = query.to_string();
    }
}

/// Write-coalescing policy. `Off` writes through synchronously on every
/// mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Debounce {
    #[default]
    Off,
    Wait(Duration),
}

struct PendingWrite {
    query: String,
    deadline: Instant,
}

type ChangeHook = Box<dyn FnMut(&QueryValue)>;

/// A live, schema-typed view of a URL's query string.
pub struct UrlState<B: UrlBackend> {
    schema: Schema,
    defaults: Option<QueryValue>,
    value: QueryValue,
    backend: B,
    debounce: Debounce,
    on_change: Option<ChangeHook>,
    pending: Option<PendingWrite>,
}

impl<B: UrlBackend> UrlState<B> {
    /// Validates the schema, reads the backend's current query string and
    /// parses it into the initial value tree.
    pub fn new(
        schema: Schema,
        defaults: Option<QueryValue>,
        backend: B,
        debounce: Debounce,
    ) -> Result<Self, SchemaError> {
        validate_schema(&schema)?;
        let params = FlatParams::from_query(&backend.read());
        let value = parse_query(&params, &schema, defaults.as_ref());
        Ok(Self {
            schema,
            defaults,
            value,
            backend,
            debounce,
            on_change: None,
            pending: None,
        })
    }

    /// Registers the hook invoked after every accepted mutation and after
    /// every reload. Replaces any previous hook.
    pub fn on_change(&mut self, hook: impl FnMut(&QueryValue) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    pub fn value(&self) -> &QueryValue {
        &self.value
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads a value by dotted path.
    pub fn get(&self, path: &str) -> Option<&QueryValue> {
        let segments = parse_path(path).ok()?;
        self.value.get_path(&segments)
    }

    /// Mutates the value at `path` and schedules a URL write.
    ///
    /// Paths that do not resolve against the schema are rejected, so stray
    /// writes can never mint query keys the parser would ignore. The new
    /// value itself is not validated here; a leaf the schema disagrees
    /// with simply drops out at serialization time.
    pub fn set(&mut self, path: &str, value: impl Into<QueryValue>) -> bool {
        if !is_valid_path(path, &self.schema) {
            return false;
        }
        let Ok(segments) = parse_path(path) else {
            return false;
        };
        if !self.value.set_path(&segments, value.into()) {
            return false;
        }
        self.notify();
        self.schedule_write();
        true
    }

    /// Re-reads the backend and re-parses, discarding local state. Fires
    /// the on-change hook but does not write back.
    pub fn reload(&mut self) {
        self.pending = None;
        let params = FlatParams::from_query(&self.backend.read());
        self.value = parse_query(&params, &self.schema, self.defaults.as_ref());
        self.notify();
    }

    /// Commits a pending debounced write whose window has elapsed.
    pub fn poll(&mut self) {
        if self
            .pending
            .as_ref()
            .is_some_and(|p| Instant::now() >= p.deadline)
        {
            self.commit_pending();
        }
    }

    /// Commits any pending write immediately.
    pub fn flush(&mut self) {
        self.commit_pending();
    }

    /// Whether a debounced write is still waiting for its window.
    pub fn has_pending_write(&self) -> bool {
        self.pending.is_some()
    }

    fn notify(&mut self) {
        if let Some(hook) = &mut self.on_change {
            hook(&self.value);
        }
    }

    fn schedule_write(&mut self) {
        let query = serialize_query(&self.value, &self.schema).to_query();
        match self.debounce {
            Debounce::Off => {
                self.pending = None;
                self.backend.write(&query);
            }
            // A newer mutation replaces the pending write and restarts the
            // window; only the most recent serialization survives.
            Debounce::Wait(window) => {
                self.pending = Some(PendingWrite {
                    query,
                    deadline: Instant::now() + window,
                });
            }
        }
    }

    fn commit_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.backend.write(&pending.query);
        }
    }
}
