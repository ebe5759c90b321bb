/// Shared load/reset lifecycle for tenant-scoped stores
///
/// Every dependent domain store follows the same protocol, captured here
/// once:
///
/// - `AsyncStatus` tracks the load cycle. At rest, `loading` and a non-null
///   `error` are mutually exclusive; a new load always clears the previous
///   error before setting `loading = true`.
/// - `ScopedState` wraps a record with its status and a monotonic generation
///   counter. A load captures a `LoadToken` before suspending; when the read
///   completes, a token from a superseded generation is discarded instead of
///   written, so a slow in-flight response from an earlier tenant can never
///   overwrite a later tenant's record.
///
/// Callers hold the state behind a `Mutex` with short critical sections that
/// are never kept across an await.

/// Loading/error status attached to every store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsyncStatus {
    /// A load is in flight
    pub loading: bool,

    /// Human-readable failure from the last settled load, if any
    pub error: Option<String>,
}

impl AsyncStatus {
    /// Idle status: not loading, no error
    pub fn idle() -> Self {
        AsyncStatus::default()
    }

    /// Marks a load as started, clearing any previous error
    pub fn begin(&mut self) {
        self.error = None;
        self.loading = true;
    }

    /// Marks the load as succeeded
    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    /// Marks the load as failed
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

/// Proof of which generation a load was started under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    generation: u64,
}

/// A tenant-scoped record plus its lifecycle bookkeeping
#[derive(Debug, Default)]
pub struct ScopedState<T> {
    /// The current record; replaced wholesale, never merged
    pub record: T,

    /// Load cycle status
    pub status: AsyncStatus,

    /// Set after the first successful load
    pub loaded: bool,

    generation: u64,
}

impl<T: Default> ScopedState<T> {
    /// Creates state in its construction-time form
    pub fn new() -> Self {
        ScopedState::default()
    }

    /// Starts a load, returning the token the completion must present
    pub fn begin_load(&mut self) -> LoadToken {
        self.status.begin();
        LoadToken {
            generation: self.generation,
        }
    }

    /// Whether a token still belongs to the current generation
    pub fn is_current(&self, token: LoadToken) -> bool {
        token.generation == self.generation
    }

    /// Completes a load successfully, replacing the record wholesale
    ///
    /// Returns `false` (writing nothing) if the token is stale.
    pub fn finish_ok(&mut self, token: LoadToken, record: T) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.record = record;
        self.loaded = true;
        self.status.succeed();
        true
    }

    /// Completes a load with a failure, keeping the previous record
    ///
    /// A record a switch already cleared stays cleared, because the switch
    /// also advanced the generation. Returns `false` if the token is stale.
    pub fn finish_err(&mut self, token: LoadToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.status.fail(message);
        true
    }

    /// Drops the record for a tenant switch
    ///
    /// Advances the generation so every in-flight load started before the
    /// switch completes as a no-op.
    pub fn clear_for_switch(&mut self) {
        self.record = T::default();
        self.loaded = false;
        self.status = AsyncStatus::idle();
        self.generation += 1;
    }

    /// Returns to the construction-time state (logout)
    pub fn reset(&mut self) {
        self.clear_for_switch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_previous_error() {
        let mut status = AsyncStatus::idle();
        status.fail("boom");
        assert_eq!(status.error.as_deref(), Some("boom"));

        status.begin();
        assert!(status.loading);
        assert_eq!(status.error, None);
    }

    #[test]
    fn test_loading_and_error_never_coexist_at_rest() {
        let mut status = AsyncStatus::idle();
        status.begin();
        status.fail("boom");
        assert!(!status.loading);
        assert!(status.error.is_some());

        status.begin();
        status.succeed();
        assert!(!status.loading);
        assert!(status.error.is_none());
    }

    #[test]
    fn test_finish_ok_replaces_record() {
        let mut state: ScopedState<Option<u32>> = ScopedState::new();
        let token = state.begin_load();

        assert!(state.finish_ok(token, Some(7)));
        assert_eq!(state.record, Some(7));
        assert!(state.loaded);
        assert!(!state.status.loading);
    }

    #[test]
    fn test_finish_err_keeps_previous_record() {
        let mut state: ScopedState<Option<u32>> = ScopedState::new();
        let token = state.begin_load();
        state.finish_ok(token, Some(7));

        let token = state.begin_load();
        assert!(state.finish_err(token, "read failed"));
        assert_eq!(state.record, Some(7));
        assert_eq!(state.status.error.as_deref(), Some("read failed"));
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut state: ScopedState<Option<u32>> = ScopedState::new();
        let stale = state.begin_load();

        // A tenant switch happens while the read is in flight.
        state.clear_for_switch();
        let fresh = state.begin_load();
        assert!(state.finish_ok(fresh, Some(2)));

        // The old read completes afterwards and must not win.
        assert!(!state.finish_ok(stale, Some(1)));
        assert_eq!(state.record, Some(2));

        // Neither may a stale failure clobber the settled status.
        assert!(!state.finish_err(stale, "late failure"));
        assert_eq!(state.status.error, None);
    }

    #[test]
    fn test_reset_restores_construction_state() {
        let mut state: ScopedState<Vec<u32>> = ScopedState::new();
        let token = state.begin_load();
        state.finish_ok(token, vec![1, 2, 3]);

        state.reset();
        assert!(state.record.is_empty());
        assert!(!state.loaded);
        assert_eq!(state.status, AsyncStatus::idle());
    }
}
