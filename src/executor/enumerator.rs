//! Lazy, pull-based enumerator over decoded records.
//!
//! Nothing runs until the first `move_next`. That call opens the cursor, and
//! each call after it reads and decodes one row. The cursor is released on
//! every way out: end of data, a failed read or decode, `reset`, `dispose`,
//! or drop.

use crate::access::CursorProvider;
use crate::config::MismatchPolicy;
use crate::error::QueryResult;
use crate::executor::materializer::{self, CursorHandle};
use crate::schema::{Entity, SchemaDescriptor};
use crate::translator::Statement;
use log::{trace, warn};
use std::sync::Arc;

/// Observable lifecycle state of an enumerator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No statement executed, nothing held
    NotStarted,
    /// Cursor open; rows are being read
    Open,
    /// End of data reached; cursor already released
    Exhausted,
    /// Terminal; cursor released if one was ever opened
    Disposed,
}

enum State {
    NotStarted,
    Open(CursorHandle),
    Exhausted,
    Disposed,
}

impl State {
    fn kind(&self) -> CursorState {
        match self {
            State::NotStarted => CursorState::NotStarted,
            State::Open(_) => CursorState::Open,
            State::Exhausted => CursorState::Exhausted,
            State::Disposed => CursorState::Disposed,
        }
    }
}

/// Enumerator that streams records of type `T` out of one statement
pub struct EntityEnumerator<T: Entity> {
    provider: Arc<dyn CursorProvider>,
    statement: Statement,
    schema: Arc<SchemaDescriptor<T>>,
    mismatch_policy: MismatchPolicy,
    state: State,
    current: Option<T>,
}

impl<T: Entity> EntityEnumerator<T> {
    pub fn new(
        provider: Arc<dyn CursorProvider>,
        statement: Statement,
        mismatch_policy: MismatchPolicy,
    ) -> Self {
        Self {
            provider,
            statement,
            schema: T::schema(),
            mismatch_policy,
            state: State::NotStarted,
            current: None,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state.kind()
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// The record produced by the last successful `move_next`
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn take_current(&mut self) -> Option<T> {
        self.current.take()
    }

    /// Advance to the next record.
    ///
    /// Returns false once there are no more records; calling it again after
    /// that, or after `dispose`, keeps returning false without touching the
    /// provider. A failure disposes the enumerator before it is returned.
    pub fn move_next(&mut self) -> QueryResult<bool> {
        self.current = None;

        if let State::NotStarted = self.state {
            match materializer::open(self.provider.as_ref(), &self.statement) {
                Ok(handle) => self.transition(State::Open(handle)),
                Err(e) => {
                    self.transition(State::Disposed);
                    return Err(e);
                }
            }
        }

        loop {
            let handle = match &mut self.state {
                State::Open(handle) => handle,
                State::NotStarted | State::Exhausted | State::Disposed => return Ok(false),
            };

            let row = match handle.read() {
                Ok(Some(row)) => row,
                Ok(None) => {
                    self.transition(State::Exhausted);
                    return Ok(false);
                }
                Err(e) => {
                    self.transition(State::Disposed);
                    return Err(e);
                }
            };

            match self.schema.decode(&row) {
                Ok(record) => {
                    self.current = Some(record);
                    return Ok(true);
                }
                Err(e) => match self.mismatch_policy {
                    MismatchPolicy::Fail => {
                        self.transition(State::Disposed);
                        return Err(e);
                    }
                    MismatchPolicy::SkipRow => {
                        warn!("Skipping row from `{}`: {}", self.statement, e);
                    }
                },
            }
        }
    }

    /// Release any open cursor and start over; the next `move_next` runs the
    /// statement again. Has no effect once disposed.
    pub fn reset(&mut self) {
        if !matches!(self.state, State::Disposed) {
            self.current = None;
            self.transition(State::NotStarted);
        }
    }

    /// Release any open cursor. Safe to call from any state, any number of times.
    pub fn dispose(&mut self) {
        if !matches!(self.state, State::Disposed) {
            self.current = None;
            self.transition(State::Disposed);
        }
    }

    fn transition(&mut self, next: State) {
        let previous = std::mem::replace(&mut self.state, next);
        trace!(
            "Enumerator for `{}`: {:?} -> {:?}",
            self.statement,
            previous.kind(),
            self.state.kind()
        );
        if let State::Open(mut handle) = previous {
            handle.close();
        }
    }
}

impl<T: Entity> Iterator for EntityEnumerator<T> {
    type Item = QueryResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.move_next() {
            Ok(true) => self.current.take().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<T: Entity> Drop for EntityEnumerator<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{MemoryProvider, Row, Value};
    use crate::error::QueryError;

    const STATEMENT: &str = "SELECT * FROM Customers";

    #[derive(Debug, Default, PartialEq)]
    struct Customer {
        id: i32,
        name: String,
        age: i32,
    }

    crate::impl_entity!(Customer { id => "ID", name => "NAME", age => "AGE" });

    fn customer(id: i32, name: &str, age: i32) -> Row {
        Row::new().with("ID", id).with("NAME", name).with("AGE", age)
    }

    fn enumerator(
        provider: &Arc<MemoryProvider>,
        policy: MismatchPolicy,
    ) -> EntityEnumerator<Customer> {
        EntityEnumerator::new(provider.clone(), Statement::new(STATEMENT), policy)
    }

    #[test]
    fn test_nothing_runs_before_first_pull() {
        let provider = Arc::new(MemoryProvider::new().respond(STATEMENT, vec![]));
        let e = enumerator(&provider, MismatchPolicy::Fail);
        assert_eq!(e.state(), CursorState::NotStarted);
        assert_eq!(provider.stats().opened, 0);
    }

    #[test]
    fn test_streams_rows_then_exhausts() -> QueryResult<()> {
        let provider = Arc::new(MemoryProvider::new().respond(
            STATEMENT,
            vec![customer(1, "code6421", 30), customer(2, "alice", 25)],
        ));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(e.move_next()?);
        assert_eq!(e.state(), CursorState::Open);
        assert_eq!(e.current().map(|c| c.name.as_str()), Some("code6421"));
        assert_eq!(provider.stats().rows_read, 1);

        assert!(e.move_next()?);
        assert_eq!(e.current().map(|c| c.id), Some(2));

        assert!(!e.move_next()?);
        assert_eq!(e.state(), CursorState::Exhausted);
        assert!(e.current().is_none());
        assert_eq!(provider.stats().open_cursors(), 0);

        assert!(!e.move_next()?);
        assert_eq!(provider.stats().opened, 1);
        Ok(())
    }

    #[test]
    fn test_zero_rows() -> QueryResult<()> {
        let provider = Arc::new(MemoryProvider::new().respond(STATEMENT, vec![]));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(!e.move_next()?);
        assert_eq!(e.state(), CursorState::Exhausted);
        assert_eq!(provider.stats().opened, 1);
        assert_eq!(provider.stats().closed, 1);

        e.dispose();
        assert_eq!(e.state(), CursorState::Disposed);
        assert_eq!(provider.stats().closed, 1);
        Ok(())
    }

    #[test]
    fn test_null_column_decodes_to_default() -> QueryResult<()> {
        let provider = Arc::new(MemoryProvider::new().respond(
            STATEMENT,
            vec![Row::new()
                .with("ID", 6)
                .with("NAME", Value::Null)
                .with("AGE", 41)],
        ));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(e.move_next()?);
        assert_eq!(
            e.take_current(),
            Some(Customer {
                id: 6,
                name: String::new(),
                age: 41,
            })
        );
        Ok(())
    }

    #[test]
    fn test_dispose_is_idempotent() -> QueryResult<()> {
        let provider =
            Arc::new(MemoryProvider::new().respond(STATEMENT, vec![customer(1, "a", 1)]));

        let mut untouched = enumerator(&provider, MismatchPolicy::Fail);
        untouched.dispose();
        untouched.dispose();
        assert_eq!(untouched.state(), CursorState::Disposed);
        assert!(!untouched.move_next()?);
        assert_eq!(provider.stats().opened, 0);

        let mut open = enumerator(&provider, MismatchPolicy::Fail);
        assert!(open.move_next()?);
        open.dispose();
        open.dispose();
        assert!(open.current().is_none());
        assert!(!open.move_next()?);

        let stats = provider.stats();
        assert_eq!(stats.opened, 1);
        assert_eq!(stats.closed, 1);
        Ok(())
    }

    #[test]
    fn test_drop_releases_cursor() -> QueryResult<()> {
        let provider =
            Arc::new(MemoryProvider::new().respond(STATEMENT, vec![customer(1, "a", 1)]));
        {
            let mut e = enumerator(&provider, MismatchPolicy::Fail);
            assert!(e.move_next()?);
            assert_eq!(provider.stats().open_cursors(), 1);
        }
        assert_eq!(provider.stats().open_cursors(), 0);
        Ok(())
    }

    #[test]
    fn test_open_failure_disposes() {
        let provider = Arc::new(MemoryProvider::new().fail_open(STATEMENT, "login failed"));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(matches!(
            e.move_next(),
            Err(QueryError::ExecutionFailed { .. })
        ));
        assert_eq!(e.state(), CursorState::Disposed);
        assert!(matches!(e.move_next(), Ok(false)));
    }

    #[test]
    fn test_read_failure_releases_before_returning() -> QueryResult<()> {
        let provider = Arc::new(MemoryProvider::new().respond_then_fail(
            STATEMENT,
            vec![customer(1, "a", 1)],
            "connection reset",
        ));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(e.move_next()?);
        match e.move_next() {
            Err(QueryError::ExecutionFailed { source, .. }) => {
                assert_eq!(source.to_string(), "connection reset")
            }
            other => panic!("expected execution failure, got {:?}", other),
        }
        assert_eq!(e.state(), CursorState::Disposed);
        assert_eq!(provider.stats().open_cursors(), 0);
        Ok(())
    }

    #[test]
    fn test_mismatch_fails_strictly_by_default() {
        let provider = Arc::new(MemoryProvider::new().respond(
            STATEMENT,
            vec![
                Row::new().with("ID", "not a number"),
                customer(2, "b", 2),
            ],
        ));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(matches!(
            e.move_next(),
            Err(QueryError::SchemaMismatch { ref column, .. }) if column == "ID"
        ));
        assert_eq!(e.state(), CursorState::Disposed);
        assert_eq!(provider.stats().open_cursors(), 0);
    }

    #[test]
    fn test_mismatch_skip_row_policy() -> QueryResult<()> {
        let provider = Arc::new(MemoryProvider::new().respond(
            STATEMENT,
            vec![
                Row::new().with("ID", "not a number"),
                customer(2, "b", 2),
            ],
        ));
        let records: Vec<Customer> =
            enumerator(&provider, MismatchPolicy::SkipRow).collect::<QueryResult<_>>()?;

        assert_eq!(records, vec![Customer { id: 2, name: "b".to_string(), age: 2 }]);
        assert_eq!(provider.stats().rows_read, 2);
        Ok(())
    }

    #[test]
    fn test_reset_reruns_statement() -> QueryResult<()> {
        let provider = Arc::new(MemoryProvider::new().respond(
            STATEMENT,
            vec![customer(1, "a", 1), customer(2, "b", 2)],
        ));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(e.move_next()?);
        e.reset();
        assert_eq!(e.state(), CursorState::NotStarted);
        assert_eq!(provider.stats().open_cursors(), 0);

        assert!(e.move_next()?);
        assert_eq!(e.current().map(|c| c.id), Some(1));
        assert_eq!(provider.stats().opened, 2);

        e.dispose();
        e.reset();
        assert_eq!(e.state(), CursorState::Disposed);
        Ok(())
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let provider = Arc::new(MemoryProvider::new().respond_then_fail(
            STATEMENT,
            vec![customer(1, "a", 1)],
            "timeout",
        ));
        let mut e = enumerator(&provider, MismatchPolicy::Fail);

        assert!(matches!(e.next(), Some(Ok(Customer { id: 1, .. }))));
        assert!(matches!(e.next(), Some(Err(QueryError::ExecutionFailed { .. }))));
        assert!(e.next().is_none());
    }
}
