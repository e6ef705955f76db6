//! A scripted in-memory store for driving the generated routes without PostgreSQL.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use caregrid::{Record, RecordStore, StoreError, StoreResult, Statement, TableSchema};

/// Reads answer from rules matched by SQL substring; writes are recorded and
/// succeed unless a failure is scripted.
#[derive(Default)]
pub struct ScriptedStore {
    reads: Mutex<Vec<(String, Result<Vec<Record>, String>)>>,
    write_failure: Mutex<Option<String>>,
    pub executed: Mutex<Vec<Statement>>,
    pub fetched: Mutex<Vec<Statement>>,
    pub bootstrapped: Mutex<usize>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads whose SQL contains `fragment` return `rows`.
    pub fn on_read(self, fragment: &str, rows: Vec<Record>) -> Self {
        self.reads
            .lock()
            .unwrap()
            .push((fragment.to_string(), Ok(rows)));
        self
    }

    /// Reads whose SQL contains `fragment` fail with `message`.
    pub fn fail_read(self, fragment: &str, message: &str) -> Self {
        self.reads
            .lock()
            .unwrap()
            .push((fragment.to_string(), Err(message.to_string())));
        self
    }

    pub fn fail_writes(self, message: &str) -> Self {
        *self.write_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn executed(&self) -> Vec<Statement> {
        self.executed.lock().unwrap().clone()
    }

    pub fn fetched(&self) -> Vec<Statement> {
        self.fetched.lock().unwrap().clone()
    }

    fn answer(&self, statement: &Statement) -> StoreResult<Vec<Record>> {
        self.fetched.lock().unwrap().push(statement.clone());
        let reads = self.reads.lock().unwrap();
        match reads.iter().find(|(fragment, _)| statement.sql().contains(fragment.as_str())) {
            Some((_, Ok(rows))) => Ok(rows.clone()),
            Some((_, Err(message))) => Err(failure(message)),
            None => Ok(Vec::new()),
        }
    }
}

pub fn failure(message: &str) -> StoreError {
    StoreError::Database(sqlx::Error::Protocol(message.to_string()))
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn fetch_all(&self, statement: &Statement) -> StoreResult<Vec<Record>> {
        self.answer(statement)
    }

    async fn fetch_optional(&self, statement: &Statement) -> StoreResult<Option<Record>> {
        Ok(self.answer(statement)?.into_iter().next())
    }

    async fn execute(&self, statement: &Statement) -> StoreResult<u64> {
        // Positional compilation catches unbound placeholders like the real store.
        statement.to_positional()?;
        if let Some(message) = self.write_failure.lock().unwrap().as_deref() {
            return Err(failure(message));
        }
        self.executed.lock().unwrap().push(statement.clone());
        Ok(1)
    }

    async fn ping(&self) -> StoreResult<i64> {
        Ok(1)
    }

    async fn bootstrap(&self, schemas: &[TableSchema]) -> StoreResult<()> {
        *self.bootstrapped.lock().unwrap() += schemas.len();
        Ok(())
    }

    async fn close(&self) {}
}
