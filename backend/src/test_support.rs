//! Shared test doubles for unit tests in this crate.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{DirectorySourceError, EmployeeDirectorySource};
use crate::domain::{
    CreateEmployeeRequest, Employee, EmployeeId, RequestContext, RetrySleeper, TraceId,
};

/// Fixed instant used as "now" across tests.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid time")
}

/// Build an employee with a random id.
pub fn employee(name: Option<&str>, salary: Option<u32>) -> Employee {
    Employee::new(
        EmployeeId::random(),
        name.map(str::to_owned),
        salary,
        Some(30),
        "Engineer".to_owned(),
        "staff@example.com".to_owned(),
    )
}

/// Clock whose time only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => panic!("failed to convert Duration to TimeDelta: {error}"),
        };
        *self.lock_clock() += delta;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl RetrySleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Sleeper that returns at once and remembers every requested wait.
#[derive(Default)]
pub struct RecordingSleeper(pub Mutex<Vec<Duration>>);

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.0.lock().expect("sleeper mutex").clone()
    }
}

#[async_trait]
impl RetrySleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.0.lock().expect("sleeper mutex").push(duration);
    }
}

type Script<T> = Mutex<VecDeque<Result<T, DirectorySourceError>>>;

/// Directory source replaying scripted results in order.
///
/// Once a script runs dry the source reports a transport failure.
#[derive(Default)]
pub struct ScriptedSource {
    lists: Script<Vec<Employee>>,
    creates: Script<Employee>,
    deletes: Script<bool>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub deleted_names: Mutex<Vec<String>>,
    pub seen_traces: Mutex<Vec<TraceId>>,
}

impl ScriptedSource {
    pub fn with_lists(self, lists: Vec<Result<Vec<Employee>, DirectorySourceError>>) -> Self {
        *self.lists.lock().expect("script mutex") = lists.into();
        self
    }

    pub fn with_creates(self, creates: Vec<Result<Employee, DirectorySourceError>>) -> Self {
        *self.creates.lock().expect("script mutex") = creates.into();
        self
    }

    pub fn with_deletes(self, deletes: Vec<Result<bool, DirectorySourceError>>) -> Self {
        *self.deletes.lock().expect("script mutex") = deletes.into();
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    fn next<T>(
        &self,
        script: &Script<T>,
        counter: &AtomicUsize,
        ctx: &RequestContext,
    ) -> Result<T, DirectorySourceError> {
        counter.fetch_add(1, Ordering::SeqCst);
        self.seen_traces
            .lock()
            .expect("trace mutex")
            .push(ctx.trace_id());
        script
            .lock()
            .expect("script mutex")
            .pop_front()
            .unwrap_or_else(|| Err(DirectorySourceError::transport("script exhausted")))
    }
}

#[async_trait]
impl EmployeeDirectorySource for ScriptedSource {
    async fn list_employees(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Employee>, DirectorySourceError> {
        self.next(&self.lists, &self.list_calls, ctx)
    }

    async fn create_employee(
        &self,
        ctx: &RequestContext,
        _request: &CreateEmployeeRequest,
    ) -> Result<Employee, DirectorySourceError> {
        self.next(&self.creates, &self.create_calls, ctx)
    }

    async fn delete_employee_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<bool, DirectorySourceError> {
        self.deleted_names
            .lock()
            .expect("names mutex")
            .push(name.to_owned());
        self.next(&self.deletes, &self.delete_calls, ctx)
    }
}
