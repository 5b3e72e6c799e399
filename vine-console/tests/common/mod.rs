//! In-memory scheduler service for console tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use vine_client::{ClientError, Result, SchedulerApi};
use vine_console::{Notice, Notifier, SchedulerController};
use vine_core::domain::execution::{ExecutionId, ExecutionStatus, JobExecution};
use vine_core::domain::history::{HistoryFilter, HistoryPage};
use vine_core::domain::scheduler::SchedulerStatus;
use vine_core::dto::scheduler::SchedulerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Status,
    Start,
    Stop,
    UpdateConfig,
    RunNow,
    History,
    Latest,
}

type StatusGate = oneshot::Receiver<Result<SchedulerStatus>>;
type HistoryGate = oneshot::Receiver<Result<HistoryPage>>;

#[derive(Default)]
struct ServerState {
    status: Option<SchedulerStatus>,
    executions: Vec<JobExecution>,
    calls: HashMap<Endpoint, usize>,
    failing: HashSet<Endpoint>,
    stalled: HashSet<Endpoint>,
    status_gates: VecDeque<StatusGate>,
    history_gates: VecDeque<HistoryGate>,
    start_intervals: Vec<u32>,
    configs: Vec<SchedulerConfig>,
    history_filters: Vec<HistoryFilter>,
}

/// Scheduler service double
///
/// Behaves like the real service unless a response is held back with one of
/// the `hold_*` gates, or an endpoint is told to fail or stall once.
#[derive(Default)]
pub struct FakeScheduler {
    state: Mutex<ServerState>,
}

impl FakeScheduler {
    pub fn new(status: SchedulerStatus) -> Arc<Self> {
        let fake = Self::default();
        fake.lock().status = Some(status);
        Arc::new(fake)
    }

    pub fn stopped() -> Arc<Self> {
        Self::new(SchedulerStatus::new(false, 30))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ServerState> {
        self.state.lock().unwrap()
    }

    /// Next status read waits for the returned sender
    pub fn hold_status(&self) -> oneshot::Sender<Result<SchedulerStatus>> {
        let (tx, rx) = oneshot::channel();
        self.lock().status_gates.push_back(rx);
        tx
    }

    /// Next history read waits for the returned sender
    pub fn hold_history(&self) -> oneshot::Sender<Result<HistoryPage>> {
        let (tx, rx) = oneshot::channel();
        self.lock().history_gates.push_back(rx);
        tx
    }

    /// Next call to `endpoint` answers with a 500
    pub fn fail_next(&self, endpoint: Endpoint) {
        self.lock().failing.insert(endpoint);
    }

    /// Next call to `endpoint` never answers
    pub fn stall_next(&self, endpoint: Endpoint) {
        self.lock().stalled.insert(endpoint);
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.lock().calls.get(&endpoint).copied().unwrap_or(0)
    }

    pub fn status(&self) -> SchedulerStatus {
        self.lock().status.clone().unwrap()
    }

    pub fn start_intervals(&self) -> Vec<u32> {
        self.lock().start_intervals.clone()
    }

    pub fn configs(&self) -> Vec<SchedulerConfig> {
        self.lock().configs.clone()
    }

    pub fn history_filters(&self) -> Vec<HistoryFilter> {
        self.lock().history_filters.clone()
    }

    pub fn set_executions(&self, executions: Vec<JobExecution>) {
        self.lock().executions = executions;
    }

    /// Counts the call and consumes a pending failure or stall for `endpoint`
    async fn enter(&self, endpoint: Endpoint) -> Result<()> {
        let stalled = {
            let mut state = self.lock();
            *state.calls.entry(endpoint).or_default() += 1;
            if state.failing.remove(&endpoint) {
                return Err(ClientError::api_error(500, "boom"));
            }
            state.stalled.remove(&endpoint)
        };

        if stalled {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    fn page(&self, filter: &HistoryFilter) -> HistoryPage {
        let state = self.lock();
        let cutoff = filter.days_window.map(|days| Utc::now() - Duration::days(days));

        let mut matching: Vec<JobExecution> = state
            .executions
            .iter()
            .filter(|e| cutoff.is_none_or(|c| e.start_time >= c))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        let total = matching.len() as u64;
        let size = filter.page_size as usize;
        let items = matching
            .into_iter()
            .skip(filter.page as usize * size)
            .take(size)
            .collect();

        HistoryPage::new(items, filter.page as u32, filter.page_size as u32, total)
    }
}

fn gone<T>(_: oneshot::error::RecvError) -> Result<T> {
    Err(ClientError::api_error(503, "gate dropped"))
}

#[async_trait]
impl SchedulerApi for FakeScheduler {
    async fn get_status(&self) -> Result<SchedulerStatus> {
        let gate = {
            let mut state = self.lock();
            *state.calls.entry(Endpoint::Status).or_default() += 1;
            state.status_gates.pop_front()
        };

        if let Some(gate) = gate {
            return gate.await.unwrap_or_else(gone);
        }

        if self.lock().failing.remove(&Endpoint::Status) {
            return Err(ClientError::api_error(500, "boom"));
        }
        Ok(self.status())
    }

    async fn start(&self, interval_minutes: u32) -> Result<SchedulerStatus> {
        self.enter(Endpoint::Start).await?;
        let mut state = self.lock();
        state.start_intervals.push(interval_minutes);

        let status = state.status.get_or_insert_with(|| SchedulerStatus::new(false, 30));
        status.running = true;
        status.interval_minutes = interval_minutes;
        status.next_run_time = Some(Utc::now() + Duration::minutes(interval_minutes as i64));
        Ok(status.clone())
    }

    async fn stop(&self) -> Result<SchedulerStatus> {
        self.enter(Endpoint::Stop).await?;
        let mut state = self.lock();

        let status = state.status.get_or_insert_with(|| SchedulerStatus::new(false, 30));
        status.running = false;
        status.next_run_time = None;
        Ok(status.clone())
    }

    async fn update_config(&self, config: &SchedulerConfig) -> Result<SchedulerStatus> {
        self.enter(Endpoint::UpdateConfig).await?;
        let mut state = self.lock();
        state.configs.push(config.clone());

        let status = state.status.get_or_insert_with(|| SchedulerStatus::new(false, 30));
        status.interval_minutes = config.interval_minutes;
        status.start_from_time = config.start_from_time.clone();
        status.enabled = Some(config.enabled);
        Ok(status.clone())
    }

    async fn run_now(&self) -> Result<String> {
        self.enter(Endpoint::RunNow).await?;
        let mut state = self.lock();

        let id = state.executions.len() + 1;
        state.executions.push(execution(id, 0));
        if let Some(status) = state.status.as_mut() {
            status.total_runs += 1;
            status.last_run_time = Some(Utc::now());
            status.last_run_status = Some(ExecutionStatus::Success);
        }
        Ok("Job triggered successfully".to_string())
    }

    async fn get_history(&self, filter: &HistoryFilter) -> Result<HistoryPage> {
        let gate = {
            let mut state = self.lock();
            *state.calls.entry(Endpoint::History).or_default() += 1;
            state.history_filters.push(*filter);
            state.history_gates.pop_front()
        };

        if let Some(gate) = gate {
            return gate.await.unwrap_or_else(gone);
        }

        if self.lock().failing.remove(&Endpoint::History) {
            return Err(ClientError::api_error(500, "boom"));
        }
        Ok(self.page(filter))
    }

    async fn get_latest_executions(&self, limit: u32) -> Result<HistoryPage> {
        self.enter(Endpoint::Latest).await?;
        Ok(self.page(&HistoryFilter::new(0, limit as i64, None)))
    }
}

/// Execution that started `days_ago` days ago and took 90 seconds
pub fn execution(id: usize, days_ago: i64) -> JobExecution {
    let start_time = Utc::now() - Duration::days(days_ago) - Duration::minutes(id as i64);
    JobExecution {
        id: ExecutionId::new(id.to_string()),
        start_time,
        end_time: Some(start_time + Duration::seconds(90)),
        status: ExecutionStatus::Success,
        records_processed: 12,
        message: Some("Imported 12 records".to_string()),
        error_message: None,
        duration_ms: Some(90_000),
    }
}

/// `recent` executions from the last few days plus `old` ones from ten days ago
pub fn executions(recent: usize, old: usize) -> Vec<JobExecution> {
    let mut all: Vec<JobExecution> = (1..=recent).map(|id| execution(id, (id % 5) as i64)).collect();
    all.extend((recent + 1..=recent + old).map(|id| execution(id, 10)));
    all
}

/// Notifier that keeps every notice
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_error())
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub fn controller(fake: &Arc<FakeScheduler>, notifier: &Arc<RecordingNotifier>) -> SchedulerController {
    SchedulerController::new(fake.clone(), notifier.clone(), HistoryFilter::default())
}

/// Yields until `endpoint` has been called `count` times
pub async fn wait_for_calls(fake: &FakeScheduler, endpoint: Endpoint, count: usize) {
    for _ in 0..1_000 {
        if fake.calls(endpoint) >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!(
        "expected {} call(s) to {:?}, saw {}",
        count,
        endpoint,
        fake.calls(endpoint)
    );
}
