use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use histfetch_core::connector::{BarsProvider, HistoricalConnector, QuotesProvider, TradesProvider};
use histfetch_core::{Bar, DataKind, DateRange, FetchError, Granularity, Quote, Trade};

/// Instruction for how a method should behave for a given symbol.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping for the duration.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(FetchError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
    /// Panic inside the provider call.
    Panic,
}

/// One provider call as observed by the dynamic mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    /// Kind of records requested.
    pub kind: DataKind,
    /// Requested symbol.
    pub symbol: String,
    /// Granularity received; only bars calls ever carry one.
    pub granularity: Option<Granularity>,
}

#[derive(Default)]
struct InternalState {
    bars_rules: HashMap<String, MockBehavior<Vec<Bar>>>,
    trades_rules: HashMap<String, MockBehavior<Vec<Trade>>>,
    quotes_rules: HashMap<String, MockBehavior<Vec<Quote>>>,
    calls: Vec<MockCall>,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    abandoned: AtomicUsize,
}

/// Tracks one provider call; a call dropped before finishing counts as abandoned.
struct CallGuard {
    counters: Arc<Counters>,
    finished: bool,
}

impl CallGuard {
    fn enter(counters: &Arc<Counters>) -> Self {
        let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.peak.fetch_max(now, Ordering::SeqCst);
        Self {
            counters: Arc::clone(counters),
            finished: false,
        }
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        if !self.finished {
            self.counters.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockController {
    /// Set the behavior for `bars` calls for a specific symbol.
    pub async fn set_bars_behavior(&self, symbol: &str, behavior: MockBehavior<Vec<Bar>>) {
        let mut guard = self.state.lock().await;
        guard.bars_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `trades` calls for a specific symbol.
    pub async fn set_trades_behavior(&self, symbol: &str, behavior: MockBehavior<Vec<Trade>>) {
        let mut guard = self.state.lock().await;
        guard.trades_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `quotes` calls for a specific symbol.
    pub async fn set_quotes_behavior(&self, symbol: &str, behavior: MockBehavior<Vec<Quote>>) {
        let mut guard = self.state.lock().await;
        guard.quotes_rules.insert(symbol.to_string(), behavior);
    }

    /// Return a copy of every call received so far, in arrival order.
    pub async fn calls(&self) -> Vec<MockCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls currently executing.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of calls that were executing at the same time.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }

    /// Number of calls dropped before they finished.
    #[must_use]
    pub fn abandoned(&self) -> usize {
        self.counters.abandoned.load(Ordering::SeqCst)
    }

    /// Clear all configured behaviors, the call log, and the counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.bars_rules.clear();
        guard.trades_rules.clear();
        guard.quotes_rules.clear();
        guard.calls.clear();
        self.counters.peak.store(0, Ordering::SeqCst);
        self.counters.abandoned.store(0, Ordering::SeqCst);
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Symbols without a configured behavior fail with `NotFound`.
pub struct DynamicMockConnector {
    name: &'static str,
    kinds: Vec<DataKind>,
    state: Arc<Mutex<InternalState>>,
    counters: Arc<Counters>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector serving every kind, and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn HistoricalConnector>, DynamicMockController) {
        Self::with_kinds(name, &DataKind::ALL)
    }

    /// Create a dynamic mock that advertises only `kinds`, and its controller.
    #[must_use]
    pub fn with_kinds(
        name: &'static str,
        kinds: &[DataKind],
    ) -> (Arc<dyn HistoricalConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let counters = Arc::new(Counters::default());
        let controller = DynamicMockController {
            state: Arc::clone(&state),
            counters: Arc::clone(&counters),
        };
        let me = Arc::new(Self {
            name,
            kinds: kinds.to_vec(),
            state,
            counters,
        });
        (me as Arc<dyn HistoricalConnector>, controller)
    }

    async fn record(&self, call: MockCall) {
        self.state.lock().await.calls.push(call);
    }

    async fn play<T: Send>(
        &self,
        kind: DataKind,
        symbol: &str,
        behavior: Option<MockBehavior<T>>,
    ) -> Result<T, FetchError> {
        let mut guard = CallGuard::enter(&self.counters);
        let out = match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Delay(d, v)) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            Some(MockBehavior::Panic) => {
                panic!("{} panicked serving {kind} for {symbol}", self.name)
            }
            None => Err(FetchError::not_found(format!("{kind} for {symbol}"))),
        };
        guard.finished = true;
        out
    }
}

impl HistoricalConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_bars_provider(&self) -> Option<&dyn BarsProvider> {
        self.kinds
            .contains(&DataKind::Bars)
            .then_some(self as &dyn BarsProvider)
    }

    fn as_trades_provider(&self) -> Option<&dyn TradesProvider> {
        self.kinds
            .contains(&DataKind::Trades)
            .then_some(self as &dyn TradesProvider)
    }

    fn as_quotes_provider(&self) -> Option<&dyn QuotesProvider> {
        self.kinds
            .contains(&DataKind::Quotes)
            .then_some(self as &dyn QuotesProvider)
    }
}

#[async_trait]
impl BarsProvider for DynamicMockConnector {
    async fn bars(
        &self,
        symbol: &str,
        _range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<Bar>, FetchError> {
        self.record(MockCall {
            kind: DataKind::Bars,
            symbol: symbol.to_string(),
            granularity: Some(granularity),
        })
        .await;
        // Snapshot the behavior without holding the lock across await points.
        let behavior = {
            let guard = self.state.lock().await;
            guard.bars_rules.get(symbol).cloned()
        };
        self.play(DataKind::Bars, symbol, behavior).await
    }
}

#[async_trait]
impl TradesProvider for DynamicMockConnector {
    async fn trades(&self, symbol: &str, _range: &DateRange) -> Result<Vec<Trade>, FetchError> {
        self.record(MockCall {
            kind: DataKind::Trades,
            symbol: symbol.to_string(),
            granularity: None,
        })
        .await;
        let behavior = {
            let guard = self.state.lock().await;
            guard.trades_rules.get(symbol).cloned()
        };
        self.play(DataKind::Trades, symbol, behavior).await
    }
}

#[async_trait]
impl QuotesProvider for DynamicMockConnector {
    async fn quotes(&self, symbol: &str, _range: &DateRange) -> Result<Vec<Quote>, FetchError> {
        self.record(MockCall {
            kind: DataKind::Quotes,
            symbol: symbol.to_string(),
            granularity: None,
        })
        .await;
        let behavior = {
            let guard = self.state.lock().await;
            guard.quotes_rules.get(symbol).cloned()
        };
        self.play(DataKind::Quotes, symbol, behavior).await
    }
}
