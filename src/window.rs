// =============================================================================
// CandleWindow -- thread-safe rolling sample window per symbol
// =============================================================================
//
// The evaluator reads a short, time-ordered window of recent candles. This
// module owns that window: a ring buffer per symbol, trimmed to
// `max_samples`, safe to feed from one thread while other threads evaluate.
// The evaluator itself never sees the lock; it works on an owned snapshot.
// =============================================================================

use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;

use crate::types::Candle;

/// Thread-safe ring buffer that stores the most recent candles per symbol.
pub struct CandleWindow {
    buffers: RwLock<HashMap<String, VecDeque<Candle>>>,
    max_samples: usize,
}

impl CandleWindow {
    /// Create a window that retains at most `max_samples` candles per symbol.
    pub fn new(max_samples: usize) -> Self {
        Self {
            buffers: RwLock::new(HashMap::new()),
            max_samples,
        }
    }

    /// Append a candle for `symbol`, trimming the oldest entries to stay
    /// within the sample budget.
    pub fn push(&self, symbol: impl Into<String>, candle: Candle) {
        let mut map = self.buffers.write();
        let ring = map
            .entry(symbol.into())
            .or_insert_with(|| VecDeque::with_capacity(self.max_samples + 1));

        ring.push_back(candle);
        while ring.len() > self.max_samples {
            ring.pop_front();
        }
    }

    /// Owned, oldest-first copy of the current window for `symbol`.
    /// An unknown symbol yields an empty vec.
    pub fn snapshot(&self, symbol: &str) -> Vec<Candle> {
        let map = self.buffers.read();
        map.get(symbol)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of candles currently held for `symbol`.
    pub fn len(&self, symbol: &str) -> usize {
        let map = self.buffers.read();
        map.get(symbol).map_or(0, VecDeque::len)
    }

    /// True when no candles are held for `symbol`.
    pub fn is_empty(&self, symbol: &str) -> bool {
        self.len(symbol) == 0
    }

    /// Close price of the most recent candle for `symbol`, if any.
    pub fn last_close(&self, symbol: &str) -> Option<f64> {
        let map = self.buffers.read();
        map.get(symbol).and_then(|ring| ring.back().map(|c| c.close))
    }
}
