// Bounded history of recent observations
use super::observation::Observation;
use chrono::{DateTime, Local};
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

/// Fixed-capacity FIFO of observations, oldest first.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: VecDeque<Observation>,
    capacity: usize,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64, observed_at: DateTime<Local>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Observation::new(value, observed_at));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Observation> {
        self.entries.iter()
    }

    /// Current contents, oldest first
    pub fn snapshot(&self) -> Vec<Observation> {
        self.iter().cloned().collect()
    }

    /// Min/max/avg over the current contents, `None` when empty
    pub fn statistics(&self) -> Option<Statistics> {
        let first = self.entries.front()?.value;
        let (min, max, sum) = self.iter().fold(
            (first, first, 0.0),
            |(min, max, sum), o| (min.min(o.value), max.max(o.value), sum + o.value),
        );
        let count = self.len();

        Some(Statistics {
            min,
            max,
            avg: sum / count as f64,
            count,
        })
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
