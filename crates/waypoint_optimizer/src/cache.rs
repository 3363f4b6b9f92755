use std::{collections::VecDeque, time::Duration};

use fxhash::FxHashMap;
use parking_lot::Mutex;

use crate::{problem::request::OptimizationRequest, solver::route::OptimizationResult};

/// Everything an optimization result depends on. Keys compare the whole
/// request, so two different inputs can never share an entry. Input order is
/// kept because the path always starts at the first stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    stops: Vec<CachedStop>,
    group_count: usize,
    average_speed_bits: u64,
    per_stop_minutes_bits: u64,
    max_iterations: Option<usize>,
    time_budget: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CachedStop {
    id: String,
    lat_bits: u64,
    lon_bits: u64,
    address: String,
}

impl CacheKey {
    pub fn new(request: &OptimizationRequest) -> Self {
        let config = request.config();

        Self {
            stops: request
                .stops()
                .iter()
                .map(|stop| CachedStop {
                    id: stop.id().to_owned(),
                    lat_bits: stop.coordinates().lat().to_bits(),
                    lon_bits: stop.coordinates().lon().to_bits(),
                    address: stop.address().to_owned(),
                })
                .collect(),
            group_count: request.group_count(),
            average_speed_bits: config.average_speed.value().to_bits(),
            per_stop_minutes_bits: config.per_stop_minutes.to_bits(),
            max_iterations: config.max_iterations,
            time_budget: config.time_budget,
        }
    }
}

/// Storage for recent results, shared between concurrent requests.
pub trait ResultCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<OptimizationResult>;

    fn insert(&self, key: CacheKey, result: OptimizationResult);
}

/// Keeps at most `capacity` results and evicts the oldest insertion first.
pub struct BoundedResultCache {
    capacity: usize,
    entries: Mutex<CacheEntries>,
}

#[derive(Default)]
struct CacheEntries {
    results: FxHashMap<CacheKey, OptimizationResult>,
    insertion_order: VecDeque<CacheKey>,
}

impl BoundedResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(CacheEntries::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for BoundedResultCache {
    fn get(&self, key: &CacheKey) -> Option<OptimizationResult> {
        self.entries.lock().results.get(key).cloned()
    }

    fn insert(&self, key: CacheKey, result: OptimizationResult) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.entries.lock();
        if entries.results.contains_key(&key) {
            entries.results.insert(key, result);
            return;
        }

        while entries.results.len() >= self.capacity {
            let Some(oldest) = entries.insertion_order.pop_front() else {
                break;
            };
            entries.results.remove(&oldest);
        }

        entries.insertion_order.push_back(key.clone());
        entries.results.insert(key, result);
    }
}
