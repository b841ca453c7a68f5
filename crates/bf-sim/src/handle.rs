//! Thread-safe owner of one simulation.
//!
//! Mutating operations serialize on an exclusive lock around the engine.
//! Each one republishes the latest [`Snapshot`] behind a separate `RwLock`,
//! so readers never wait for a step in progress.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use bf_core::SimConfig;
use bf_routing::RoutingStrategy;

use crate::{BikeSim, SimBuilder, SimError, SimResult, Snapshot};

pub struct SimHandle {
    engine: Mutex<BikeSim>,
    latest: RwLock<Arc<Snapshot>>,
}

impl SimHandle {
    pub fn new(sim: BikeSim) -> Self {
        let latest = RwLock::new(Arc::new(sim.snapshot()));
        Self { engine: Mutex::new(sim), latest }
    }

    /// Build a simulation from `config` and wrap it.
    pub fn initialize(config: SimConfig) -> SimResult<Self> {
        Ok(Self::new(SimBuilder::new(config).build()?))
    }

    /// The most recently published snapshot.  Never blocks on a mutation.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        match self.latest.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    pub fn step(&self, strategy: RoutingStrategy) -> SimResult<Arc<Snapshot>> {
        self.mutate(|sim| sim.step(strategy))
    }

    pub fn advance_time(&self, hours: u32) -> SimResult<Arc<Snapshot>> {
        self.mutate(|sim| sim.advance_time(hours))
    }

    pub fn set_weather(&self, condition: &str) -> SimResult<Arc<Snapshot>> {
        self.mutate(|sim| sim.set_weather(condition))
    }

    pub fn reset(&self) -> SimResult<Arc<Snapshot>> {
        self.mutate(|sim| sim.reset())
    }

    pub fn configure(&self, config: SimConfig) -> SimResult<Arc<Snapshot>> {
        self.mutate(|sim| sim.configure(config))
    }

    /// Run a full day.  The published snapshot afterwards reflects the
    /// restored clock.
    pub fn simulate_day(&self, strategy: RoutingStrategy) -> SimResult<Vec<Snapshot>> {
        let mut sim = self.lock()?;
        let result = sim.simulate_day(strategy);
        self.publish(sim.snapshot());
        result
    }

    /// Run `f` with exclusive access to the engine.  Nothing is published.
    pub fn with_engine<T>(&self, f: impl FnOnce(&mut BikeSim) -> T) -> SimResult<T> {
        let mut sim = self.lock()?;
        Ok(f(&mut *sim))
    }

    fn mutate(
        &self,
        f: impl FnOnce(&mut BikeSim) -> SimResult<Snapshot>,
    ) -> SimResult<Arc<Snapshot>> {
        let mut sim = self.lock()?;
        let snapshot = Arc::new(f(&mut *sim)?);
        self.publish_arc(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    fn lock(&self) -> SimResult<MutexGuard<'_, BikeSim>> {
        self.engine.lock().map_err(|_| SimError::Poisoned)
    }

    fn publish(&self, snapshot: Snapshot) {
        self.publish_arc(Arc::new(snapshot));
    }

    fn publish_arc(&self, snapshot: Arc<Snapshot>) {
        match self.latest.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

impl From<BikeSim> for SimHandle {
    fn from(sim: BikeSim) -> Self {
        Self::new(sim)
    }
}
