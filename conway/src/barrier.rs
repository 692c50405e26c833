// barrier.rs - Reusable rendezvous that can be torn down
//
// Works like std::sync::Barrier, except `abort` wakes every waiter and makes
// every later `wait` fail. A worker that dies mid-round aborts the barriers
// so the rest stop waiting for it.

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Returned by `wait` once the barrier has been aborted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("round aborted: a worker stopped before reaching the barrier")]
pub struct Aborted;

#[derive(Debug)]
struct State {
    arrived: usize,
    generation: u64,
    aborted: bool,
}

#[derive(Debug)]
pub struct RoundBarrier {
    parties: usize,
    state: Mutex<State>,
    released: Condvar,
}

impl RoundBarrier {
    pub fn new(parties: usize) -> Self {
        Self {
            parties: parties.max(1),
            state: Mutex::new(State { arrived: 0, generation: 0, aborted: false }),
            released: Condvar::new(),
        }
    }

    /// Block until all parties have arrived, or the barrier is aborted.
    pub fn wait(&self) -> Result<(), Aborted> {
        let mut state = self.state.lock();
        if state.aborted {
            return Err(Aborted);
        }

        let generation = state.generation;
        state.arrived += 1;
        if state.arrived == self.parties {
            state.arrived = 0;
            state.generation = state.generation.wrapping_add(1);
            self.released.notify_all();
            return Ok(());
        }

        while state.generation == generation && !state.aborted {
            self.released.wait(&mut state);
        }
        // Released before the abort landed: this round completed
        if state.generation != generation { Ok(()) } else { Err(Aborted) }
    }

    pub fn abort(&self) {
        let mut state = self.state.lock();
        state.aborted = true;
        self.released.notify_all();
    }
}
