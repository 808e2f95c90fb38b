//! Lockout countdown task.
//!
//! While the gate is `LockedOut` a spawned task drives [`PinGate::tick`]
//! once per second. The task stops itself as soon as the gate leaves
//! `LockedOut`, so no timer outlives the state it counts down for.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::pin::{GateStatus, PinGate};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct LockoutTicker {
    running: Arc<RwLock<bool>>,
}

impl LockoutTicker {
    pub fn new() -> Self {
        Self {
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start ticking the gate once per second.
    ///
    /// Does nothing if the gate is not currently locked out, or if a ticker
    /// task is already running. The spawned task exits on its own when the
    /// countdown finishes (or the gate otherwise leaves `LockedOut`).
    pub async fn start(&self, gate: Arc<RwLock<PinGate>>) {
        {
            let mut running = self.running.write().await;
            if *running {
                warn!("lockout ticker already running");
                return;
            }
            if gate.read().await.status() != GateStatus::LockedOut {
                debug!("gate not locked out, ticker not started");
                return;
            }
            *running = true;
        }

        debug!("starting lockout ticker");
        let running = self.running.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(TICK_INTERVAL).await;

                // Check if we were cancelled while asleep
                if !*running.read().await {
                    debug!("lockout ticker cancelled");
                    break;
                }

                let mut gate = gate.write().await;
                if gate.status() != GateStatus::LockedOut {
                    break;
                }

                gate.tick();
                if gate.status() != GateStatus::LockedOut {
                    debug!("lockout countdown finished");
                    break;
                }
            }

            *running.write().await = false;
        });
    }

    /// Cancel the countdown task. The gate itself is left untouched.
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }
}

impl Default for LockoutTicker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked_out_gate() -> Arc<RwLock<PinGate>> {
        let mut gate = PinGate::new("627426", 3, 30);
        gate.submit("0");
        gate.submit("1");
        gate.submit("2");
        assert_eq!(gate.status(), GateStatus::LockedOut);
        Arc::new(RwLock::new(gate))
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_restores_gate_after_lockout() {
        let gate = locked_out_gate();
        let ticker = LockoutTicker::new();
        ticker.start(gate.clone()).await;
        assert!(ticker.is_running().await);

        tokio::time::sleep(Duration::from_secs(31)).await;

        let gate = gate.read().await;
        assert_eq!(gate.status(), GateStatus::Challenging);
        assert_eq!(gate.attempts_remaining(), 3);
        assert!(!ticker.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_counts_down_one_second_at_a_time() {
        let gate = locked_out_gate();
        let ticker = LockoutTicker::new();
        ticker.start(gate.clone()).await;

        tokio::time::sleep(Duration::from_secs(10)).await;
        // Sleep wakes before the pending tick runs, so allow one second of slack.
        let remaining = gate.read().await.lockout_remaining_secs();
        assert!((20..=21).contains(&remaining), "remaining = {}", remaining);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_does_not_start_unless_locked_out() {
        let gate = Arc::new(RwLock::new(PinGate::new("627426", 3, 30)));
        let ticker = LockoutTicker::new();
        ticker.start(gate.clone()).await;
        assert!(!ticker.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_countdown() {
        let gate = locked_out_gate();
        let ticker = LockoutTicker::new();
        ticker.start(gate.clone()).await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        ticker.stop().await;
        tokio::time::sleep(Duration::from_secs(60)).await;

        // The gate stays locked out; nothing ticks it anymore.
        assert_eq!(gate.read().await.status(), GateStatus::LockedOut);
        assert!(!ticker.is_running().await);
    }
}
