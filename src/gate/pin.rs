//! PIN gate state machine with attempt counting and timed lockout.
//!
//! The gate transitions between these states:
//! - `Challenging` → `Unlocked` (correct PIN)
//! - `Challenging` → `LockedOut` (attempts exhausted)
//! - `LockedOut` → `Challenging` (countdown reaches zero, attempts restored)
//!
//! `Unlocked` is terminal for the session; there is no re-lock.
//!
//! The machine is fully synchronous: time is injected by calling [`PinGate::tick`]
//! once per simulated second, so tests never wait on the wall clock. The tokio
//! countdown task lives in [`super::ticker`].
//!
//! The PIN is compared as a plaintext string. This is a deliberate fidelity
//! choice, not an oversight: the gate is a brute-force delay for a local
//! single-user tool, not cryptographic protection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::VaultConfig;

/// Current state of the PIN gate.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum GateStatus {
    /// Accepting PIN attempts.
    #[default]
    Challenging,
    /// Attempts exhausted; waiting out the countdown.
    LockedOut,
    /// The caller is through; vault operations are permitted.
    Unlocked,
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Challenging => write!(f, "Challenging"),
            Self::LockedOut => write!(f, "LockedOut"),
            Self::Unlocked => write!(f, "Unlocked"),
        }
    }
}

/// What a call to [`PinGate::submit`] did.
///
/// `WrongPin` and `LockedOut` also mean the host should clear its PIN
/// input field, matching the original entry form behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct PIN; the gate is now open for the rest of the session.
    Unlocked,
    /// Wrong PIN with attempts still left.
    WrongPin { tries_left: u8 },
    /// Wrong PIN and that was the last attempt; countdown started.
    LockedOut { seconds: u32 },
    /// The gate was not in `Challenging`; the attempt was ignored.
    Ignored,
}

pub struct PinGate {
    pin: String,
    max_attempts: u8,
    lockout_secs: u32,
    attempts_remaining: u8,
    lockout_remaining: u32,
    status: GateStatus,
}

impl PinGate {
    /// Create a gate guarding the given PIN.
    ///
    /// The PIN is a constructor parameter rather than a module constant so
    /// hosts and tests can run gates with distinct PINs.
    pub fn new(pin: impl Into<String>, max_attempts: u8, lockout_secs: u32) -> Self {
        Self {
            pin: pin.into(),
            max_attempts,
            lockout_secs,
            attempts_remaining: max_attempts,
            lockout_remaining: 0,
            status: GateStatus::Challenging,
        }
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self::new(config.pin.clone(), config.max_attempts, config.lockout_secs)
    }

    pub fn status(&self) -> GateStatus {
        self.status
    }

    pub fn is_unlocked(&self) -> bool {
        self.status == GateStatus::Unlocked
    }

    /// Attempts left in the current challenge round. Only meaningful while
    /// the gate is `Challenging`.
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    /// Seconds left on the lockout countdown; 0 means not locked out.
    pub fn lockout_remaining_secs(&self) -> u32 {
        self.lockout_remaining
    }

    /// Submit a PIN candidate.
    ///
    /// Only acts while `Challenging`. While `LockedOut` (or already
    /// `Unlocked`) the attempt is ignored, not an error.
    pub fn submit(&mut self, candidate: &str) -> SubmitOutcome {
        match self.status {
            GateStatus::LockedOut | GateStatus::Unlocked => {
                debug!(status = %self.status, "PIN submit ignored");
                SubmitOutcome::Ignored
            }
            GateStatus::Challenging => {
                if candidate == self.pin {
                    self.status = GateStatus::Unlocked;
                    self.attempts_remaining = self.max_attempts;
                    info!("PIN accepted, gate unlocked");
                    SubmitOutcome::Unlocked
                } else {
                    self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
                    if self.attempts_remaining == 0 {
                        self.status = GateStatus::LockedOut;
                        self.lockout_remaining = self.lockout_secs;
                        warn!(
                            lockout_secs = self.lockout_secs,
                            "PIN attempts exhausted, gate locked out"
                        );
                        SubmitOutcome::LockedOut {
                            seconds: self.lockout_remaining,
                        }
                    } else {
                        debug!(tries_left = self.attempts_remaining, "wrong PIN");
                        SubmitOutcome::WrongPin {
                            tries_left: self.attempts_remaining,
                        }
                    }
                }
            }
        }
    }

    /// Advance the lockout countdown by one second.
    ///
    /// Only meaningful while `LockedOut`; elsewhere it is a no-op. When the
    /// countdown reaches zero the gate returns to `Challenging` with the
    /// attempt budget fully restored, no user action required.
    pub fn tick(&mut self) {
        if self.status != GateStatus::LockedOut {
            return;
        }

        self.lockout_remaining = self.lockout_remaining.saturating_sub(1);
        if self.lockout_remaining == 0 {
            self.status = GateStatus::Challenging;
            self.attempts_remaining = self.max_attempts;
            info!("lockout expired, gate challengeable again");
        }
    }
}

impl std::fmt::Debug for PinGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never log the PIN itself
        f.debug_struct("PinGate")
            .field("pin", &"[REDACTED]")
            .field("status", &self.status)
            .field("attempts_remaining", &self.attempts_remaining)
            .field("lockout_remaining", &self.lockout_remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> PinGate {
        PinGate::new("627426", 3, 30)
    }

    #[test]
    fn correct_pin_unlocks() {
        let mut gate = gate();
        assert_eq!(gate.submit("627426"), SubmitOutcome::Unlocked);
        assert_eq!(gate.status(), GateStatus::Unlocked);
        assert_eq!(gate.attempts_remaining(), 3);
    }

    #[test]
    fn wrong_pin_decrements_attempts() {
        let mut gate = gate();
        assert_eq!(gate.submit("000000"), SubmitOutcome::WrongPin { tries_left: 2 });
        assert_eq!(gate.submit("111111"), SubmitOutcome::WrongPin { tries_left: 1 });
        assert_eq!(gate.status(), GateStatus::Challenging);
    }

    #[test]
    fn third_wrong_pin_locks_out_for_30s() {
        let mut gate = gate();
        gate.submit("0");
        gate.submit("1");
        assert_eq!(gate.submit("2"), SubmitOutcome::LockedOut { seconds: 30 });
        assert_eq!(gate.status(), GateStatus::LockedOut);
        assert_eq!(gate.lockout_remaining_secs(), 30);
    }

    #[test]
    fn correct_pin_unlocks_after_wrong_attempts() {
        for wrong in 1..=2 {
            let mut gate = gate();
            for _ in 0..wrong {
                gate.submit("000000");
            }
            assert_eq!(gate.submit("627426"), SubmitOutcome::Unlocked);
            assert_eq!(gate.status(), GateStatus::Unlocked);
        }
    }

    #[test]
    fn submit_while_locked_out_is_ignored_even_with_correct_pin() {
        let mut gate = gate();
        gate.submit("0");
        gate.submit("1");
        gate.submit("2");

        assert_eq!(gate.submit("627426"), SubmitOutcome::Ignored);
        assert_eq!(gate.status(), GateStatus::LockedOut);
        assert_eq!(gate.lockout_remaining_secs(), 30);
    }

    #[test]
    fn lockout_expires_after_30_ticks_with_attempts_restored() {
        let mut gate = gate();
        gate.submit("0");
        gate.submit("1");
        gate.submit("2");

        for _ in 0..29 {
            gate.tick();
            assert_eq!(gate.status(), GateStatus::LockedOut);
        }
        gate.tick();
        assert_eq!(gate.status(), GateStatus::Challenging);
        assert_eq!(gate.attempts_remaining(), 3);
        assert_eq!(gate.lockout_remaining_secs(), 0);
    }

    #[test]
    fn unlocked_is_sticky() {
        let mut gate = gate();
        gate.submit("627426");
        assert_eq!(gate.submit("000000"), SubmitOutcome::Ignored);
        assert_eq!(gate.status(), GateStatus::Unlocked);
    }

    #[test]
    fn tick_outside_lockout_is_noop() {
        let mut gate = gate();
        gate.tick();
        assert_eq!(gate.status(), GateStatus::Challenging);
        assert_eq!(gate.attempts_remaining(), 3);
    }

    #[test]
    fn gate_honors_custom_pin() {
        let mut gate = PinGate::new("0000", 3, 30);
        assert_eq!(gate.submit("627426"), SubmitOutcome::WrongPin { tries_left: 2 });
        assert_eq!(gate.submit("0000"), SubmitOutcome::Unlocked);
    }

    #[test]
    fn debug_never_reveals_pin() {
        let gate = gate();
        let rendered = format!("{:?}", gate);
        assert!(!rendered.contains("627426"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
