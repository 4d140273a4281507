//! Environment detection
//!
//! Runs once at startup and settles whether the shell bridge is usable.
//! The result is an immutable [`Runtime`] that every component matches on.

use crate::{
    bridge::{BridgeProbe, ShellBridge, Timer},
    config::DetectionPolicy,
};
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Execution mode negotiated at startup
#[derive(Clone)]
pub enum Runtime {
    /// Running inside the desktop shell with a responsive bridge
    NativeReady(Rc<dyn ShellBridge>),
    /// Running in a plain browser tab
    Fallback,
}

impl Runtime {
    pub fn is_native(&self) -> bool {
        matches!(self, Runtime::NativeReady(_))
    }

    pub fn bridge(&self) -> Option<&Rc<dyn ShellBridge>> {
        match self {
            Runtime::NativeReady(bridge) => Some(bridge),
            Runtime::Fallback => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Runtime::NativeReady(_) => "native",
            Runtime::Fallback => "fallback",
        }
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::NativeReady(_) => f.write_str("NativeReady"),
            Runtime::Fallback => f.write_str("Fallback"),
        }
    }
}

/// Negotiate the runtime mode.
///
/// An absent bridge resolves to [`Runtime::Fallback`] without waiting. A
/// present bridge is polled up to `policy.max_attempts` times,
/// `policy.interval()` apart; running out of attempts is a normal fallback,
/// not an error.
pub async fn detect<P>(probe: &P, timer: &dyn Timer, policy: &DetectionPolicy) -> Runtime
where
    P: BridgeProbe,
{
    if !probe.bridge_present() {
        info!("Shell bridge absent, running in browser fallback mode");
        return Runtime::Fallback;
    }

    for attempt in 1..=policy.max_attempts {
        if let Some(bridge) = probe.acquire() {
            info!(attempt, "Shell bridge ready, running in native shell mode");
            return Runtime::NativeReady(Rc::new(bridge));
        }

        debug!(attempt, "Shell bridge capability not ready yet");
        if attempt < policy.max_attempts {
            timer.sleep(policy.interval()).await;
        }
    }

    info!(
        attempts = policy.max_attempts,
        "Shell bridge never became ready, running in browser fallback mode"
    );
    Runtime::Fallback
}
