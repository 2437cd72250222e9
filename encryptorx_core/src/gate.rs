use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::CoreError;

/// Re-entrancy guard shared by every process / clear / save-dialog operation.
///
/// Only one gated operation may be active at a time. While it is active every
/// gated control reports as disabled, whatever the input fields contain.
#[derive(Debug, Clone, Default)]
pub struct InteractionGate {
    active: Arc<AtomicBool>,
}

/// Holds the gate for the lifetime of one operation; dropping it releases the
/// gate on every exit path, including `?` returns and unwinding.
#[derive(Debug)]
pub struct GateGuard {
    active: Arc<AtomicBool>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

impl InteractionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn acquire(&self) -> Result<GateGuard, CoreError> {
        self.active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| {
                tracing::warn!("Gated operation rejected: gate already active");
                CoreError::GateBusy
            })?;
        Ok(GateGuard {
            active: Arc::clone(&self.active),
        })
    }

    /// Runs `op` with the gate held. A busy gate is reported as an error of the
    /// caller's type so wrapped operations keep their own error channel.
    pub fn run<T, E>(&self, op: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<CoreError>,
    {
        let _guard = self.acquire()?;
        op()
    }

    /// Enablement rule for one gated control: disabled while the gate is
    /// active, otherwise disabled when any required field is empty.
    pub fn compute_enablement(&self, required: &[&str]) -> bool {
        if self.is_active() {
            return false;
        }
        required.iter().all(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Text,
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    ProcessButton,
    ClearButton,
    SaveMenuItem,
    CardSaveButton,
}

/// Every gated control together with the input fields it requires.
pub const GATED_CONTROLS: &[(ControlId, &[FieldId])] = &[
    (ControlId::ProcessButton, &[FieldId::Text, FieldId::Key]),
    (ControlId::ClearButton, &[]),
    (ControlId::SaveMenuItem, &[]),
    (ControlId::CardSaveButton, &[]),
];

/// Current contents of the two input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub text: String,
    pub key: String,
}

impl InputFields {
    pub fn new(text: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            key: key.into(),
        }
    }

    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Text => &self.text,
            FieldId::Key => &self.key,
        }
    }
}

/// Last computed enabled/disabled state of each gated control.
#[derive(Debug, Clone, Default)]
pub struct ControlStates {
    enabled: HashMap<ControlId, bool>,
}

impl ControlStates {
    pub fn is_enabled(&self, control: ControlId) -> bool {
        self.enabled.get(&control).copied().unwrap_or(false)
    }

    pub fn set(&mut self, control: ControlId, enabled: bool) {
        self.enabled.insert(control, enabled);
    }
}
