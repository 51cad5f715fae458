//! Per-form estimate slots.
//!
//! Each estimator form instance owns one slot holding its latest estimate or error.
//! A slot accepts one outstanding request at a time; a second submission while one is
//! pending is refused. Discarding a slot while its request is in flight drops the late
//! result, and generations keep a recreated slot from receiving a stale write.
//!
//! Settled slots are kept for a fixed retention period so forms that are abandoned without
//! an explicit discard do not accumulate. Pending slots are never expired.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::estimate::CostEstimate;
use crate::services::estimator::EstimateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("an estimate is already being generated for this form")]
pub struct SlotBusy;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Snapshot of a slot for the presentation layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub form_id: Uuid,
    pub status: SlotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<CostEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTicket {
    pub form_id: Uuid,
    generation: u64,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: bool,
    estimate: Option<CostEstimate>,
    error: Option<String>,
    /// When the slot last stopped being pending
    settled_at: Option<Instant>,
}

impl Slot {
    fn expired(&self, now: Instant, retention: Duration) -> bool {
        !self.pending
            && self
                .settled_at
                .is_some_and(|settled| now.saturating_duration_since(settled) >= retention)
    }
}

#[derive(Debug, Default)]
struct Slots {
    next_generation: u64,
    by_form: HashMap<Uuid, Slot>,
}

#[derive(Debug)]
pub struct EstimateSlots {
    inner: Mutex<Slots>,
    retention: Duration,
}

impl EstimateSlots {
    /// Slots whose request settled more than `retention` ago are swept.
    pub fn new(retention: Duration) -> Self {
        Self {
            inner: Mutex::new(Slots::default()),
            retention,
        }
    }

    /// Start a request for `form_id`, clearing the previous estimate and error.
    ///
    /// Expired settled slots are swept first.
    pub fn begin(&self, form_id: Uuid) -> Result<SlotTicket, SlotBusy> {
        let mut inner = self.inner.lock();

        let now = Instant::now();
        let retention = self.retention;
        let before = inner.by_form.len();
        inner.by_form.retain(|_, slot| !slot.expired(now, retention));
        let swept = before - inner.by_form.len();
        if swept > 0 {
            tracing::debug!(swept = swept, "Expired estimate slots removed");
        }

        inner.next_generation += 1;
        let generation = inner.next_generation;

        let slot = inner.by_form.entry(form_id).or_default();
        if slot.pending {
            return Err(SlotBusy);
        }

        slot.generation = generation;
        slot.pending = true;
        slot.estimate = None;
        slot.error = None;
        slot.settled_at = None;

        Ok(SlotTicket {
            form_id,
            generation,
        })
    }

    /// Record the outcome of a request.
    ///
    /// Returns `false` when the slot was discarded or restarted in the meantime; the
    /// outcome is then dropped.
    pub fn complete(
        &self,
        ticket: SlotTicket,
        outcome: &Result<CostEstimate, EstimateError>,
    ) -> bool {
        let mut inner = self.inner.lock();
        let Some(slot) = inner.by_form.get_mut(&ticket.form_id) else {
            tracing::debug!(form_id = %ticket.form_id, "Dropping estimate for discarded form");
            return false;
        };
        if slot.generation != ticket.generation {
            tracing::debug!(form_id = %ticket.form_id, "Dropping stale estimate");
            return false;
        }

        slot.pending = false;
        slot.settled_at = Some(Instant::now());
        match outcome {
            Ok(estimate) => slot.estimate = Some(estimate.clone()),
            Err(e) => slot.error = Some(e.to_string()),
        }
        true
    }

    /// Release a pending slot without recording an outcome.
    pub fn abandon(&self, ticket: SlotTicket) {
        let mut inner = self.inner.lock();
        if let Some(slot) = inner.by_form.get_mut(&ticket.form_id) {
            if slot.generation == ticket.generation {
                slot.pending = false;
                slot.settled_at = Some(Instant::now());
            }
        }
    }

    /// Forget a form. Any in-flight result for it is dropped when it arrives.
    pub fn discard(&self, form_id: Uuid) -> bool {
        self.inner.lock().by_form.remove(&form_id).is_some()
    }

    pub fn view(&self, form_id: Uuid) -> Option<SlotView> {
        let inner = self.inner.lock();
        let slot = inner.by_form.get(&form_id)?;

        let status = if slot.pending {
            SlotStatus::Pending
        } else if slot.estimate.is_some() {
            SlotStatus::Ready
        } else if slot.error.is_some() {
            SlotStatus::Failed
        } else {
            SlotStatus::Idle
        };

        Some(SlotView {
            form_id,
            status,
            estimate: slot.estimate.clone(),
            error: slot.error.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.inner.lock().by_form.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
