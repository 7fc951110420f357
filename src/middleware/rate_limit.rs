use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::{Error, Result};

/// Global request budget, refilled at every whole second since startup.
///
/// The slot packs the second index in the high half and the number of
/// requests admitted during that second in the low half.
#[derive(Clone, Debug)]
pub struct RequestBudget {
    per_second: u32,
    started: Instant,
    slot: Arc<AtomicU64>,
}

fn unpack(slot: u64) -> (u32, u32) {
    ((slot >> 32) as u32, slot as u32)
}

fn pack(second: u32, admitted: u32) -> u64 {
    (u64::from(second) << 32) | u64::from(admitted)
}

impl RequestBudget {
    pub fn per_second(limit: u32) -> Self {
        Self {
            per_second: limit.max(1),
            started: Instant::now(),
            slot: Arc::new(AtomicU64::new(0)),
        }
    }

    fn try_acquire(&self) -> bool {
        let second = self.started.elapsed().as_secs() as u32;
        let mut current = self.slot.load(Ordering::Acquire);
        loop {
            let (slot_second, admitted) = unpack(current);
            let admitted = if slot_second == second { admitted } else { 0 };
            if admitted >= self.per_second {
                return false;
            }
            match self.slot.compare_exchange_weak(
                current,
                pack(second, admitted + 1),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}

pub async fn enforce_budget(
    State(budget): State<RequestBudget>,
    req: Request,
    next: Next,
) -> Result<Response> {
    if !budget.try_acquire() {
        tracing::warn!(path = %req.uri().path(), limit = budget.per_second, "request budget exhausted");
        return Err(Error::RateLimited);
    }
    Ok(next.run(req).await)
}
