//! Working-set reader
//!
//! The OS API takes a caller-sized buffer and has no "how big?" mode, so
//! the reader grows the buffer until the insufficient-length error stops.
//!
//! ```text
//!   overshoot += step
//!   buf = [hint + overshoot slots | header]
//!   query ──► InsufficientBuffer ──► hint = buf[0], retry
//!        ├──► other error        ──► propagate
//!        └──► ok                 ──► read buf[0] entries
//! ```
//!
//! A live process can grow between attempts, so there is no retry cap.

use crate::constants::{DEFAULT_GROWTH_STEP, HEADER_WORDS};
use crate::error::{OsError, WsError, WsResult};
use crate::traits::WorkingSetQuery;
use crate::working_set::WorkingSet;
use crate::{kdebug, ktrace};

/// Queries working sets through an OS layer
pub struct WorkingSetReader<'a, A: ?Sized> {
    api: &'a A,
    growth_step: usize,
}

impl<'a, A> WorkingSetReader<'a, A>
where
    A: WorkingSetQuery + ?Sized,
{
    /// Create a reader with the default growth step
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            growth_step: DEFAULT_GROWTH_STEP,
        }
    }

    /// Set the number of slots added per attempt (minimum 1)
    pub fn growth_step(mut self, step: usize) -> Self {
        self.growth_step = step.max(1);
        self
    }

    /// Read the current working set of `handle`
    pub fn query(&self, handle: &A::Handle) -> WsResult<WorkingSet> {
        let mut buf: Vec<usize> = Vec::new();
        let mut overshoot: usize = 0;
        let mut attempts: u64 = 0;

        loop {
            // Required count left by the previous failed attempt
            let hint = buf.first().copied().unwrap_or(0);
            overshoot = overshoot.saturating_add(self.growth_step);
            let slots = hint.saturating_add(overshoot);

            buf.clear();
            buf.resize(HEADER_WORDS.saturating_add(slots), 0);
            attempts += 1;

            match self.api.query_working_set(handle, &mut buf) {
                Ok(()) => break,
                Err(OsError::InsufficientBuffer) => {
                    ktrace!(
                        "working set: {} slots too small (hint {}), attempt {}",
                        slots, buf[0], attempts
                    );
                }
                Err(e) => {
                    kdebug!("working set: query failed after {} attempts: {}", attempts, e);
                    return Err(e.into());
                }
            }
        }

        let capacity = buf.len() - HEADER_WORDS;
        let reported = buf[0];
        if reported > capacity {
            return Err(WsError::MalformedReply { reported, capacity });
        }

        kdebug!("working set: {} entries in {} attempts", reported, attempts);
        Ok(WorkingSet::from_raw(&buf[HEADER_WORDS..HEADER_WORDS + reported]))
    }
}
