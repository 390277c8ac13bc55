//! Synchronized types that allow access to a `Histogram` from multiple threads.
//!
//! [`Histogram::atomic_increment`] lets many threads record into one histogram, but readers may
//! observe counters mid-update. The types here trade that for per-thread recording: every
//! [`Recorder`] fills its own private histogram with plain increments, and the [`SyncHistogram`]
//! collects and merges those on demand, so what it exposes is always internally consistent.

use crate::errors::*;
use crate::Histogram;
use std::borrow::Borrow;
use std::ops::{AddAssign, Deref, DerefMut};
use std::sync::{atomic, Arc, Mutex};
use std::time;

/// A write-only handle to a [`SyncHistogram`].
///
/// Each writer thread should own its own `Recorder`. Writes to a `Recorder` touch only its local
/// histogram and never contend with other writers, except when the [`SyncHistogram`] initiates a
/// _phase shift_. During a phase shift, the next write on each associated `Recorder` sends its
/// local histogram to the reader over an unbounded channel and starts over with an empty one.
///
/// An idle `Recorder` holds up a phase shift until it writes again, or until the reader gives up
/// waiting (see [`SyncHistogram::refresh_timeout`]).
///
/// When a `Recorder` is dropped, all its samples are made visible to the next
/// [`SyncHistogram::refresh`].
#[derive(Debug)]
pub struct Recorder {
    local: Histogram,
    shared: Arc<Shared>,
    last_phase: usize,
}

impl AddAssign<i64> for Recorder {
    fn add_assign(&mut self, value: i64) {
        self.record(value);
    }
}

impl Clone for Recorder {
    fn clone(&self) -> Self {
        // reader will have to wait for one more recorder
        {
            let mut truth = self.shared.truth.lock().unwrap();
            truth.recorders += 1;
        }

        // new recorder starts at the same phase as we do with an empty histogram
        Recorder {
            local: Histogram::new_from(&self.local),
            shared: self.shared.clone(),
            last_phase: self.last_phase,
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        let mut truth = self.shared.truth.lock().unwrap();
        truth.recorders -= 1;

        // send the leftovers while still holding the lock: a reader that saw the old recorder
        // count may be blocked waiting on exactly this histogram.
        // can't call self.shed() due to the borrow of self.shared above
        let h = Histogram::new_from(&self.local);
        let h = std::mem::replace(&mut self.local, h);
        let _ = self.shared.sender.send(h).is_ok(); // if this is err, the reader went away

        drop(truth);
    }
}

#[derive(Debug)]
struct Critical {
    recorders: usize,
}

#[derive(Debug)]
struct Shared {
    truth: Mutex<Critical>,
    sender: crossbeam_channel::Sender<Histogram>,
    phase: atomic::AtomicUsize,
}

impl Recorder {
    fn with_hist<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Histogram) -> R,
    {
        let r = f(&mut self.local);
        let phase = self.shared.phase.load(atomic::Ordering::Acquire);
        if phase != self.last_phase {
            self.update();
            self.last_phase = phase;
        }
        r
    }

    // return our current histogram and leave a cleared one in its place
    fn shed(&mut self) -> Histogram {
        let h = Histogram::new_from(&self.local);
        std::mem::replace(&mut self.local, h)
    }

    fn update(&mut self) {
        let h = self.shed();
        let _ = self.shared.sender.send(h).is_ok(); // if this is err, the reader went away
    }

    /// See [`Histogram::increment`].
    pub fn record(&mut self, value: i64) {
        self.with_hist(move |h| h.increment(value))
    }

    /// See [`Histogram::add`].
    pub fn add<B: Borrow<Histogram>>(&mut self, source: B) -> Result<(), AdditionError> {
        self.with_hist(move |h| h.add(source))
    }

    /// See [`Histogram::subtract`].
    pub fn subtract<B: Borrow<Histogram>>(
        &mut self,
        subtrahend: B,
    ) -> Result<(), SubtractionError> {
        self.with_hist(move |h| h.subtract(subtrahend))
    }
}

/// A `Histogram` that can be written to by multiple threads concurrently.
///
/// Each writer thread should have a [`Recorder`], which records new samples without
/// synchronization. Those samples become visible through this histogram after a call to
/// [`SyncHistogram::refresh`], which blocks until it has synchronized with every recorder.
#[derive(Debug)]
pub struct SyncHistogram {
    merged: Histogram,
    shared: Arc<Shared>,
    receiver: crossbeam_channel::Receiver<Histogram>,
}

impl SyncHistogram {
    fn merge(&mut self, h: Histogram) {
        // every recorder was built with Histogram::new_from on our boundaries
        self.merged += &h;
    }

    fn refresh_inner(&mut self, timeout: Option<time::Duration>) {
        let end = timeout.map(|dur| time::Instant::now() + dur);

        // drain histograms left over by dropped recorders before bumping the phase,
        // so we know they're "old"
        while let Ok(h) = self.receiver.try_recv() {
            self.merge(h);
        }

        // make sure no recorders can join or leave in the middle of this
        let recorders = self.shared.truth.lock().unwrap().recorders;

        // then, we tell writers to phase
        let _ = self.shared.phase.fetch_add(1, atomic::Ordering::AcqRel);

        // we expect to get at least `recorders` histograms
        let mut phased = 0;
        while phased < recorders {
            let h = if let Some(end) = end {
                let now = time::Instant::now();
                if now > end {
                    break;
                }

                match self.receiver.recv_timeout(end - now) {
                    Ok(h) => h,
                    Err(crossbeam_channel::RecvTimeoutError::Timeout) => break,
                    Err(crossbeam_channel::RecvTimeoutError::Disconnected) => unreachable!(),
                }
            } else {
                self.receiver
                    .recv()
                    .expect("SyncHistogram has an Arc<Shared> with a Sender")
            };

            self.merge(h);
            phased += 1;
        }

        if phased < recorders {
            tracing::debug!(
                phased,
                recorders,
                "phase shift timed out before every recorder flushed"
            );
        }

        // gobble up extra histograms sent by recorders dropped in the meantime
        while let Ok(h) = self.receiver.try_recv() {
            self.merge(h);
        }
    }

    /// Block until writes from all [`Recorder`] instances for this histogram have been
    /// incorporated.
    pub fn refresh(&mut self) {
        self.refresh_inner(None)
    }

    /// Block until writes from all [`Recorder`] instances for this histogram have been
    /// incorporated, or until the given amount of time has passed.
    pub fn refresh_timeout(&mut self, timeout: time::Duration) {
        self.refresh_inner(Some(timeout))
    }

    /// Obtain another multi-threaded writer for this histogram.
    ///
    /// Note that writes made to the `Recorder` will not be visible until the next call to
    /// [`SyncHistogram::refresh`].
    pub fn recorder(&self) -> Recorder {
        // we will have to wait for one more recorder
        {
            let mut truth = self.shared.truth.lock().unwrap();
            truth.recorders += 1;
        }

        // new recorder starts at the current phase with an empty histogram
        Recorder {
            local: Histogram::new_from(&self.merged),
            shared: self.shared.clone(),
            last_phase: self.shared.phase.load(atomic::Ordering::Acquire),
        }
    }

    /// Give up synchronization and return the merged histogram as it stands.
    pub fn into_inner(self) -> Histogram {
        self.merged
    }
}

impl From<Histogram> for SyncHistogram {
    fn from(h: Histogram) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        SyncHistogram {
            merged: h,
            receiver: rx,
            shared: Arc::new(Shared {
                truth: Mutex::new(Critical { recorders: 0 }),
                sender: tx,
                phase: atomic::AtomicUsize::new(0),
            }),
        }
    }
}

impl Deref for SyncHistogram {
    type Target = Histogram;
    fn deref(&self) -> &Self::Target {
        &self.merged
    }
}

impl DerefMut for SyncHistogram {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.merged
    }
}
