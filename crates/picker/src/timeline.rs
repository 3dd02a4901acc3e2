use crate::events::AppEvent;
use async_channel::Sender;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use swatch::geometry::{Offset, Point};
use swatch::sequence::{Cue, Motion, Schedule};
use swatch::{Layout, ScheduleKind};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Where a cue sends its swatch, so a backend can drive the real animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub at: f64,
    pub cue: Cue,
    pub target: Option<Point>,
}

/// Resolves a schedule's cues against the ring geometry. Positions are absolute, around
/// `anchor`.
pub fn frames(schedule: &Schedule, layout: &Layout, anchor: Point, bounce: f64) -> Vec<Frame> {
    let overshoot = layout.overshoot(bounce);
    let ring = |i: usize| layout.offsets.get(i).map(|&o| anchor + o);
    let motion = |i: usize| schedule.step(i).map(|s| s.motion);

    schedule
        .cues()
        .into_iter()
        .map(|(at, cue)| {
            let target = match cue {
                Cue::Launch(i) => match motion(i) {
                    Some(Motion::Outward) => ring(i),
                    _ if schedule.step(i).is_some_and(|s| s.bounce > 0.0) => {
                        overshoot.get(i).map(|&o: &Offset| anchor + o)
                    }
                    _ => Some(anchor),
                },
                Cue::Retreat(_) => Some(anchor),
                Cue::Arrive(i) => match motion(i) {
                    Some(Motion::Outward) => ring(i),
                    _ => Some(anchor),
                },
                Cue::Settle => None,
            };
            Frame { at, cue, target }
        })
        .collect()
}

/// Plays one schedule at a time as fire-once timers and reports `AppEvent::Settled` once
/// the last cue has fired. Starting a new schedule cancels the one in flight.
pub struct Timeline {
    tx: Sender<AppEvent>,
    next_id: AtomicU64,
    running: Mutex<Option<(u64, JoinHandle<()>)>>,
}

impl Timeline {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self {
            tx,
            next_id: AtomicU64::new(1),
            running: Mutex::new(None),
        }
    }

    /// Must be called from inside a tokio runtime.
    pub fn play(&self, kind: ScheduleKind, frames: Vec<Frame>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let tx = self.tx.clone();
        let start = Instant::now();

        let handle = tokio::spawn(async move {
            for frame in frames {
                sleep_until(start + Duration::from_secs_f64(frame.at.max(0.0))).await;
                match frame.target {
                    Some(p) => log::debug!(
                        "[{:?} #{}] {:.3}s {:?} -> ({:.1}, {:.1})",
                        kind,
                        id,
                        frame.at,
                        frame.cue,
                        p.x,
                        p.y
                    ),
                    None => log::debug!("[{:?} #{}] {:.3}s {:?}", kind, id, frame.at, frame.cue),
                }
            }
            if tx.send(AppEvent::Settled(id)).await.is_err() {
                log::error!("Timeline #{} finished but nobody is listening", id);
            }
        });

        if let Some((old, handle)) = self.running.lock().replace((id, handle)) {
            if !handle.is_finished() {
                log::debug!("Timeline #{} superseded by #{}", old, id);
            }
            handle.abort();
        }
        id
    }

    pub fn cancel(&self) {
        if let Some((id, handle)) = self.running.lock().take()
            && !handle.is_finished()
        {
            log::debug!("Cancelling timeline #{}", id);
            handle.abort();
        }
    }

    pub fn current(&self) -> Option<u64> {
        self.running.lock().as_ref().map(|(id, _)| *id)
    }
}

impl Drop for Timeline {
    fn drop(&mut self) {
        self.cancel();
    }
}
