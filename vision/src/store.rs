//! Single-slot frame store.
//!
//! Holds the most recent captured frame. The capture loop publishes into
//! the slot and unconditionally replaces the previous frame; queries read
//! whatever is current. Frames that were never read are silently dropped,
//! which is the intended behavior for a live preview pipeline.

use crate::frame::VideoFrame;
use std::sync::{Mutex, PoisonError};

/// Last-writer-wins holder of the most recent frame.
///
/// The lock is held only long enough to swap the slot or to run a short
/// read closure, never across device I/O or image analysis.
#[derive(Default)]
pub struct FrameStore {
    slot: Mutex<Option<VideoFrame>>,
}

impl FrameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        FrameStore {
            slot: Mutex::new(None),
        }
    }

    /// Replaces the stored frame with `frame`.
    ///
    /// The previous frame is dropped whether or not anything read it.
    pub fn publish(&self, frame: VideoFrame) {
        let mut slot = self.lock_slot();
        *slot = Some(frame);
    }

    /// Runs `read` against the current frame, if any.
    ///
    /// Returns `None` before the first publish. Two consecutive calls may
    /// observe different frames; callers that need several values from one
    /// frame must take them inside a single closure.
    pub fn with_frame<T>(&self, read: impl FnOnce(&VideoFrame) -> T) -> Option<T> {
        let slot = self.lock_slot();
        slot.as_ref().map(read)
    }

    /// Returns a deep copy of the current frame, if any.
    ///
    /// The copy is isolated from later publishes, so analysis can run on it
    /// without holding the lock.
    pub fn snapshot(&self) -> Option<VideoFrame> {
        let slot = self.lock_slot();
        slot.clone()
    }

    /// Returns true once a frame has been published.
    pub fn has_frame(&self) -> bool {
        self.lock_slot().is_some()
    }

    /// Drops the stored frame.
    pub fn clear(&self) {
        let mut slot = self.lock_slot();
        *slot = None;
    }

    /// Locks the slot, recovering from a poisoned mutex.
    ///
    /// A panicking publisher must not wedge every reader; the slot always
    /// holds either a complete frame or nothing.
    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<VideoFrame>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
