//! Background capture loop.
//!
//! A dedicated thread reads frames from the camera for as long as the
//! shared running flag stays set, publishing every successful read into
//! the frame store. Failed reads are skipped and the next read attempted
//! immediately; the device keeps its own pace, so the loop needs no sleep.

use crate::camera::device::Camera;
use crate::error::{Result, VisionError};
use crate::store::FrameStore;
use logging::Logger;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Spawns the capture loop thread.
///
/// The camera moves into the thread and is released when the loop exits,
/// so joining the returned handle guarantees the device is free.
pub(crate) fn spawn_capture_loop(
    mut camera: Camera,
    store: Arc<FrameStore>,
    running: Arc<AtomicBool>,
    logger: Logger,
) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("capture-loop".to_string())
        .spawn(move || {
            logger.info("Capture loop started");
            let mut failed_reads: u64 = 0;

            while running.load(Ordering::Acquire) {
                match camera.capture_frame() {
                    Ok(frame) => store.publish(frame),
                    Err(e) => {
                        failed_reads += 1;
                        if failed_reads == 1 {
                            logger.debug(&format!("Frame capture failed, retrying: {}", e));
                        }
                    }
                }
            }

            if failed_reads > 0 {
                logger.debug(&format!("Capture loop had {} failed reads", failed_reads));
            }
            logger.info("Capture loop stopped");
        })
        .map_err(|e| VisionError::Camera(format!("Failed to spawn capture thread: {}", e)))
}
