//! Fixed-rate broadcast of the moving and rotating frame transforms

use std::time::Duration;

use gridmark_core::transform::{moving_frame_at, rotating_frame_at};
use gridmark_core::TransformRecord;
use tokio::sync::broadcast;
use tokio::time::interval;
use tracing::{info, trace};

/// Default tick period of the broadcast loop
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Capacity of a lazily-created transform channel
const CHANNEL_CAPACITY: usize = 256;

/// Owns the tick counter and publishes both frame transforms every tick.
///
/// The output channel is usually shared with the controller at construction;
/// if none was supplied, one is created lazily on first use so a tick can
/// never block or fail on a missing channel.
pub struct FrameBroadcaster {
    counter: u32,
    transform_tx: Option<broadcast::Sender<TransformRecord>>,
}

impl FrameBroadcaster {
    /// Broadcaster with no output channel yet
    pub fn new() -> Self {
        Self {
            counter: 0,
            transform_tx: None,
        }
    }

    /// Broadcaster publishing on an existing channel
    pub fn with_publisher(transform_tx: broadcast::Sender<TransformRecord>) -> Self {
        Self {
            counter: 0,
            transform_tx: Some(transform_tx),
        }
    }

    /// Current tick count
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Subscribe to the transform output, creating the channel if needed
    pub fn subscribe(&mut self) -> broadcast::Receiver<TransformRecord> {
        self.publisher().subscribe()
    }

    fn publisher(&mut self) -> &broadcast::Sender<TransformRecord> {
        self.transform_tx
            .get_or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
    }

    /// One broadcast tick.
    ///
    /// Both transforms are computed from the pre-increment counter value and
    /// stamped independently at computation time, so the two records of a
    /// tick may carry slightly different stamps. The counter wraps at
    /// `u32::MAX`; it only feeds periodic trigonometric motion.
    pub fn on_tick(&mut self) {
        let counter = self.counter;
        self.counter = self.counter.wrapping_add(1);

        let tx = self.publisher();
        let _ = tx.send(moving_frame_at(counter));
        let _ = tx.send(rotating_frame_at(counter));
        trace!(counter, "Broadcast frame transforms");
    }

    /// Drive the broadcast loop at a fixed period, forever.
    ///
    /// Late ticks run to completion rather than being skipped; the interval
    /// bursts to catch up under load.
    pub async fn run(mut self, period: Duration) {
        info!(period_ms = period.as_millis() as u64, "Frame broadcaster started");
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            self.on_tick();
        }
    }
}

impl Default for FrameBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DQuat, DVec3};
    use gridmark_core::{BASE_FRAME, MOVING_FRAME, ROTATING_FRAME};

    #[test]
    fn test_tick_publishes_both_transforms() {
        let (tx, mut rx) = broadcast::channel(16);
        let mut broadcaster = FrameBroadcaster::with_publisher(tx);

        broadcaster.on_tick();

        let moving = rx.try_recv().unwrap();
        assert_eq!(moving.child_frame, MOVING_FRAME);
        assert_eq!(moving.parent_frame, BASE_FRAME);
        assert_eq!(moving.translation, DVec3::ZERO);

        let rotating = rx.try_recv().unwrap();
        assert_eq!(rotating.child_frame, ROTATING_FRAME);
        assert_eq!(rotating.rotation, DQuat::IDENTITY);

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[test]
    fn test_transforms_use_pre_increment_counter() {
        let (tx, mut rx) = broadcast::channel(16);
        let mut broadcaster = FrameBroadcaster::with_publisher(tx);

        for n in 0..3u32 {
            broadcaster.on_tick();

            let moving = rx.try_recv().unwrap();
            let expected = 2.0 * (f64::from(n) / 140.0).sin();
            assert!((moving.translation.z - expected).abs() < 1e-12);

            let rotating = rx.try_recv().unwrap();
            let expected = DQuat::from_rotation_y(f64::from(n) / 140.0);
            assert!(rotating.rotation.abs_diff_eq(expected, 1e-12));
        }
        assert_eq!(broadcaster.counter(), 3);
    }

    #[test]
    fn test_counter_wraps() {
        let mut broadcaster = FrameBroadcaster::new();
        broadcaster.counter = u32::MAX;
        broadcaster.on_tick();
        assert_eq!(broadcaster.counter(), 0);
    }

    #[test]
    fn test_lazy_channel_creation() {
        let mut broadcaster = FrameBroadcaster::new();
        // no channel yet and no subscribers: the tick must still go through
        broadcaster.on_tick();
        assert_eq!(broadcaster.counter(), 1);

        let mut rx = broadcaster.subscribe();
        broadcaster.on_tick();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_ok());
    }
}
