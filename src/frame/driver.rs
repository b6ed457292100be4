use web_time::Instant;

use super::timing::FrameTiming;
use crate::camera::OrbitController;
use crate::options::{FrameOptions, RenderPolicy};

/// Opaque token for a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host refresh signal (`requestAnimationFrame`, a winit redraw request, a
/// vsync timer).
///
/// The host calls [`FrameDriver::on_frame`] when a requested frame fires.
pub trait FrameScheduler {
    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending callback.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Continuous poll-and-advance loop: each frame ticks the camera, decides
/// whether to render and schedules the next frame.
#[derive(Debug)]
pub struct FrameDriver {
    policy: RenderPolicy,
    timing: FrameTiming,
    pending: Option<FrameHandle>,
    running: bool,
    last_tick: Option<Instant>,
    /// Change seen but not yet rendered (OnDemand, or held back by the FPS
    /// cap).
    needs_render: bool,
}

impl FrameDriver {
    /// Driver configured from frame options; not yet running.
    pub fn new(options: &FrameOptions) -> Self {
        Self {
            policy: options.render_policy,
            timing: FrameTiming::new(options.target_fps),
            pending: None,
            running: false,
            last_tick: None,
            needs_render: true,
        }
    }

    /// Schedule the first frame. Returns `false` if already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_tick = None;
        self.needs_render = true;
        self.pending = Some(scheduler.request_frame());
        log::debug!("frame loop started ({:?})", self.policy);
        true
    }

    /// Stop the loop and cancel the pending frame. Safe to call repeatedly.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        if self.running {
            log::debug!("frame loop stopped");
        }
        self.running = false;
    }

    /// Whether the loop is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handle of the frame waiting to fire.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Force a render on the next frame (scene edits, resizes).
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Render scheduling policy.
    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Switch render policy at runtime.
    pub fn set_policy(&mut self, policy: RenderPolicy) {
        self.policy = policy;
    }

    /// Smoothed rendered frames per second.
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// One refresh: tick the controller, then schedule the next frame.
    ///
    /// Returns `true` when the caller should render this frame. After
    /// [`stop`](Self::stop) this always returns `false` and schedules
    /// nothing.
    pub fn on_frame(
        &mut self,
        now: Instant,
        controller: &mut OrbitController,
        scheduler: &mut dyn FrameScheduler,
    ) -> bool {
        if !self.running {
            return false;
        }
        // The pending callback is the one firing now
        self.pending = None;

        let dt = self
            .last_tick
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_tick = Some(now);

        if controller.tick(dt) {
            self.needs_render = true;
        }
        let wanted =
            self.needs_render || self.policy == RenderPolicy::Continuous;
        let render = wanted && self.timing.should_render(now);
        if render {
            self.needs_render = false;
            self.timing.end_frame(now);
        }

        self.pending = Some(scheduler.request_frame());
        render
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use web_time::Duration;

    use super::*;
    use crate::options::{ControlOptions, Options};

    /// Scheduler that records requests and cancellations.
    #[derive(Debug, Default)]
    pub(crate) struct ManualScheduler {
        next: u64,
        pub(crate) requested: Vec<FrameHandle>,
        pub(crate) cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next += 1;
            let handle = FrameHandle(self.next);
            self.requested.push(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    fn controller() -> OrbitController {
        OrbitController::new(&Options::default()).unwrap()
    }

    fn on_demand() -> FrameOptions {
        FrameOptions {
            render_policy: RenderPolicy::OnDemand,
            target_fps: 0,
        }
    }

    #[test]
    fn continuous_renders_every_frame() {
        let mut sched = ManualScheduler::default();
        let mut cam = controller();
        let mut driver = FrameDriver::new(&FrameOptions::default());
        assert!(driver.start(&mut sched));
        assert!(!driver.start(&mut sched));

        let t0 = Instant::now();
        for i in 0..5 {
            let now = t0 + Duration::from_millis(16 * i);
            assert!(driver.on_frame(now, &mut cam, &mut sched));
        }
        // One initial request plus one per frame
        assert_eq!(sched.requested.len(), 6);
    }

    #[test]
    fn on_demand_renders_only_on_change() {
        let mut sched = ManualScheduler::default();
        let mut cam = controller();
        let mut driver = FrameDriver::new(&on_demand());
        let _ = driver.start(&mut sched);

        let t0 = Instant::now();
        assert!(driver.on_frame(t0, &mut cam, &mut sched));
        assert!(!driver.on_frame(t0 + Duration::from_millis(16), &mut cam, &mut sched));

        cam.zoom(50.0);
        assert!(driver.on_frame(t0 + Duration::from_millis(32), &mut cam, &mut sched));

        driver.request_render();
        let mut now = t0 + Duration::from_millis(48);
        assert!(driver.on_frame(now, &mut cam, &mut sched));
        // Damping keeps producing frames until the camera settles
        let mut frames = 0;
        loop {
            now += Duration::from_millis(16);
            if !driver.on_frame(now, &mut cam, &mut sched) {
                break;
            }
            frames += 1;
            assert!(frames < 500);
        }
        assert!(!cam.is_settling());
    }

    #[test]
    fn stop_is_idempotent_and_silences_frames() {
        let mut sched = ManualScheduler::default();
        let mut cam = controller();
        let mut driver = FrameDriver::new(&FrameOptions::default());
        let _ = driver.start(&mut sched);
        let pending = driver.pending().unwrap();

        driver.stop(&mut sched);
        driver.stop(&mut sched);
        assert_eq!(sched.cancelled, vec![pending]);
        assert!(!driver.is_running());

        let requested = sched.requested.len();
        assert!(!driver.on_frame(Instant::now(), &mut cam, &mut sched));
        assert_eq!(sched.requested.len(), requested);
        assert!(driver.pending().is_none());
    }

    #[test]
    fn auto_rotate_uses_frame_delta() {
        let mut sched = ManualScheduler::default();
        let options = Options {
            controls: ControlOptions {
                damping_enabled: false,
                ..ControlOptions::default()
            },
            ..Options::default()
        };
        let mut cam = OrbitController::new(&options).unwrap();
        let mut driver = FrameDriver::new(&on_demand());
        let _ = driver.start(&mut sched);

        let t0 = Instant::now();
        let _ = driver.on_frame(t0, &mut cam, &mut sched);
        cam.set_auto_rotate(true);
        let az = cam.azimuth();
        assert!(driver.on_frame(t0 + Duration::from_secs(1), &mut cam, &mut sched));
        assert!((cam.azimuth() - (az + 0.5)).abs() < 1e-4);
    }
}
