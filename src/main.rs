//! Headless demo: builds a small helix of atoms, then scripts a viewing
//! session (fit, orbit, pan, click, double click) and logs what the camera
//! and picker report.
//!
//! Usage: `viso-camera [options.toml]`. Set `RUST_LOG=debug` for detail.

use std::path::Path;

use glam::Vec3;
use viso_camera::camera::Camera;
use viso_camera::engine::{InputOutcome, RenderTarget, ViewportEngine};
use viso_camera::frame::{FrameHandle, FrameScheduler};
use viso_camera::input::{InputEvent, MouseButton};
use viso_camera::options::Options;
use viso_camera::picking::PickTarget;
use viso_camera::scene::{Primitive, Scene, SceneObject, TriangleMesh};
use viso_camera::ViewportError;
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

/// Renderer stand-in that logs instead of drawing.
#[derive(Default)]
struct LogRenderer {
    frames: u64,
}

impl RenderTarget for LogRenderer {
    fn resize_surface(&mut self, width: u32, height: u32) {
        log::info!("surface resized to {width}x{height}");
    }

    fn render(&mut self, camera: &Camera) {
        self.frames += 1;
        log::debug!(
            "frame {}: eye {:.2} target {:.2}",
            self.frames,
            camera.eye,
            camera.target
        );
    }
}

/// Fixed-rate refresh signal; tracks the single pending callback.
#[derive(Default)]
struct FixedRefresh {
    next: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler for FixedRefresh {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// One turn of an alpha helix per 3.6 residues, rise 1.5 Å.
fn helix(scene: &mut Scene, residues: u32) {
    use viso_camera::scene::SceneGraph;

    for i in 0..residues {
        let angle = i as f32 * std::f32::consts::TAU / 3.6;
        let center = Vec3::new(2.3 * angle.cos(), 1.5 * i as f32, 2.3 * angle.sin());
        let _ = scene.add_object(SceneObject::sphere(
            PickTarget::Atom { entity: 0, atom: i },
            center,
            0.8,
        ));
    }
    // A flat "surface" patch behind the helix
    let patch = TriangleMesh::new(
        vec![
            Vec3::new(-6.0, 0.0, -6.0),
            Vec3::new(6.0, 0.0, -6.0),
            Vec3::new(6.0, 1.5 * residues as f32, -6.0),
            Vec3::new(-6.0, 1.5 * residues as f32, -6.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    );
    let _ = scene.add_object(SceneObject::new(
        PickTarget::Surface { entity: 0 },
        vec![Primitive::Mesh(patch)],
    ));
}

struct Session {
    engine: ViewportEngine<LogRenderer, Scene>,
    refresh: FixedRefresh,
    now: Instant,
}

impl Session {
    fn run_frames(&mut self, count: u32) {
        for _ in 0..count {
            if self.refresh.pending.take().is_none() {
                return;
            }
            self.now += FRAME;
            let _ = self.engine.frame(self.now, &mut self.refresh);
        }
    }

    fn send(&mut self, event: InputEvent) -> InputOutcome {
        self.engine.handle_input_at(event, self.now)
    }

    fn drag(&mut self, button: MouseButton, from: (f32, f32), to: (f32, f32)) {
        let _ = self.send(InputEvent::PointerDown {
            x: from.0,
            y: from.1,
            button,
        });
        for step in 1..=10 {
            let t = step as f32 / 10.0;
            let _ = self.send(InputEvent::CursorMoved {
                x: from.0 + (to.0 - from.0) * t,
                y: from.1 + (to.1 - from.1) * t,
            });
            self.run_frames(1);
        }
        let _ = self.send(InputEvent::PointerUp { button });
    }

    fn click(&mut self, x: f32, y: f32) -> InputOutcome {
        let _ = self.send(InputEvent::PointerDown {
            x,
            y,
            button: MouseButton::Left,
        });
        self.send(InputEvent::PointerUp {
            button: MouseButton::Left,
        })
    }

    fn log_camera(&self, label: &str) {
        let c = self.engine.controller();
        log::info!(
            "{label}: distance {:.2}, polar {:.3}, azimuth {:.3}, target {:.2}",
            c.effective_distance(),
            c.effective_polar(),
            c.effective_azimuth(),
            c.effective_target()
        );
    }
}

fn main() -> Result<(), ViewportError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(Path::new(&path))?,
        None => Options::default(),
    };

    let mut scene = Scene::new();
    helix(&mut scene, 18);
    log::info!("scene holds {} objects", scene.len());

    let engine =
        ViewportEngine::new(LogRenderer::default(), scene, &options, 1280.0, 720.0)?;
    let mut session = Session {
        engine,
        refresh: FixedRefresh::default(),
        now: Instant::now(),
    };

    let _ = session.engine.start(&mut session.refresh);
    session.run_frames(2);
    session.log_camera("initial");

    let _ = session.engine.fit_all();
    session.run_frames(60);
    session.log_camera("fit to scene");

    session.drag(MouseButton::Left, (640.0, 360.0), (760.0, 300.0));
    session.run_frames(60);
    session.log_camera("after orbit");

    session.drag(MouseButton::Middle, (640.0, 360.0), (600.0, 360.0));
    session.run_frames(60);
    session.log_camera("after pan");

    let _ = session.send(InputEvent::Scroll { delta: -200.0 });
    session.run_frames(60);
    session.log_camera("after wheel zoom");

    match session.click(640.0, 360.0) {
        InputOutcome::Selected(hit) => log::info!(
            "selected {:?} ({:?}) at distance {:.2}",
            hit.target,
            hit.object,
            hit.distance
        ),
        other => log::info!("click at center: {other:?}"),
    }
    session.now += Duration::from_millis(120);
    let outcome = session.click(640.0, 360.0);
    log::info!("second click: {outcome:?}");
    session.run_frames(90);
    session.log_camera("after focus");

    session.engine.controller_mut().set_auto_rotate(true);
    session.run_frames(120);
    session.log_camera("after turntable");

    session.engine.stop(&mut session.refresh);
    log::info!(
        "rendered {} frames (~{:.0} fps)",
        session.engine.renderer().frames,
        session.engine.driver().fps()
    );
    Ok(())
}
