//! Frame loop tied to the host's display refresh.
//!
//! The host owns the real refresh signal; [`FrameDriver`] only decides, per
//! fired frame, whether the camera moved enough to need a render and asks
//! the [`FrameScheduler`] for the next callback.

mod driver;
mod timing;

pub use driver::{FrameDriver, FrameHandle, FrameScheduler};
pub use timing::FrameTiming;

#[cfg(test)]
pub(crate) use driver::tests::ManualScheduler;
