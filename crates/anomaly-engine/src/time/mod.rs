//! Time subsystem.
//!
//! - `FrameClock`: one per render loop; `tick()` once per presented frame
//! - `FixedStepper`: turns variable frame deltas into fixed simulation steps
//! - `FpsCounter`: frames presented during the last full second

mod fixed_step;
mod fps;
mod frame_clock;

pub use fixed_step::{FixedStepper, StepReport, Steppable};
pub use fps::FpsCounter;
pub use frame_clock::{FrameClock, FrameTime};
