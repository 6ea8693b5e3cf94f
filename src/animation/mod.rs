//! Shared-clock animation of every track head.

pub mod driver;
pub mod instance;

pub use driver::{progress_for, AnimationDriver, FrameSnapshot};
pub use instance::{FeaturedInstance, InstanceBuffers, InstanceRaw};
