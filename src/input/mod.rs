//! Input handling: platform-agnostic pointer events and the interaction
//! channel that tells the camera tour the user took over.

/// Platform-agnostic input events.
pub mod event;
/// Interaction signals from camera controls to the tour.
pub mod interaction;

pub use event::{InputEvent, MouseButton};
pub use interaction::{
    channel, InteractionEvent, InteractionReceiver, InteractionSender,
};
