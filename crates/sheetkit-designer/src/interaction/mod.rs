//! Interaction state machine
//!
//! One [`InteractionState`] value holds all data of the gesture in
//! progress. [`InteractionController`] turns pointer, wheel and key events
//! into viewport changes and [`crate::store::DrawingStore`] mutations.

pub mod controller;
pub mod state;

pub use controller::InteractionController;
pub use state::{
    InteractionState, Key, Modifiers, PickedPoint, PointerButton, PointerEvent, Selection, Tool,
};
