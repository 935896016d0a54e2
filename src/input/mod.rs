pub mod controls;
pub mod handler;

pub use controls::{Button, ControlPad};
pub use handler::{Command, InputHandler};
