pub mod arena;
pub mod event_container;
pub mod state;

pub use arena::{ElementArena, ElementId};
pub use event_container::{EventContainer, Handler, HandlerError};
pub use state::{ButtonFlags, ButtonState, ListFlags, ListState, StateWord, WindowFlags, WindowState};
