pub mod repeater;
pub mod tooltip;

pub use repeater::{MainQueue, Repeater};
pub use tooltip::{Tooltip, TooltipState};
