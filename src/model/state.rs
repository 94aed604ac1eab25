use bitflags::{Flags, bitflags};
use static_assertions::const_assert;

/// Bit index where the window family ends and control families begin.
pub const LAST_WINDOW_BIT: u32 = 9;
pub const LAST_BUTTON_BIT: u32 = LAST_WINDOW_BIT + 3;

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const CREATED            = 1 << 0;
        const VISIBLE            = 1 << 1;
        const FOCUSED            = 1 << 2;
        const FOCUS_ACCEPTING    = 1 << 3;
        const REDRAW_DISABLED    = 1 << 4;
        const OVERLAPPED         = 1 << 5;
        const MOUSE_MOVED        = 1 << 6;
        const SCROLL_BAR_ENABLED = 1 << 7;
        const GRAB_FOCUS         = 1 << 8;
    }
}

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ButtonFlags: u32 {
        const HILITED = 1 << LAST_WINDOW_BIT;
        const PUSHED  = 1 << (LAST_WINDOW_BIT + 1);
        const CHECKED = 1 << (LAST_WINDOW_BIT + 2);
    }
}

bitflags! {
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ListFlags: u32 {
        const SELECTING          = 1 << LAST_BUTTON_BIT;
        const EXTENDED_SELECTION = 1 << (LAST_BUTTON_BIT + 1);
        const DRAG_SELECTING     = 1 << (LAST_BUTTON_BIT + 2);
    }
}

const_assert!(WindowFlags::all().bits() < (1 << LAST_WINDOW_BIT));
const_assert!(ButtonFlags::all().bits() < (1 << LAST_BUTTON_BIT));
const_assert!(WindowFlags::all().bits() & ButtonFlags::all().bits() == 0);
const_assert!(WindowFlags::all().bits() & ListFlags::all().bits() == 0);
const_assert!(ButtonFlags::all().bits() & ListFlags::all().bits() == 0);

/// One flag word shared by every state family a control is composed of.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateWord(u32);

impl StateWord {
    pub const fn new() -> Self { Self(0) }

    pub const fn bits(&self) -> u32 { self.0 }

    pub fn is<F: Flags<Bits = u32>>(&self, flag: F) -> bool {
        let bits = flag.bits();
        self.0 & bits == bits
    }

    /// Writes `flag` and reports whether the word changed.
    pub fn set<F: Flags<Bits = u32>>(&mut self, flag: F, value: bool) -> bool {
        let bits = flag.bits();
        if (self.0 & bits == bits) == value {
            return false;
        }
        if value {
            self.0 |= bits;
        } else {
            self.0 &= !bits;
        }
        true
    }
}

macro_rules! state_family {
    ($(#[$meta:meta])* $trait_name:ident, $flags:ty { $($is:ident, $set:ident => $flag:ident;)* }) => {
        $(#[$meta])*
        pub trait $trait_name {
            $(
                fn $is(&self) -> bool;
                fn $set(&mut self, value: bool) -> bool;
            )*
        }

        impl $trait_name for StateWord {
            $(
                fn $is(&self) -> bool { self.is(<$flags>::$flag) }

                fn $set(&mut self, value: bool) -> bool { self.set(<$flags>::$flag, value) }
            )*
        }
    };
}

state_family!(
    /// Flags every window carries.
    WindowState, WindowFlags {
        is_created, set_created => CREATED;
        is_visible, set_visible => VISIBLE;
        is_focused, set_focused => FOCUSED;
        is_focus_accepting, set_focus_accepting => FOCUS_ACCEPTING;
        is_redraw_disabled, set_redraw_disabled => REDRAW_DISABLED;
        is_overlapped, set_overlapped => OVERLAPPED;
        is_mouse_moved, set_mouse_moved => MOUSE_MOVED;
        is_scroll_bar_enabled, set_scroll_bar_enabled => SCROLL_BAR_ENABLED;
        is_grab_focus, set_grab_focus => GRAB_FOCUS;
    }
);

state_family!(
    ButtonState, ButtonFlags {
        is_hilited, set_hilited => HILITED;
        is_pushed, set_pushed => PUSHED;
        is_checked, set_checked => CHECKED;
    }
);

state_family!(
    ListState, ListFlags {
        is_selecting, set_selecting => SELECTING;
        is_extended_selection, set_extended_selection => EXTENDED_SELECTION;
        is_drag_selecting, set_drag_selecting => DRAG_SELECTING;
    }
);
