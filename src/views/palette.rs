//! Color values for event blocks, keyed by the calendar palette.

use egui::Color32;

use crate::models::calendar::{Calendar, CalendarColor};
use crate::models::event::Event;

/// Fill, border and text colors for one palette key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockPalette {
    pub fill: Color32,
    pub border: Color32,
    pub text: Color32,
}

/// Block colors for a palette key.
pub fn block_palette(color: CalendarColor) -> BlockPalette {
    match color {
        CalendarColor::Blue => BlockPalette {
            fill: Color32::from_rgb(219, 234, 254),
            border: Color32::from_rgb(147, 197, 253),
            text: Color32::from_rgb(30, 64, 175),
        },
        CalendarColor::Green => BlockPalette {
            fill: Color32::from_rgb(220, 252, 231),
            border: Color32::from_rgb(134, 239, 172),
            text: Color32::from_rgb(22, 101, 52),
        },
        CalendarColor::Purple => BlockPalette {
            fill: Color32::from_rgb(243, 232, 255),
            border: Color32::from_rgb(216, 180, 254),
            text: Color32::from_rgb(107, 33, 168),
        },
        CalendarColor::Red => BlockPalette {
            fill: Color32::from_rgb(254, 226, 226),
            border: Color32::from_rgb(252, 165, 165),
            text: Color32::from_rgb(153, 27, 27),
        },
        CalendarColor::Yellow => BlockPalette {
            fill: Color32::from_rgb(254, 249, 195),
            border: Color32::from_rgb(253, 224, 71),
            text: Color32::from_rgb(133, 77, 14),
        },
        CalendarColor::Indigo => BlockPalette {
            fill: Color32::from_rgb(224, 231, 255),
            border: Color32::from_rgb(165, 180, 252),
            text: Color32::from_rgb(55, 48, 163),
        },
    }
}

/// Block colors for an event, resolved through its owning calendar. Events
/// whose calendar is missing from the pushed collection render blue.
pub fn event_block_palette(event: &Event, calendars: &[Calendar]) -> BlockPalette {
    block_palette(event.color(calendars))
}
