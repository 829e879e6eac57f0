//! Shared types for calendar views.

use chrono::{DateTime, Local, NaiveDate};
use egui::{pos2, Rect, Vec2};

use crate::models::event::Event;
use crate::views::geometry;

/// Positioned block for one event within a day column.
///
/// Blocks span the full column width; concurrent events stack visually in
/// the same column rather than being partitioned horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event: Event,
    /// Pixel offset from the top of the column, header included.
    pub top: f32,
    /// Rendered height; never below the minimum-visible floor.
    pub height: f32,
}

impl EventBlock {
    pub fn from_event(event: &Event) -> Self {
        let (top, height) = geometry::event_block_geometry(event);
        Self {
            event: event.clone(),
            top,
            height,
        }
    }

    /// Concrete rect inside a column, for shells that paint or hit-test.
    pub fn rect_in_column(&self, column: Rect) -> Rect {
        Rect::from_min_size(
            pos2(column.left(), column.top() + self.top),
            Vec2::new(column.width(), self.height),
        )
    }
}

/// What the embedding shell should do after a grid interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    /// Open the create flow pre-filled with a concrete start time.
    CreateAtTime(DateTime<Local>),
    /// Open the create flow with a date only; the time defaults downstream.
    CreateOnDate(NaiveDate),
}
