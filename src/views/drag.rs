//! Drag-to-reschedule state machine.
//!
//! Pointer-down on a rendered event block arms a drag; pointer-up resolves
//! it into a click, a no-op, or a duration-preserving reschedule request.
//! The live ghost position is a visual preview only: no snapping is applied
//! while the pointer moves and nothing is written until the drop.

use chrono::{DateTime, Duration, Local};
use egui::{Pos2, Rect};

use crate::models::event::Event;
use crate::services::store::{CalendarStore, EventPatch};
use crate::views::geometry::{self, PIXELS_PER_HOUR, TOP_OFFSET};

/// Pointer travel below this many pixels is a click, not a drag.
pub const CLICK_THRESHOLD_PX: f32 = 5.0;

/// Interaction surface a drag listens on while armed.
///
/// Arming registers surface-wide move/up routing so the drag keeps tracking
/// the pointer outside the block's bounds. The registration is scoped:
/// acquired on arm, released on every exit path from the armed state, never
/// left to be collected later.
#[cfg_attr(test, mockall::automock)]
pub trait DragSurface {
    /// Bounding rect of the grid's interaction surface, when mounted.
    fn grid_rect(&self) -> Option<Rect>;
    /// Start routing surface-wide pointer events to the drag.
    fn capture_pointer(&mut self);
    /// Stop routing surface-wide pointer events.
    fn release_pointer(&mut self);
}

#[derive(Debug, Clone)]
struct ArmedDrag {
    event_id: String,
    original_start: DateTime<Local>,
    original_end: DateTime<Local>,
    /// Vertical distance between the pointer and the block top at arm time.
    grab_offset_y: f32,
    /// Block top at arm time, from the single-column geometry.
    initial_top: f32,
    /// Absolute pointer position at arm time, for the click threshold.
    pointer_start_y: f32,
}

/// Duration-preserving reschedule produced by a completed drag.
#[derive(Debug, Clone, PartialEq)]
pub struct RescheduleRequest {
    pub event_id: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Nothing was armed; a stray or double-fired release.
    NotArmed,
    /// Travel stayed under the click threshold. No mutation; the block's
    /// own click handler opens the edit view.
    Click { event_id: String },
    /// The drag netted out to the original slot after snapping. No mutation.
    Unmoved { event_id: String },
    /// The grid's layout reference was gone at release. No mutation.
    Aborted,
    /// A real move; forward to the persistence boundary.
    Reschedule(RescheduleRequest),
}

/// Pointer-driven reschedule state machine: `Idle` until a pointer-down on
/// an event block, armed until the matching pointer-up.
#[derive(Default)]
pub struct DragController {
    armed: Option<ArmedDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Arm a drag from a pointer-down on a rendered event block.
    ///
    /// Captures the block's current top under the single-column geometry,
    /// the pointer/block offset, and the pointer's absolute start position,
    /// then acquires surface-wide pointer routing.
    pub fn pointer_down(&mut self, surface: &mut dyn DragSurface, event: &Event, pointer: Pos2) {
        if self.armed.is_some() {
            return;
        }
        let Some(grid) = surface.grid_rect() else {
            return;
        };

        let initial_top = geometry::time_to_top(event.start);
        self.armed = Some(ArmedDrag {
            event_id: event.id.clone(),
            original_start: event.start,
            original_end: event.end,
            grab_offset_y: pointer.y - grid.top() - initial_top,
            initial_top,
            pointer_start_y: pointer.y,
        });
        surface.capture_pointer();
        log::debug!("Drag armed on event {}", event.id);
    }

    /// Ghost top for the live preview, clamped so the block cannot be
    /// dragged above the grid start. Preview only; nothing is written.
    pub fn pointer_move(&self, surface: &dyn DragSurface, pointer: Pos2) -> Option<f32> {
        let armed = self.armed.as_ref()?;
        let grid = surface.grid_rect()?;
        Some((pointer.y - grid.top() - armed.grab_offset_y).max(TOP_OFFSET))
    }

    /// Resolve a pointer-up.
    ///
    /// The armed state is cleared and the pointer capture released before
    /// the outcome is decided, so every path leaves the surface clean.
    pub fn pointer_up(&mut self, surface: &mut dyn DragSurface, pointer: Pos2) -> DragOutcome {
        let Some(armed) = self.armed.take() else {
            return DragOutcome::NotArmed;
        };
        surface.release_pointer();

        let Some(grid) = surface.grid_rect() else {
            log::debug!("Drag on {} aborted: grid layout unavailable", armed.event_id);
            return DragOutcome::Aborted;
        };

        let distance_moved = (pointer.y - armed.pointer_start_y).abs();
        if distance_moved < CLICK_THRESHOLD_PX {
            return DragOutcome::Click {
                event_id: armed.event_id,
            };
        }

        let final_top = (pointer.y - grid.top() - armed.grab_offset_y).max(TOP_OFFSET);
        let raw_delta_minutes = (final_top - armed.initial_top) / PIXELS_PER_HOUR * 60.0;
        let snapped_delta = geometry::snap_nearest(raw_delta_minutes);
        if snapped_delta == 0 {
            return DragOutcome::Unmoved {
                event_id: armed.event_id,
            };
        }

        let start = armed.original_start + Duration::minutes(snapped_delta);
        let end = start + (armed.original_end - armed.original_start);
        log::debug!(
            "Drag on {} snapped to {} minute(s); rescheduling",
            armed.event_id,
            snapped_delta
        );
        DragOutcome::Reschedule(RescheduleRequest {
            event_id: armed.event_id,
            start,
            end,
        })
    }

    /// Unmount path: drop any armed drag and release the capture.
    pub fn cancel(&mut self, surface: &mut dyn DragSurface) {
        if self.armed.take().is_some() {
            surface.release_pointer();
        }
    }
}

/// Send a reschedule to the store without waiting on the outcome. Failure
/// is logged and dropped; the pre-drag position simply stays on screen until
/// the user retries or the next push corrects it.
pub fn dispatch_reschedule(store: &dyn CalendarStore, request: &RescheduleRequest) {
    if let Err(err) = store.update_event(
        &request.event_id,
        EventPatch::reschedule(request.start, request.end),
    ) {
        log::error!("Failed to move event {}: {}", request.event_id, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventKind;
    use chrono::TimeZone;
    use egui::{pos2, vec2};
    use pretty_assertions::assert_eq;

    const GRID_TOP: f32 = 100.0;

    fn grid_rect() -> Rect {
        Rect::from_min_size(pos2(0.0, GRID_TOP), vec2(700.0, 1500.0))
    }

    fn nine_to_ten() -> Event {
        Event {
            id: "evt-1".to_string(),
            title: "Planning".to_string(),
            start: Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            end: Local.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap(),
            kind: EventKind::InPerson,
            location: Some("Room 4".to_string()),
            meeting_url: None,
            calendar_id: "cal-1".to_string(),
            is_live: false,
            owner_id: "user-1".to_string(),
        }
    }

    /// Surface that expects one capture and one release around the drag.
    fn surface_for_one_drag() -> MockDragSurface {
        let mut surface = MockDragSurface::new();
        surface
            .expect_grid_rect()
            .returning(|| Some(grid_rect()));
        surface.expect_capture_pointer().times(1).return_const(());
        surface.expect_release_pointer().times(1).return_const(());
        surface
    }

    /// Pointer y that grabs the block 10px below its top edge.
    fn grab_y(event: &Event) -> f32 {
        GRID_TOP + geometry::time_to_top(event.start) + 10.0
    }

    #[test]
    fn test_small_travel_is_a_click_not_a_drag() {
        let mut surface = surface_for_one_drag();
        let mut drag = DragController::new();
        let event = nine_to_ten();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        // Intervening moves do not promote a click into a drag.
        drag.pointer_move(&surface, pos2(10.0, down_y + 3.0));
        drag.pointer_move(&surface, pos2(10.0, down_y + 1.0));
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, down_y + 4.9));

        assert_eq!(
            outcome,
            DragOutcome::Click {
                event_id: "evt-1".to_string()
            }
        );
        assert!(!drag.is_armed());
    }

    #[test]
    fn test_drag_that_snaps_to_zero_is_unmoved() {
        let mut surface = surface_for_one_drag();
        let mut drag = DragController::new();
        let event = nine_to_ten();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        // 6px is past the click threshold but rounds to the same slot.
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, down_y + 6.0));

        assert_eq!(
            outcome,
            DragOutcome::Unmoved {
                event_id: "evt-1".to_string()
            }
        );
    }

    #[test]
    fn test_sixty_one_pixels_down_moves_one_hour() {
        let mut surface = surface_for_one_drag();
        let mut drag = DragController::new();
        let event = nine_to_ten();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, down_y + 61.0));

        let expected_start = Local.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap();
        let expected_end = Local.with_ymd_and_hms(2025, 3, 10, 11, 0, 0).unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Reschedule(RescheduleRequest {
                event_id: "evt-1".to_string(),
                start: expected_start,
                end: expected_end,
            })
        );
    }

    #[test]
    fn test_reschedule_preserves_duration_exactly() {
        let mut surface = surface_for_one_drag();
        let mut drag = DragController::new();
        let mut event = nine_to_ten();
        event.end = Local.with_ymd_and_hms(2025, 3, 10, 10, 25, 0).unwrap();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        // 22px of travel snaps to one 15-minute step.
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, down_y + 22.0));

        let DragOutcome::Reschedule(request) = outcome else {
            panic!("expected a reschedule");
        };
        assert_eq!(request.end - request.start, event.end - event.start);
        assert_eq!(
            request.start,
            Local.with_ymd_and_hms(2025, 3, 10, 9, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_upward_drag_produces_negative_snap() {
        let mut surface = surface_for_one_drag();
        let mut drag = DragController::new();
        let event = nine_to_ten();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, down_y - 23.0));

        let DragOutcome::Reschedule(request) = outcome else {
            panic!("expected a reschedule");
        };
        assert_eq!(
            request.start,
            Local.with_ymd_and_hms(2025, 3, 10, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_ghost_is_clamped_to_grid_start() {
        let mut surface = MockDragSurface::new();
        surface.expect_grid_rect().returning(|| Some(grid_rect()));
        surface.expect_capture_pointer().times(1).return_const(());
        let mut drag = DragController::new();
        let mut event = nine_to_ten();
        event.start = Local.with_ymd_and_hms(2025, 3, 10, 0, 30, 0).unwrap();
        event.end = Local.with_ymd_and_hms(2025, 3, 10, 1, 0, 0).unwrap();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        // Dragging far above the grid pins the ghost at the top offset.
        let ghost = drag.pointer_move(&surface, pos2(10.0, GRID_TOP - 400.0));
        assert_eq!(ghost, Some(TOP_OFFSET));
    }

    #[test]
    fn test_pointer_up_without_arm_is_ignored() {
        // No capture was taken, so nothing may be released either.
        let mut surface = MockDragSurface::new();
        surface.expect_release_pointer().times(0);
        let mut drag = DragController::new();
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, 500.0));
        assert_eq!(outcome, DragOutcome::NotArmed);
    }

    #[test]
    fn test_unmounted_grid_aborts_but_still_releases() {
        let mut surface = MockDragSurface::new();
        let mut mounted = true;
        surface.expect_grid_rect().returning(move || {
            let rect = mounted.then(grid_rect);
            mounted = false;
            rect
        });
        surface.expect_capture_pointer().times(1).return_const(());
        surface.expect_release_pointer().times(1).return_const(());

        let mut drag = DragController::new();
        let event = nine_to_ten();
        drag.pointer_down(&mut surface, &event, pos2(10.0, grab_y(&event)));
        let outcome = drag.pointer_up(&mut surface, pos2(10.0, grab_y(&event) + 61.0));

        assert_eq!(outcome, DragOutcome::Aborted);
        assert!(!drag.is_armed());
    }

    #[test]
    fn test_cancel_releases_only_when_armed() {
        let mut surface = MockDragSurface::new();
        surface.expect_grid_rect().returning(|| Some(grid_rect()));
        surface.expect_capture_pointer().times(1).return_const(());
        surface.expect_release_pointer().times(1).return_const(());

        let mut drag = DragController::new();
        let event = nine_to_ten();

        // Cancelling while idle touches nothing.
        drag.cancel(&mut surface);

        drag.pointer_down(&mut surface, &event, pos2(10.0, grab_y(&event)));
        drag.cancel(&mut surface);
        assert!(!drag.is_armed());

        // A release after cancel finds nothing armed.
        assert_eq!(
            drag.pointer_up(&mut surface, pos2(10.0, 500.0)),
            DragOutcome::NotArmed
        );
    }

    #[test]
    fn test_second_pointer_down_does_not_rearm() {
        let mut surface = surface_for_one_drag();
        let mut drag = DragController::new();
        let event = nine_to_ten();
        let down_y = grab_y(&event);

        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y));
        // A duplicate down (listener double-fire) must not re-capture.
        drag.pointer_down(&mut surface, &event, pos2(10.0, down_y + 2.0));

        let outcome = drag.pointer_up(&mut surface, pos2(10.0, down_y + 1.0));
        assert_eq!(
            outcome,
            DragOutcome::Click {
                event_id: "evt-1".to_string()
            }
        );
    }

    #[test]
    fn test_dispatch_reschedule_swallows_store_failure() {
        use crate::services::store::memory::InMemoryStore;

        let store = InMemoryStore::new();
        store.set_fail_requests(true);
        let request = RescheduleRequest {
            event_id: "evt-1".to_string(),
            start: Local.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap(),
            end: Local.with_ymd_and_hms(2025, 3, 10, 11, 0, 0).unwrap(),
        };
        // Must not panic or surface the error.
        dispatch_reschedule(&store, &request);
    }
}
