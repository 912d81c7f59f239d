// Drag-to-reschedule
//
// One class at a time can be picked up and moved to another day or start
// time. The session lives only between pointer-down and pointer-up; moves
// update a preview, and only release commits anything.

use egui::{PointerButton, Pos2, Rect, Vec2};

use crate::models::event::{ClassEvent, Day, EventId, MoveUpdate};
use crate::models::settings::{DragSettings, Settings};
use crate::services::layout::{GridLayout, DAY_COUNT};
use crate::utils::time::{self, TimeError};

/// Callbacks a finished drag reports to. Supplied by the owner of the class
/// collection; the controller never hands itself out.
#[cfg_attr(test, mockall::automock)]
pub trait DragHandler {
    /// Released without moving past the threshold
    fn on_select(&mut self, event: ClassEvent);
    /// Released after a real move
    fn on_commit_move(&mut self, id: EventId, update: MoveUpdate);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// No session was active
    Ignored,
    Selected(EventId),
    Moved { id: EventId, update: MoveUpdate },
}

/// Where the dragged block should be drawn this frame
#[derive(Clone, Debug, PartialEq)]
pub struct DragPreview {
    pub event_id: EventId,
    /// Absolute screen rect of the block
    pub rect: Rect,
    pub top_px: f32,
    pub left_percent: f32,
    pub day: Day,
    pub moved: bool,
}

/// State captured at pointer-down and refreshed on every move
#[derive(Clone, Debug)]
pub struct DragSession {
    event: ClassEvent,
    /// Canvas rect at drag start, in screen pixels
    canvas: Rect,
    block_size: Vec2,
    /// Pointer position relative to the block's top-left corner
    pointer_offset: Vec2,
    duration_minutes: i32,
    /// Block top-left relative to the canvas when the drag began
    origin: Vec2,
    /// Latest clamped block top-left relative to the canvas
    candidate: Vec2,
    day_index: usize,
    moved: bool,
}

impl DragSession {
    fn day(&self) -> Day {
        Day::from_index(self.day_index).unwrap_or(self.event.day)
    }

    fn preview(&self) -> DragPreview {
        let left_percent = if self.canvas.width() > 0.0 {
            self.candidate.x / self.canvas.width() * 100.0
        } else {
            0.0
        };
        DragPreview {
            event_id: self.event.id.clone(),
            rect: Rect::from_min_size(self.canvas.min + self.candidate, self.block_size),
            top_px: self.candidate.y,
            left_percent,
            day: self.day(),
            moved: self.moved,
        }
    }
}

#[derive(Clone, Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Tracks at most one drag session
pub struct DragController {
    layout: GridLayout,
    drag: DragSettings,
    state: DragState,
}

impl DragController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            layout: GridLayout::new(settings.grid),
            drag: settings.drag,
            state: DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    pub fn dragged_id(&self) -> Option<&EventId> {
        self.session().map(|session| &session.event.id)
    }

    pub fn preview(&self) -> Option<DragPreview> {
        self.session().map(DragSession::preview)
    }

    /// Pick up `event`. Returns `Ok(false)` when the press is ignored: not the
    /// primary button, or another class is already being dragged.
    pub fn pointer_down(
        &mut self,
        event: &ClassEvent,
        button: PointerButton,
        pointer: Pos2,
        canvas: Rect,
    ) -> Result<bool, TimeError> {
        if button != PointerButton::Primary {
            return Ok(false);
        }
        if let Some(active) = self.dragged_id() {
            log::debug!(
                "Ignoring pointer-down on class {} while {} is being dragged",
                event.id,
                active
            );
            return Ok(false);
        }

        let block = self.layout.layout(event, canvas.size())?.to_pixels(canvas);
        let duration_minutes = time::duration_minutes(&event.start_time, &event.end_time)?;
        let origin = block.min - canvas.min;

        self.state = DragState::Dragging(DragSession {
            event: event.clone(),
            canvas,
            block_size: block.size(),
            pointer_offset: pointer - block.min,
            duration_minutes,
            origin,
            candidate: origin,
            day_index: event.day.index(),
            moved: false,
        });
        log::debug!("Started dragging class {}", event.id);

        Ok(true)
    }

    /// Follow the pointer. The block is kept entirely inside the canvas.
    pub fn pointer_move(&mut self, pointer: Pos2) -> Option<DragPreview> {
        let DragState::Dragging(session) = &mut self.state else {
            return None;
        };

        let raw = pointer - session.canvas.min - session.pointer_offset;
        let max_left = (session.canvas.width() - session.block_size.x).max(0.0);
        let max_top = (session.canvas.height() - session.block_size.y).max(0.0);
        let candidate = Vec2::new(raw.x.min(max_left).max(0.0), raw.y.min(max_top).max(0.0));

        if !session.moved && (candidate - session.origin).length() > self.drag.threshold_px {
            session.moved = true;
        }
        session.candidate = candidate;
        session.day_index =
            day_index_at(candidate.x, self.layout.column_width(session.canvas.width()));

        Some(session.preview())
    }

    /// Finish the session: a click selects, a real move commits.
    pub fn pointer_up(&mut self, handler: &mut dyn DragHandler) -> DragOutcome {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return DragOutcome::Ignored;
        };

        let id = session.event.id.clone();
        if !session.moved {
            handler.on_select(session.event);
            return DragOutcome::Selected(id);
        }

        let update = self.resolve_move(&session);
        log::info!(
            "Moving class {} to {} {}-{}",
            id,
            update.day,
            update.start_time,
            update.end_time
        );
        handler.on_commit_move(id.clone(), update.clone());

        DragOutcome::Moved { id, update }
    }

    /// Drop the session without committing. Returns whether one was active.
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!("Cancelled drag of class {}", session.event.id);
                true
            }
            DragState::Idle => false,
        }
    }

    fn resolve_move(&self, session: &DragSession) -> MoveUpdate {
        let grid = self.layout.grid();
        let pixels_per_hour = self.layout.pixels_per_hour(session.canvas.height());
        let max_start = (grid.total_minutes() - session.duration_minutes).max(0);

        let minutes_from_top = if pixels_per_hour > 0.0 {
            session.candidate.y * 60.0 / pixels_per_hour
        } else {
            0.0
        };
        let clamped = minutes_from_top.min(max_start as f32).max(0.0);
        let offset = quantize(clamped, self.drag.snap_minutes, max_start);

        let start = grid.start_minutes() + offset;
        MoveUpdate {
            day: session.day(),
            start_time: time::minutes_to_time(start),
            end_time: time::minutes_to_time(start + session.duration_minutes),
        }
    }
}

fn day_index_at(left: f32, column_width: f32) -> usize {
    if column_width <= 0.0 {
        return 0;
    }
    ((left / column_width).round() as i64).clamp(0, DAY_COUNT as i64 - 1) as usize
}

/// Snap to the nearest multiple of `snap`, stepping down one interval if
/// rounding up would push the class past `max_start`.
fn quantize(minutes: f32, snap: u32, max_start: i32) -> i32 {
    let snap = snap.max(1) as i32;
    let snapped = (minutes / snap as f32).round() as i32 * snap;
    if snapped > max_start {
        (snapped - snap).max(0)
    } else {
        snapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    // 700 x 780 canvas at (50, 40): 100px day columns, 60px hour rows
    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(50.0, 40.0), Vec2::new(700.0, 780.0))
    }

    fn math_class() -> ClassEvent {
        ClassEvent::builder()
            .id("math")
            .subject("Mathematics")
            .day(Day::Monday)
            .start_time("09:00")
            .end_time("10:30")
            .build()
            .unwrap()
    }

    fn controller() -> DragController {
        DragController::new(&Settings::default())
    }

    /// Press 10px right and 10px below the block's top-left corner
    fn press(controller: &mut DragController, event: &ClassEvent) {
        let block = GridLayout::default()
            .layout(event, canvas().size())
            .unwrap()
            .to_pixels(canvas());
        let started = controller
            .pointer_down(event, PointerButton::Primary, block.min + Vec2::splat(10.0), canvas())
            .unwrap();
        assert!(started);
    }

    /// Pointer position that puts the block's top-left at `left`/`top` in canvas space
    fn pointer_for(left: f32, top: f32) -> Pos2 {
        canvas().min + Vec2::new(left + 10.0, top + 10.0)
    }

    #[test]
    fn test_drag_to_tuesday_afternoon_snaps_and_keeps_duration() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        // 14:03 is 363 minutes after 08:00
        controller.pointer_move(pointer_for(100.0, 363.0));

        let mut handler = MockDragHandler::new();
        handler.expect_on_select().never();
        handler
            .expect_on_commit_move()
            .with(
                eq(EventId::from("math")),
                eq(MoveUpdate {
                    day: Day::Tuesday,
                    start_time: "14:05".to_string(),
                    end_time: "15:35".to_string(),
                }),
            )
            .times(1)
            .return_const(());

        let outcome = controller.pointer_up(&mut handler);
        assert!(matches!(outcome, DragOutcome::Moved { .. }));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_click_without_move_selects() {
        let mut controller = controller();
        let event = math_class();
        press(&mut controller, &event);

        let mut handler = MockDragHandler::new();
        handler
            .expect_on_select()
            .withf(|selected| selected.id.as_str() == "math")
            .times(1)
            .return_const(());
        handler.expect_on_commit_move().never();

        assert_eq!(
            controller.pointer_up(&mut handler),
            DragOutcome::Selected(EventId::from("math"))
        );
    }

    #[test]
    fn test_jitter_under_threshold_is_still_a_click() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        // Block starts at (0, 60); 2px right, 2px down is ~2.8px
        controller.pointer_move(pointer_for(2.0, 62.0));

        let mut handler = MockDragHandler::new();
        handler.expect_on_select().times(1).return_const(());
        handler.expect_on_commit_move().never();

        assert!(matches!(
            controller.pointer_up(&mut handler),
            DragOutcome::Selected(_)
        ));
    }

    #[test]
    fn test_moved_flag_sticks_after_returning_to_origin() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        controller.pointer_move(pointer_for(0.0, 120.0));
        let preview = controller.pointer_move(pointer_for(0.0, 60.0)).unwrap();
        assert!(preview.moved);

        let mut handler = MockDragHandler::new();
        handler
            .expect_on_commit_move()
            .withf(|_, update| update.start_time == "09:00" && update.end_time == "10:30")
            .times(1)
            .return_const(());

        assert!(matches!(
            controller.pointer_up(&mut handler),
            DragOutcome::Moved { .. }
        ));
    }

    #[test]
    fn test_drag_above_canvas_clamps_to_first_hour() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        let preview = controller.pointer_move(pointer_for(0.0, -500.0)).unwrap();
        assert_eq!(preview.top_px, 0.0);

        let mut handler = MockDragHandler::new();
        handler
            .expect_on_commit_move()
            .withf(|_, update| {
                update.day == Day::Monday
                    && update.start_time == "08:00"
                    && update.end_time == "09:30"
            })
            .times(1)
            .return_const(());

        controller.pointer_up(&mut handler);
    }

    #[test]
    fn test_drag_below_canvas_keeps_class_inside() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        let preview = controller.pointer_move(pointer_for(650.0, 5000.0)).unwrap();
        assert_eq!(preview.day, Day::Sunday);
        // 780 - 90px block
        assert_eq!(preview.top_px, 690.0);
        // block width is one column, so left stops at 600
        assert!((preview.left_percent - 600.0 / 7.0).abs() < 1e-3);

        let mut handler = MockDragHandler::new();
        handler
            .expect_on_commit_move()
            .withf(|_, update| {
                update.day == Day::Sunday
                    && update.start_time == "19:30"
                    && update.end_time == "21:00"
            })
            .times(1)
            .return_const(());

        controller.pointer_up(&mut handler);
    }

    #[test]
    fn test_odd_duration_never_spills_past_canvas_end() {
        let mut controller = controller();
        let event = ClassEvent::builder()
            .id("lab")
            .subject("Lab")
            .day(Day::Friday)
            .start_time("09:00")
            .end_time("09:02")
            .build()
            .unwrap();
        press(&mut controller, &event);

        controller.pointer_move(pointer_for(400.0, 5000.0));

        let mut handler = MockDragHandler::new();
        // max start is 20:58; nearest 5 would be 21:00, so it steps back to 20:55
        handler
            .expect_on_commit_move()
            .withf(|_, update| update.start_time == "20:55" && update.end_time == "20:57")
            .times(1)
            .return_const(());

        controller.pointer_up(&mut handler);
    }

    #[test]
    fn test_day_rounds_to_nearest_column() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        assert_eq!(
            controller.pointer_move(pointer_for(149.0, 60.0)).unwrap().day,
            Day::Tuesday
        );
        assert_eq!(
            controller.pointer_move(pointer_for(151.0, 60.0)).unwrap().day,
            Day::Wednesday
        );
        assert_eq!(
            controller.pointer_move(pointer_for(-300.0, 60.0)).unwrap().day,
            Day::Monday
        );
    }

    #[test]
    fn test_commit_uses_latest_move() {
        let mut controller = controller();
        press(&mut controller, &math_class());

        controller.pointer_move(pointer_for(300.0, 300.0));
        controller.pointer_move(pointer_for(200.0, 120.0));

        let mut handler = MockDragHandler::new();
        handler
            .expect_on_commit_move()
            .withf(|_, update| update.day == Day::Wednesday && update.start_time == "10:00")
            .times(1)
            .return_const(());

        controller.pointer_up(&mut handler);
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut controller = controller();
        let first = math_class();
        press(&mut controller, &first);

        let other = ClassEvent::new("Physics", Day::Friday, "11:00", "12:00").unwrap();
        let started = controller
            .pointer_down(&other, PointerButton::Primary, canvas().center(), canvas())
            .unwrap();

        assert!(!started);
        assert_eq!(controller.dragged_id(), Some(&first.id));
    }

    #[test]
    fn test_secondary_button_does_not_start() {
        let mut controller = controller();
        let started = controller
            .pointer_down(&math_class(), PointerButton::Secondary, canvas().center(), canvas())
            .unwrap();

        assert!(!started);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_cancel_discards_without_callbacks() {
        let mut controller = controller();
        press(&mut controller, &math_class());
        controller.pointer_move(pointer_for(300.0, 300.0));

        assert!(controller.cancel());
        assert!(!controller.is_dragging());
        assert!(controller.preview().is_none());

        let mut handler = MockDragHandler::new();
        handler.expect_on_select().never();
        handler.expect_on_commit_move().never();
        assert_eq!(controller.pointer_up(&mut handler), DragOutcome::Ignored);
        assert!(!controller.cancel());
    }

    #[test]
    fn test_move_without_session_is_noop() {
        let mut controller = controller();
        assert!(controller.pointer_move(canvas().center()).is_none());
    }

    #[test]
    fn test_malformed_class_cannot_be_picked_up() {
        let mut controller = controller();
        let mut event = math_class();
        event.start_time = "nine".to_string();

        let result =
            controller.pointer_down(&event, PointerButton::Primary, canvas().center(), canvas());
        assert!(result.is_err());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_custom_snap_interval() {
        let mut settings = Settings::default();
        settings.drag.snap_minutes = 15;
        let mut controller = DragController::new(&settings);
        press(&mut controller, &math_class());

        // 09:08 rounds to 09:15 on a 15 minute grid
        controller.pointer_move(pointer_for(0.0, 68.0));

        let mut handler = MockDragHandler::new();
        handler
            .expect_on_commit_move()
            .withf(|_, update| update.start_time == "09:15" && update.end_time == "10:45")
            .times(1)
            .return_const(());

        controller.pointer_up(&mut handler);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(363.0, 5, 690), 365);
        assert_eq!(quantize(362.4, 5, 690), 360);
        assert_eq!(quantize(778.0, 5, 778), 775);
        assert_eq!(quantize(0.0, 5, 0), 0);
    }
}
