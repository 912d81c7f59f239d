//! Routes raw pointer events from egui into the drag controller.

use super::TimetableApp;
use crate::ui_egui::drag::DragOutcome;
use egui::{CursorIcon, Event, Order, PointerButton, Pos2};

impl TimetableApp {
    pub(super) fn handle_pointer(&mut self, ctx: &egui::Context) {
        let Some(canvas) = self.canvas else {
            return;
        };

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            match event {
                Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    ..
                } => {
                    if canvas.contains(pos) && is_over_grid(ctx, pos) {
                        self.press(button, pos, canvas);
                    }
                }
                Event::PointerMoved(pos) => {
                    self.drag.pointer_move(pos);
                }
                Event::PointerButton {
                    button: PointerButton::Primary,
                    pressed: false,
                    ..
                } => self.release(),
                Event::PointerGone => {
                    if self.drag.cancel() {
                        log::debug!("Pointer left the window, drag cancelled");
                    }
                }
                _ => {}
            }
        }

        if self.drag.is_dragging() {
            ctx.set_cursor_icon(CursorIcon::Grabbing);
            ctx.request_repaint();
        } else if ctx
            .pointer_hover_pos()
            .and_then(|pos| self.layout.hit_test(self.timetable.classes(), canvas, pos))
            .is_some()
        {
            ctx.set_cursor_icon(CursorIcon::Grab);
        }
    }

    fn press(&mut self, button: PointerButton, pos: Pos2, canvas: egui::Rect) {
        let Some(class) = self
            .layout
            .hit_test(self.timetable.classes(), canvas, pos)
            .cloned()
        else {
            if button == PointerButton::Primary && !self.drag.is_dragging() {
                self.timetable.clear_selection();
            }
            return;
        };

        if let Err(e) = self.drag.pointer_down(&class, button, pos, canvas) {
            log::warn!("Cannot drag class {}: {}", class.id, e);
        }
    }

    fn release(&mut self) {
        match self.drag.pointer_up(&mut self.timetable) {
            DragOutcome::Moved { id, update } => {
                log::debug!("Committed move of {} to {}", id, update.day);
                self.status = None;
                self.persist();
            }
            DragOutcome::Selected(id) => log::debug!("Selected class {}", id),
            DragOutcome::Ignored => {}
        }
    }
}

/// Presses over a floating window belong to that window, not the grid
fn is_over_grid(ctx: &egui::Context, pos: Pos2) -> bool {
    ctx.layer_id_at(pos)
        .map_or(true, |layer| layer.order == Order::Background)
}
