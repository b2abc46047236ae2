//! Layout canvas controller.
//!
//! The canvas is a three-state machine (`Idle`, `Selected(i)`,
//! `Dragging(i)`) driven by discrete pointer inputs. [`reduce`] is pure: it
//! maps the current state and one input to the next state plus the effects
//! the host must carry out. It never touches positions directly; position
//! writes come back as [`CanvasEffect::PositionChanged`].
//!
//! ```text
//! Idle / Selected(j) --press i--> Dragging(i)     [Selected(i), Attach]
//! Dragging(i) --move--> Dragging(i)               [PositionChanged(i, x, y)]
//! Dragging(i) --release--> Selected(i)            [Detach]
//! ```

mod types;

pub use types::{CanvasEffect, CanvasInput, DragState, SlotEmphasis, SlotView};

use spreadkit_core::{LayoutError, Position};

use crate::board::{board_to_fraction, pointer_to_board, slot_size_fraction};
use crate::positions::move_position;

/// Computes the next canvas state for one input.
///
/// `slot_count` is the length of the position list currently shown; presses
/// on slots outside it are ignored.
pub fn reduce(
    state: DragState,
    input: CanvasInput,
    slot_count: usize,
) -> (DragState, Vec<CanvasEffect>) {
    match (state, input) {
        (_, CanvasInput::Press { slot }) if slot >= slot_count => (state, Vec::new()),
        (DragState::Dragging(_), CanvasInput::Press { slot }) => {
            (DragState::Dragging(slot), vec![CanvasEffect::Selected(slot)])
        }
        (_, CanvasInput::Press { slot }) => (
            DragState::Dragging(slot),
            vec![
                CanvasEffect::Selected(slot),
                CanvasEffect::AttachPointerListeners,
            ],
        ),

        (
            DragState::Dragging(slot),
            CanvasInput::Move {
                pointer_x,
                pointer_y,
                container,
            },
        ) if slot < slot_count => {
            let point = pointer_to_board(pointer_x, pointer_y, &container);
            (
                state,
                vec![CanvasEffect::PositionChanged {
                    slot,
                    x: point.x,
                    y: point.y,
                }],
            )
        }
        (_, CanvasInput::Move { .. }) => (state, Vec::new()),

        (DragState::Dragging(slot), CanvasInput::Release) => (
            DragState::Selected(slot),
            vec![CanvasEffect::DetachPointerListeners],
        ),
        (_, CanvasInput::Release) => (state, Vec::new()),

        (DragState::Idle, CanvasInput::ClearSelection) => (state, Vec::new()),
        (DragState::Selected(_), CanvasInput::ClearSelection) => {
            (DragState::Idle, vec![CanvasEffect::SelectionCleared])
        }
        (DragState::Dragging(_), CanvasInput::ClearSelection) => (
            DragState::Idle,
            vec![
                CanvasEffect::DetachPointerListeners,
                CanvasEffect::SelectionCleared,
            ],
        ),

        (DragState::Idle, CanvasInput::SlotRemoved { .. }) => (state, Vec::new()),
        (DragState::Selected(current), CanvasInput::SlotRemoved { slot }) => {
            if current == slot {
                (DragState::Idle, vec![CanvasEffect::SelectionCleared])
            } else if current > slot {
                (DragState::Selected(current - 1), Vec::new())
            } else {
                (state, Vec::new())
            }
        }
        (DragState::Dragging(current), CanvasInput::SlotRemoved { slot }) => {
            if current == slot {
                (
                    DragState::Idle,
                    vec![
                        CanvasEffect::DetachPointerListeners,
                        CanvasEffect::SelectionCleared,
                    ],
                )
            } else if current > slot {
                (DragState::Dragging(current - 1), Vec::new())
            } else {
                (state, Vec::new())
            }
        }
    }
}

/// Applies the position writes among `effects` to a position list.
pub fn apply_effects(
    positions: &[Position],
    effects: &[CanvasEffect],
) -> Result<Vec<Position>, LayoutError> {
    let mut next = positions.to_vec();
    for effect in effects {
        if let CanvasEffect::PositionChanged { slot, x, y } = *effect {
            next = move_position(&next, slot, x, y)?;
        }
    }
    Ok(next)
}

/// Stateful wrapper around [`reduce`] that also tracks whether pointer
/// listeners are attached.
#[derive(Debug, Clone, Default)]
pub struct CanvasController {
    state: DragState,
    listening: bool,
}

impl CanvasController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether move/release listeners are currently attached.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Feeds one input and returns the effects to carry out.
    pub fn handle(&mut self, input: CanvasInput, slot_count: usize) -> Vec<CanvasEffect> {
        let (next, effects) = reduce(self.state, input, slot_count);
        if next != self.state {
            tracing::trace!(from = ?self.state, to = ?next, "canvas transition");
        }
        for effect in &effects {
            match effect {
                CanvasEffect::AttachPointerListeners => self.listening = true,
                CanvasEffect::DetachPointerListeners => self.listening = false,
                _ => {}
            }
        }
        self.state = next;
        effects
    }
}

/// Keeps only the latest pointer move between animation frames.
///
/// The host pushes every move event and flushes once per frame; layout is
/// read and the position recomputed only for the last move.
#[derive(Debug, Clone, Default)]
pub struct MoveCoalescer {
    pending: Option<CanvasInput>,
    dropped: usize,
}

impl MoveCoalescer {
    /// Creates an empty coalescer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a move, replacing any move not yet flushed. Non-move inputs
    /// are returned unchanged so the caller can handle them immediately.
    pub fn push(&mut self, input: CanvasInput) -> Option<CanvasInput> {
        match input {
            CanvasInput::Move { .. } => {
                if self.pending.replace(input).is_some() {
                    self.dropped += 1;
                }
                None
            }
            other => Some(other),
        }
    }

    /// Takes the pending move, if any.
    pub fn flush(&mut self) -> Option<CanvasInput> {
        self.pending.take()
    }

    /// Number of moves superseded before they were flushed.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Render model for every slot, in list order.
pub fn slot_views(positions: &[Position], state: DragState) -> Vec<SlotView> {
    let (w, h) = slot_size_fraction();
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let (fx, fy) = board_to_fraction(p.x, p.y);
            let emphasis = match state {
                DragState::Dragging(d) if d == i => SlotEmphasis::Dragging,
                DragState::Selected(s) if s == i => SlotEmphasis::Selected,
                _ => SlotEmphasis::Normal,
            };
            let title = if p.name.is_empty() {
                format!("#{}", i + 1)
            } else {
                p.name.clone()
            };
            SlotView {
                slot: i,
                label: p.index.clone(),
                title,
                left_pct: fx * 100.0,
                top_pct: fy * 100.0,
                width_pct: w * 100.0,
                height_pct: h * 100.0,
                emphasis,
                coordinates: (emphasis != SlotEmphasis::Normal)
                    .then(|| format!("{}, {}", p.x, p.y)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ContainerRect;

    fn mv(x: f64, y: f64) -> CanvasInput {
        CanvasInput::Move {
            pointer_x: x,
            pointer_y: y,
            container: ContainerRect::new(0.0, 0.0, 200.0, 200.0),
        }
    }

    #[test]
    fn test_press_selects_and_starts_drag() {
        let (state, effects) = reduce(DragState::Idle, CanvasInput::Press { slot: 1 }, 3);
        assert_eq!(state, DragState::Dragging(1));
        assert_eq!(
            effects,
            vec![
                CanvasEffect::Selected(1),
                CanvasEffect::AttachPointerListeners
            ]
        );
    }

    #[test]
    fn test_press_out_of_range_is_ignored() {
        let (state, effects) = reduce(DragState::Selected(0), CanvasInput::Press { slot: 3 }, 3);
        assert_eq!(state, DragState::Selected(0));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_move_only_while_dragging() {
        let (state, effects) = reduce(DragState::Selected(0), mv(80.0, 80.0), 1);
        assert_eq!(state, DragState::Selected(0));
        assert!(effects.is_empty());

        let (state, effects) = reduce(DragState::Dragging(0), mv(80.0, 80.0), 1);
        assert_eq!(state, DragState::Dragging(0));
        assert_eq!(
            effects,
            vec![CanvasEffect::PositionChanged { slot: 0, x: 40, y: 40 }]
        );
    }

    #[test]
    fn test_release_keeps_selection() {
        let (state, effects) = reduce(DragState::Dragging(2), CanvasInput::Release, 3);
        assert_eq!(state, DragState::Selected(2));
        assert_eq!(effects, vec![CanvasEffect::DetachPointerListeners]);

        let (state, effects) = reduce(DragState::Idle, CanvasInput::Release, 3);
        assert_eq!(state, DragState::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_clear_selection_detaches_during_drag() {
        let (state, effects) = reduce(DragState::Dragging(0), CanvasInput::ClearSelection, 1);
        assert_eq!(state, DragState::Idle);
        assert!(effects.contains(&CanvasEffect::DetachPointerListeners));
    }

    #[test]
    fn test_slot_removed_shifts_selection() {
        let (state, _) = reduce(DragState::Selected(2), CanvasInput::SlotRemoved { slot: 0 }, 2);
        assert_eq!(state, DragState::Selected(1));

        let (state, effects) =
            reduce(DragState::Selected(1), CanvasInput::SlotRemoved { slot: 1 }, 2);
        assert_eq!(state, DragState::Idle);
        assert_eq!(effects, vec![CanvasEffect::SelectionCleared]);

        let (state, _) = reduce(DragState::Dragging(0), CanvasInput::SlotRemoved { slot: 3 }, 3);
        assert_eq!(state, DragState::Dragging(0));
    }

    #[test]
    fn test_controller_tracks_listeners() {
        let mut canvas = CanvasController::new();
        assert!(!canvas.is_listening());
        canvas.handle(CanvasInput::Press { slot: 0 }, 1);
        assert!(canvas.is_listening());
        canvas.handle(mv(10.0, 10.0), 1);
        assert!(canvas.is_listening());
        canvas.handle(CanvasInput::Release, 1);
        assert!(!canvas.is_listening());
        assert_eq!(canvas.state(), DragState::Selected(0));
    }

    #[test]
    fn test_apply_effects() {
        let positions = vec![Position::new("1", 0, 0).with_text("Past", "")];
        let next = apply_effects(
            &positions,
            &[
                CanvasEffect::Selected(0),
                CanvasEffect::PositionChanged { slot: 0, x: 40, y: 40 },
            ],
        )
        .unwrap();
        assert_eq!(next[0], Position::new("1", 40, 40).with_text("Past", ""));
    }

    #[test]
    fn test_coalescer_keeps_latest_move() {
        let mut frames = MoveCoalescer::new();
        assert!(frames.push(mv(1.0, 1.0)).is_none());
        assert!(frames.push(mv(2.0, 2.0)).is_none());
        assert_eq!(frames.push(CanvasInput::Release), Some(CanvasInput::Release));
        assert_eq!(frames.flush(), Some(mv(2.0, 2.0)));
        assert_eq!(frames.flush(), None);
        assert_eq!(frames.dropped(), 1);
    }

    #[test]
    fn test_slot_views() {
        let positions = vec![
            Position::new("1", 50, 40).with_text("Past", ""),
            Position::new("2", 0, 0),
        ];
        let views = slot_views(&positions, DragState::Selected(0));
        assert_eq!(views[0].title, "Past");
        assert_eq!(views[0].emphasis, SlotEmphasis::Selected);
        assert_eq!(views[0].coordinates.as_deref(), Some("50, 40"));
        assert_eq!(views[0].left_pct, 50.0);
        assert_eq!(views[0].top_pct, 40.0);
        assert_eq!(views[1].title, "#2");
        assert_eq!(views[1].coordinates, None);
        assert!((views[1].width_pct - 13.814).abs() < 1e-9);
    }
}
