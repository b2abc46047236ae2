//! Canvas type definitions: DragState, CanvasInput, CanvasEffect, SlotView.

use serde::{Deserialize, Serialize};

use crate::board::ContainerRect;

/// Interaction state of the layout canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A slot is selected; no button held.
    Selected(usize),
    /// A slot is being dragged.
    Dragging(usize),
}

impl DragState {
    /// Slot that is selected or being dragged.
    pub fn selected(&self) -> Option<usize> {
        match *self {
            DragState::Idle => None,
            DragState::Selected(i) | DragState::Dragging(i) => Some(i),
        }
    }

    /// Slot being dragged.
    pub fn dragging(&self) -> Option<usize> {
        match *self {
            DragState::Dragging(i) => Some(i),
            _ => None,
        }
    }
}

/// Discrete input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    /// Pointer pressed on a slot.
    Press { slot: usize },
    /// Pointer moved; `container` is the canvas box measured for this move.
    Move {
        pointer_x: f64,
        pointer_y: f64,
        container: ContainerRect,
    },
    /// Pointer released anywhere.
    Release,
    /// Host dropped the selection (tab switch, Escape, background click).
    ClearSelection,
    /// The owning draft removed a slot.
    SlotRemoved { slot: usize },
}

/// Side effect requested by a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasEffect {
    /// Notify the selection observer.
    Selected(usize),
    /// Selection dropped.
    SelectionCleared,
    /// Write the new anchor of a slot into the owning draft.
    PositionChanged { slot: usize, x: i32, y: i32 },
    /// Start listening for pointer move/release outside the canvas.
    AttachPointerListeners,
    /// Stop listening for pointer move/release.
    DetachPointerListeners,
}

/// Visual emphasis of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotEmphasis {
    Normal,
    Selected,
    Dragging,
}

/// Render model of one slot on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: usize,
    /// Index label shown above the title.
    pub label: String,
    /// Slot name, or `#n` when the name is empty.
    pub title: String,
    /// Center of the slot box, as percentages of the board.
    pub left_pct: f64,
    pub top_pct: f64,
    /// Size of the slot box, as percentages of the board.
    pub width_pct: f64,
    pub height_pct: f64,
    pub emphasis: SlotEmphasis,
    /// `"x, y"` readout, present while selected or dragging.
    pub coordinates: Option<String>,
}
