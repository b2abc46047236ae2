//! # SpreadKit Designer
//!
//! Layout editing for tarot spreads. Each spread has one ordered list of
//! card slots per locale; every slot carries an index label, a name, a
//! description and an anchor on a normalized 100 x 100 board.
//!
//! ## Core Components
//!
//! - **Board**: coordinate space, pointer conversion and clamping
//! - **Positions**: immutable add/remove/update of slot lists
//! - **Canvas**: drag-and-drop state machine as a pure reducer
//! - **Connectors**: reading-order segments between slots
//! - **Sync**: copying geometry from one locale to the other
//! - **Rendering**: thumbnail and canvas scenes, serialized to SVG
//! - **Editor**: two-locale session with undo/redo, save and delete
//! - **Documents**: offline JSON files holding a spread's locale rows
//!
//! ## Architecture
//!
//! ```text
//! SpreadEditor
//!   ├── LocaleDraft (en, zh)
//!   │     └── Positions (pure list operations)
//!   ├── CanvasController (reduce -> effects)
//!   │     └── Board (pointer -> board units)
//!   ├── Sync (active -> other locale)
//!   └── SpreadStore (create / replace / delete)
//!
//! Scene (thumbnail | canvas)
//!   ├── SlotView
//!   └── Connector
//! ```

pub mod board;
pub mod canvas;
pub mod connectors;
pub mod document;
pub mod editor;
pub mod positions;
pub mod svg_renderer;
pub mod sync;

pub use board::{
    board_to_fraction, pointer_to_board, BoardPoint, ContainerRect, BOARD_HEIGHT, BOARD_WIDTH,
    MAX_ANCHOR_Y, SLOT_HEIGHT, SLOT_WIDTH,
};
pub use canvas::{
    apply_effects, reduce, slot_views, CanvasController, CanvasEffect, CanvasInput, DragState,
    MoveCoalescer, SlotEmphasis, SlotView,
};
pub use connectors::{connector_order, connectors, index_sort_key, Connector};
pub use document::{DocumentMetadata, SpreadDocument};
pub use editor::{
    DeleteError, EditorOptions, LocaleDraft, SaveError, SaveOutcome, SpreadEditor,
    DEFAULT_HISTORY_LIMIT,
};
pub use positions::{
    add_position, clamp_positions, duplicate_indices, move_position, out_of_range, remove_position,
    update_field, PositionField,
};
pub use svg_renderer::{render_canvas, render_thumbnail, Scene};
pub use sync::{sync_layout, SyncReport};
