//! Interactive selection engine for Switchboard.
//!
//! Three interaction families built on one input-classification layer:
//!
//! - `list` + `matcher`: the incrementally fuzzy-filtered searchable list
//! - `step` + `wizard`: awaitable selection prompts chained into one
//!   composite choice with cancellation propagation
//! - `palette` + `quickpick`: the two-level chorded command palette and the
//!   single-key favourites overlay
//!
//! Components are plain state machines (`handle_key` returning an optional
//! terminal outcome) with an async `run` driver on top. A `run` future holds
//! the key-event receiver exclusively, so exactly one component ever sees
//! input.

pub mod flows;
pub mod keys;
pub mod list;
pub mod matcher;
pub mod palette;
pub mod quickpick;
pub mod render;
pub mod step;
pub mod terminal;
pub mod wizard;

pub use list::{Candidate, SearchableList};
pub use palette::{ChordedPalette, PaletteAction, PaletteEntry, PaletteGroup, PaletteOutcome};
pub use quickpick::{QuickPickOutcome, QuickPickOverlay};
pub use step::{SelectionStep, StepOutcome};
pub use wizard::{StepPlan, WizardFlow, WizardOutcome};
