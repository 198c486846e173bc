//! Category distribution chart: the model behind the donut chart on the
//! category and tag pages. Everything here is plain data, so it is shared by
//! the server render, the hydrated client, and the tests.

mod controller;
mod distribution;
mod geometry;
mod tooltip;

pub use controller::{
    InteractionState, LeaveToken, PointerPosition, SectorInteractionController, VisibilitySet,
};
pub use distribution::{
    build_display_entries, CategoryDisplayEntry, CategoryRecord, UNNAMED_CATEGORY,
};
pub use geometry::{sector_path, sector_spans, DonutLayout, SectorSpan};
pub use tooltip::{place_tooltip, TooltipPlacement, TOOLTIP_OFFSET, TOOLTIP_WIDTH};

use std::time::Duration;

/// Period of the auto-cycling highlight.
pub const AUTO_CYCLE_INTERVAL: Duration = Duration::from_millis(3000);
/// Delay before a pointer leave hides the tooltip.
pub const LEAVE_DEBOUNCE: Duration = Duration::from_millis(50);
