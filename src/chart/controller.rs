use std::collections::HashSet;

use super::distribution::CategoryDisplayEntry;

/// Pointer coordinates relative to the chart container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    /// Index into the *visible* entries, not the full list.
    pub active_index: Option<usize>,
    pub hovered_category: Option<String>,
    pub pointer: PointerPosition,
    pub tooltip_visible: bool,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.active_index.is_none() && self.hovered_category.is_none() && !self.tooltip_visible
    }
}

/// Names of the categories currently drawn in the chart.
///
/// Once populated the set never becomes empty: hiding the last member is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    names: HashSet<String>,
}

impl VisibilitySet {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            names: names.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Flips membership of `name`. Returns false when the flip was refused.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            if self.names.len() == 1 {
                return false;
            }
            self.names.remove(name);
        } else {
            self.names.insert(name.to_string());
        }
        true
    }
}

/// Issued when the pointer leaves the chart; redeemed after the debounce delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveToken(u64);

/// Hover, selection and tooltip state for one rendered distribution chart.
///
/// Event handlers and the auto-cycle timer call into this type; it never
/// schedules anything itself, so the host owns every timer.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorInteractionController {
    entries: Vec<CategoryDisplayEntry>,
    visible: VisibilitySet,
    state: InteractionState,
    // bumped by every hover, so stale leave tokens can be told apart
    hover_epoch: u64,
}

impl SectorInteractionController {
    pub fn new(entries: Vec<CategoryDisplayEntry>) -> Self {
        let visible = VisibilitySet::new(entries.iter().map(|e| e.name.as_str()));
        Self {
            entries,
            visible,
            state: InteractionState::default(),
            hover_epoch: 0,
        }
    }

    pub fn entries(&self) -> &[CategoryDisplayEntry] {
        &self.entries
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn visibility(&self) -> &VisibilitySet {
        &self.visible
    }

    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.contains(name)
    }

    fn visible_iter(&self) -> impl Iterator<Item = &CategoryDisplayEntry> {
        self.entries
            .iter()
            .filter(|e| self.visible.contains(&e.name))
    }

    pub fn visible_entries(&self) -> Vec<&CategoryDisplayEntry> {
        self.visible_iter().collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_iter().count()
    }

    fn visible_position(&self, name: &str) -> Option<usize> {
        self.visible_iter().position(|e| e.name == name)
    }

    /// The highlighted entry, or `None` when nothing is active or the index
    /// no longer resolves.
    pub fn active_entry(&self) -> Option<&CategoryDisplayEntry> {
        let index = self.state.active_index?;
        self.visible_iter().nth(index)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_entry().is_some_and(|e| e.name == name)
    }

    fn clear_highlight(&mut self) {
        self.state.active_index = None;
        self.state.hovered_category = None;
        self.state.tooltip_visible = false;
    }

    pub fn sector_enter(&mut self, index: usize) -> bool {
        let name = match self.visible_entries().get(index) {
            Some(entry) => entry.name.clone(),
            None => return false,
        };
        self.hover_epoch += 1;
        self.state.active_index = Some(index);
        self.state.hovered_category = Some(name);
        self.state.tooltip_visible = true;
        true
    }

    /// Drops the hover right away so auto-cycling can resume, but leaves the
    /// tooltip up until [`Self::settle_leave`] is called with the returned token.
    pub fn pointer_leave(&mut self) -> LeaveToken {
        self.state.hovered_category = None;
        LeaveToken(self.hover_epoch)
    }

    /// Hides the tooltip unless a sector was entered again since `token` was
    /// issued. The highlight is kept while a legend entry is hovered.
    pub fn settle_leave(&mut self, token: LeaveToken) -> bool {
        if token.0 != self.hover_epoch {
            return false;
        }
        self.state.tooltip_visible = false;
        if self.state.hovered_category.is_none() {
            self.state.active_index = None;
        }
        true
    }

    /// Legend hover highlights a sector without bringing up the tooltip. It
    /// leaves a pending chart leave in place, so the sector tooltip still goes.
    pub fn legend_enter(&mut self, name: &str) -> bool {
        let Some(index) = self.visible_position(name) else {
            return false;
        };
        self.state.active_index = Some(index);
        self.state.hovered_category = Some(name.to_string());
        true
    }

    pub fn legend_leave(&mut self) {
        self.state.hovered_category = None;
        if !self.state.tooltip_visible {
            self.state.active_index = None;
        }
    }

    /// Shows or hides `name`. Hiding the last visible category is refused.
    pub fn toggle(&mut self, name: &str) -> bool {
        if !self.entries.iter().any(|e| e.name == name) {
            return false;
        }
        let previously_active = self.active_entry().map(|e| e.name.clone());
        if !self.visible.toggle(name) {
            log::debug!("refusing to hide '{name}': last visible category");
            return false;
        }

        // indices shift with the visible list, so re-resolve by name
        match previously_active {
            Some(active) if self.visible.contains(&active) => {
                self.state.active_index = self.visible_position(&active);
            }
            Some(_) => self.clear_highlight(),
            None => self.state.active_index = None,
        }
        if self
            .state
            .hovered_category
            .as_deref()
            .is_some_and(|h| !self.visible.contains(h))
        {
            self.state.hovered_category = None;
        }
        true
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.state.pointer = PointerPosition { x, y };
    }

    /// Advances the auto-cycle highlight. Does nothing while anything is hovered.
    pub fn tick(&mut self) -> bool {
        if self.state.hovered_category.is_some() {
            return false;
        }
        let count = self.visible_count();
        if count == 0 {
            return false;
        }
        let next = match self.state.active_index {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.state.active_index = Some(next);
        true
    }

    pub fn reset(&mut self) {
        self.hover_epoch += 1;
        self.clear_highlight();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::distribution::{build_display_entries, CategoryRecord};
    use proptest::prelude::*;

    fn controller(names: &[(&str, u64)]) -> SectorInteractionController {
        let records = names
            .iter()
            .map(|(n, c)| CategoryRecord::new(*n, *c))
            .collect::<Vec<_>>();
        SectorInteractionController::new(build_display_entries(&records))
    }

    fn web_embedded() -> SectorInteractionController {
        controller(&[("Web", 30), ("Embedded", 10)])
    }

    #[test]
    fn test_starts_idle_with_everything_visible() {
        let c = controller(&[("Web", 30), ("Embedded", 10), ("Tools", 5)]);
        assert!(c.state().is_idle());
        assert_eq!(c.visible_count(), 3);
        assert!(c.active_entry().is_none());
    }

    #[test]
    fn test_toggle_cannot_hide_last_category() {
        let mut c = web_embedded();
        assert!(c.toggle("Web"));
        assert!(!c.is_visible("Web"));
        assert_eq!(c.visibility().len(), 1);

        assert!(!c.toggle("Embedded"));
        assert!(c.is_visible("Embedded"));
        assert_eq!(c.visible_count(), 1);

        // showing again works
        assert!(c.toggle("Web"));
        assert_eq!(c.visible_count(), 2);
    }

    #[test]
    fn test_toggle_unknown_name_is_ignored() {
        let mut c = web_embedded();
        assert!(!c.toggle("Nope"));
        assert_eq!(c.visible_count(), 2);
        assert!(!c.visibility().contains("Nope"));
    }

    #[test]
    fn test_hover_takes_precedence_over_auto_cycle() {
        let mut c = controller(&[("a", 1), ("b", 1), ("c", 1)]);
        assert!(c.tick());
        assert_eq!(c.state().active_index, Some(0));

        assert!(c.sector_enter(0));
        assert_eq!(c.state().hovered_category.as_deref(), Some("a"));
        assert!(c.state().tooltip_visible);
        for _ in 0..5 {
            assert!(!c.tick());
            assert_eq!(c.state().active_index, Some(0));
        }
    }

    #[test]
    fn test_auto_cycle_wraps() {
        let mut c = controller(&[("a", 1), ("b", 1), ("c", 1), ("d", 1)]);
        c.tick();
        assert_eq!(c.state().active_index, Some(0));
        for _ in 0..4 {
            c.tick();
        }
        assert_eq!(c.state().active_index, Some(0));
        c.tick();
        assert_eq!(c.active_entry().map(|e| e.name.as_str()), Some("b"));
    }

    #[test]
    fn test_auto_cycle_skips_empty_chart() {
        let mut c = controller(&[]);
        assert!(!c.tick());
        assert_eq!(c.state().active_index, None);
    }

    #[test]
    fn test_leave_is_debounced() {
        let mut c = controller(&[("a", 1), ("b", 1)]);
        c.sector_enter(0);
        let token = c.pointer_leave();
        // still showing until the delay elapses
        assert!(c.state().tooltip_visible);
        assert_eq!(c.state().active_index, Some(0));
        assert!(c.state().hovered_category.is_none());

        assert!(c.settle_leave(token));
        assert!(c.state().is_idle());
    }

    #[test]
    fn test_moving_between_sectors_does_not_blink() {
        let mut c = controller(&[("a", 1), ("b", 1)]);
        c.sector_enter(0);
        let token = c.pointer_leave();
        c.sector_enter(1);
        assert!(!c.settle_leave(token));
        assert!(c.state().tooltip_visible);
        assert_eq!(c.state().active_index, Some(1));
        assert_eq!(c.state().hovered_category.as_deref(), Some("b"));
    }

    #[test]
    fn test_sector_enter_out_of_range() {
        let mut c = web_embedded();
        assert!(!c.sector_enter(2));
        assert!(c.state().is_idle());
    }

    #[test]
    fn test_legend_hover_uses_visible_position() {
        let mut c = controller(&[("a", 1), ("b", 1), ("c", 1)]);
        c.toggle("a");
        assert!(c.legend_enter("c"));
        assert_eq!(c.state().active_index, Some(1));
        assert!(!c.state().tooltip_visible);
        assert!(c.is_active("c"));

        // hidden categories can't be highlighted
        assert!(!c.legend_enter("a"));
        assert_eq!(c.state().active_index, Some(1));

        c.legend_leave();
        assert!(c.state().is_idle());
    }

    #[test]
    fn test_legend_leave_keeps_sector_tooltip() {
        let mut c = controller(&[("a", 1), ("b", 1)]);
        c.sector_enter(1);
        c.legend_leave();
        assert_eq!(c.state().active_index, Some(1));
        assert!(c.state().tooltip_visible);
    }

    #[test]
    fn test_leave_onto_legend_still_hides_tooltip() {
        let mut c = controller(&[("a", 1), ("b", 1)]);
        c.sector_enter(0);
        let token = c.pointer_leave();
        assert!(c.legend_enter("b"));
        assert!(c.settle_leave(token));
        assert!(!c.state().tooltip_visible);
        assert!(c.is_active("b"));

        c.legend_leave();
        assert!(c.state().is_idle());
        for _ in 0..3 {
            c.tick();
        }
        assert!(!c.state().tooltip_visible);
        assert!(c.state().hovered_category.is_none());
    }

    #[test]
    fn test_toggle_revalidates_active_index() {
        let mut c = controller(&[("a", 1), ("b", 1), ("c", 1)]);
        c.sector_enter(2);
        assert!(c.is_active("c"));

        // hiding an earlier entry shifts the index but keeps the highlight
        c.toggle("a");
        assert_eq!(c.state().active_index, Some(1));
        assert!(c.is_active("c"));

        // hiding the active entry clears everything
        c.toggle("c");
        assert!(c.state().is_idle());
        assert!(c.active_entry().is_none());
    }

    #[test]
    fn test_pointer_move_only_updates_position() {
        let mut c = web_embedded();
        c.pointer_move(12.0, 34.0);
        assert_eq!(c.state().pointer, PointerPosition { x: 12.0, y: 34.0 });
        assert!(c.state().is_idle());

        c.legend_enter("Web");
        c.pointer_move(1.0, 2.0);
        assert_eq!(c.state().active_index, Some(0));
        assert_eq!(c.state().hovered_category.as_deref(), Some("Web"));
    }

    #[test]
    fn test_reset_invalidates_pending_leave() {
        let mut c = web_embedded();
        c.sector_enter(0);
        let token = c.pointer_leave();
        c.reset();
        c.tick();
        assert!(!c.settle_leave(token));
        assert_eq!(c.state().active_index, Some(0));
    }

    #[derive(Debug, Clone)]
    enum Event {
        Toggle(usize),
        Enter(usize),
        Leave,
        Settle,
        Legend(usize),
        LegendLeave,
        Tick,
    }

    fn event() -> impl Strategy<Value = Event> {
        prop_oneof![
            (0..6usize).prop_map(Event::Toggle),
            (0..6usize).prop_map(Event::Enter),
            Just(Event::Leave),
            Just(Event::Settle),
            (0..6usize).prop_map(Event::Legend),
            Just(Event::LegendLeave),
            Just(Event::Tick),
        ]
    }

    proptest! {
        #[test]
        fn visibility_and_active_index_stay_valid(events in prop::collection::vec(event(), 0..64)) {
            let names = ["a", "b", "c", "d", "e"];
            let mut c = controller(&names.map(|n| (n, 3u64)));
            let mut last_token = None;
            for ev in events {
                match ev {
                    Event::Toggle(i) => {
                        c.toggle(names.get(i).copied().unwrap_or("missing"));
                    }
                    Event::Enter(i) => {
                        c.sector_enter(i);
                    }
                    Event::Leave => last_token = Some(c.pointer_leave()),
                    Event::Settle => {
                        if let Some(token) = last_token.take() {
                            c.settle_leave(token);
                        }
                    }
                    Event::Legend(i) => {
                        c.legend_enter(names.get(i).copied().unwrap_or("missing"));
                    }
                    Event::LegendLeave => c.legend_leave(),
                    Event::Tick => {
                        let before = c.state().active_index;
                        let hovered = c.state().hovered_category.is_some();
                        c.tick();
                        if hovered {
                            prop_assert_eq!(c.state().active_index, before);
                        }
                    }
                }
                prop_assert!(!c.visibility().is_empty());
                prop_assert!(c.visible_count() >= 1);
                if let Some(i) = c.state().active_index {
                    prop_assert!(i < c.visible_count());
                }
            }
        }
    }
}
