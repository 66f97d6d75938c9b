// src/services/overlay.rs
//! Discrete open/closed state for every overlay on the page. Families are
//! independent of each other; within a family at most one instance is
//! open, and opening one closes its siblings. State changes come back as
//! a list of effects for the UI shell to apply to the DOM.

use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Family {
    /// Burger menu.
    Menu,
    /// Custom selects and the guests stepper popover.
    Dropdown,
    BookingModal,
    QuoteModal,
    ChatPanel,
}

impl Family {
    /// The menu and the two modals cover the page; dropdowns and the chat
    /// panel leave it scrollable.
    fn locks_scroll(self) -> bool {
        matches!(self, Family::Menu | Family::BookingModal | Family::QuoteModal)
    }

    /// Dropdown-style overlays also close on a click outside them.
    fn closes_on_outside_click(self) -> bool {
        matches!(self, Family::Dropdown)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    SetAriaHidden { id: String, hidden: bool },
    ScrollLock(bool),
}

#[derive(Debug, Default)]
pub struct OverlayCoordinator {
    opened: BTreeMap<Family, String>,
}

impl OverlayCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, family: Family, id: &str) -> bool {
        self.opened.get(&family).is_some_and(|open| open == id)
    }

    pub fn any_open(&self, family: Family) -> bool {
        self.opened.contains_key(&family)
    }

    /// Opens an instance, closing whatever sibling was open in the same
    /// family first. Other families are untouched.
    pub fn open(&mut self, family: Family, id: impl Into<String>) -> Vec<Effect> {
        let id = id.into();
        let mut effects = Vec::new();

        if let Some(previous) = self.opened.remove(&family) {
            if previous == id {
                // Already open; nothing to change.
                self.opened.insert(family, previous);
                return effects;
            }
            effects.push(Effect::SetAriaHidden {
                id: previous,
                hidden: true,
            });
        }

        effects.push(Effect::SetAriaHidden {
            id: id.clone(),
            hidden: false,
        });
        if family.locks_scroll() {
            effects.push(Effect::ScrollLock(true));
        }
        self.opened.insert(family, id);
        effects
    }

    pub fn close(&mut self, family: Family, id: &str) -> Vec<Effect> {
        if !self.is_open(family, id) {
            return Vec::new();
        }
        self.opened.remove(&family);
        let mut effects = vec![Effect::SetAriaHidden {
            id: id.to_string(),
            hidden: true,
        }];
        if family.locks_scroll() {
            effects.push(Effect::ScrollLock(false));
        }
        effects
    }

    pub fn toggle(&mut self, family: Family, id: &str) -> Vec<Effect> {
        if self.is_open(family, id) {
            self.close(family, id)
        } else {
            self.open(family, id)
        }
    }

    /// Escape closes whatever is open, family by family.
    pub fn escape(&mut self) -> Vec<Effect> {
        self.close_matching(|_| true)
    }

    /// A click outside any control dismisses dropdown-style overlays only.
    pub fn outside_click(&mut self) -> Vec<Effect> {
        self.close_matching(Family::closes_on_outside_click)
    }

    fn close_matching(&mut self, should_close: impl Fn(Family) -> bool) -> Vec<Effect> {
        let families: Vec<Family> = self
            .opened
            .keys()
            .copied()
            .filter(|f| should_close(*f))
            .collect();

        let mut effects = Vec::new();
        for family in families {
            if let Some(id) = self.opened.remove(&family) {
                effects.push(Effect::SetAriaHidden { id, hidden: true });
                if family.locks_scroll() {
                    effects.push(Effect::ScrollLock(false));
                }
            }
        }
        effects
    }
}
