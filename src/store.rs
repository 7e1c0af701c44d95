//! Client Menu Store
//!
//! The in-memory collection the UI renders from. Server-confirmed menus are
//! folded in by id; local edits sit in the collection as pending entries
//! until their round-trip lands.

use crate::calendar;
use crate::domain::{DateKey, Entity, Menu, MenuDraft, MenuId};
use crate::error::{ClientError, ClientResult};

/// Point update by id, append when absent. Returns the entry's position.
pub fn upsert_by_id<T: Entity>(items: &mut Vec<T>, incoming: T) -> usize {
    match items.iter().position(|item| item.id() == incoming.id()) {
        Some(pos) => {
            items[pos] = incoming;
            pos
        }
        None => {
            items.push(incoming);
            items.len() - 1
        }
    }
}

/// Fold a confirmed menu into a plain collection. The incoming menu's meals
/// replace whatever was held; nothing below the menu level is merged.
pub fn reconcile(menus: &mut Vec<Menu>, incoming: Menu) {
    upsert_by_id(menus, incoming);
}

/// Correlates a local edit with the response that confirms it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingToken(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Confirmed(Menu),
    Pending {
        token: PendingToken,
        date: DateKey,
        draft: MenuDraft,
        /// Confirmed menu being edited; `None` for a menu not yet created
        previous: Option<Menu>,
    },
}

impl MenuEntry {
    pub fn date(&self) -> DateKey {
        match self {
            MenuEntry::Confirmed(menu) => menu.date(),
            MenuEntry::Pending { date, .. } => *date,
        }
    }

    /// Server id, if the backend has assigned one
    pub fn menu_id(&self) -> Option<MenuId> {
        match self {
            MenuEntry::Confirmed(menu) => Some(menu.id()),
            MenuEntry::Pending { previous, .. } => previous.as_ref().map(Menu::id),
        }
    }

    pub fn confirmed(&self) -> Option<&Menu> {
        match self {
            MenuEntry::Confirmed(menu) => Some(menu),
            MenuEntry::Pending { .. } => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MenuEntry::Pending { .. })
    }

    /// What a surface should draw: the pending draft if any, else the menu
    pub fn draft(&self) -> MenuDraft {
        match self {
            MenuEntry::Confirmed(menu) => menu.to_draft(),
            MenuEntry::Pending { draft, .. } => draft.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MenuStore {
    entries: Vec<MenuEntry>,
    next_token: u64,
}

impl MenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_menus(menus: Vec<Menu>) -> Self {
        let mut store = Self::new();
        store.replace_all(menus);
        store
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Confirmed menus in collection order
    pub fn menus(&self) -> impl Iterator<Item = &Menu> {
        self.entries.iter().filter_map(MenuEntry::confirmed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Swap in a freshly loaded collection. Pending entries are dropped; their
    /// responses still land through [`MenuStore::confirm`].
    pub fn replace_all(&mut self, menus: Vec<Menu>) {
        let mut entries: Vec<MenuEntry> = Vec::with_capacity(menus.len());
        for menu in menus {
            // Keep the at-most-one-per-id rule even if the backend repeats itself
            match entries.iter().position(|e| e.menu_id() == Some(menu.id())) {
                Some(pos) => entries[pos] = MenuEntry::Confirmed(menu),
                None => entries.push(MenuEntry::Confirmed(menu)),
            }
        }
        self.entries = entries;
    }

    /// Id-based merge: replace in place, append when unknown. A pending edit
    /// of the same menu is overwritten (last write wins).
    pub fn reconcile(&mut self, menu: Menu) {
        let id = menu.id();
        match self.entries.iter().position(|e| e.menu_id() == Some(id)) {
            Some(pos) => self.entries[pos] = MenuEntry::Confirmed(menu),
            None => {
                log::debug!("Appending menu {} for {}", id, menu.date());
                self.entries.push(MenuEntry::Confirmed(menu));
            }
        }
    }

    /// Optimistically add a menu for a date that has none
    pub fn stage_create(&mut self, date: DateKey, draft: MenuDraft) -> ClientResult<PendingToken> {
        draft.validate()?;
        if self.entry_for(date).is_some() {
            return Err(ClientError::validation(format!("a menu for {} already exists", date)));
        }
        let token = self.issue_token();
        self.entries.push(MenuEntry::Pending {
            token,
            date,
            draft,
            previous: None,
        });
        Ok(token)
    }

    /// Optimistically replace a menu's meals. Staging over an edit that is
    /// still in flight supersedes it.
    pub fn stage_update(&mut self, menu_id: MenuId, draft: MenuDraft) -> ClientResult<PendingToken> {
        draft.validate()?;
        let pos = self
            .entries
            .iter()
            .position(|e| e.menu_id() == Some(menu_id))
            .ok_or_else(|| ClientError::validation(format!("menu {} is not loaded", menu_id)))?;
        let token = self.issue_token();

        let entry = &mut self.entries[pos];
        let previous = match entry {
            MenuEntry::Confirmed(menu) => menu.clone(),
            MenuEntry::Pending { previous: Some(menu), .. } => menu.clone(),
            MenuEntry::Pending { previous: None, .. } => {
                return Err(ClientError::validation("menu has not been created yet"))
            }
        };
        *entry = MenuEntry::Pending {
            token,
            date: previous.date(),
            draft,
            previous: Some(previous),
        };
        Ok(token)
    }

    /// Collapse a pending entry into the server's answer. Unknown tokens (the
    /// edit was superseded or the store reloaded) fall back to [`reconcile`].
    ///
    /// [`reconcile`]: MenuStore::reconcile
    pub fn confirm(&mut self, token: PendingToken, menu: Menu) {
        let Some(pos) = self.position_of(token) else {
            log::debug!("No pending entry for {:?}, reconciling menu {}", token, menu.id());
            self.reconcile(menu);
            return;
        };
        let id = menu.id();
        self.entries[pos] = MenuEntry::Confirmed(menu);

        // The same server menu may already have landed through another path
        let mut index = 0;
        self.entries.retain(|e| {
            let keep = index == pos || e.menu_id() != Some(id);
            index += 1;
            keep
        });
    }

    /// Roll a failed edit back. Returns false when the token is unknown.
    pub fn reject(&mut self, token: PendingToken) -> bool {
        let Some(pos) = self.position_of(token) else {
            return false;
        };
        let restored = match &self.entries[pos] {
            MenuEntry::Pending { previous, .. } => previous.clone(),
            MenuEntry::Confirmed(_) => None,
        };
        match restored {
            Some(menu) => self.entries[pos] = MenuEntry::Confirmed(menu),
            None => {
                self.entries.remove(pos);
            }
        }
        true
    }

    /// Drop a menu after it was deleted on the backend
    pub fn remove(&mut self, menu_id: MenuId) -> Option<MenuEntry> {
        let pos = self.entries.iter().position(|e| e.menu_id() == Some(menu_id))?;
        Some(self.entries.remove(pos))
    }

    pub fn entry_for(&self, date: DateKey) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.date() == date)
    }

    pub fn menu_for(&self, date: DateKey) -> Option<&Menu> {
        calendar::index_by_date(self.menus(), date)
    }

    pub fn get(&self, menu_id: MenuId) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.menu_id() == Some(menu_id))
    }

    /// The seven days around `reference`, each with its entry if loaded
    pub fn week(&self, reference: DateKey) -> Vec<(DateKey, Option<&MenuEntry>)> {
        calendar::week_of(reference)
            .into_iter()
            .map(|day| (day, self.entry_for(day)))
            .collect()
    }

    fn issue_token(&mut self) -> PendingToken {
        self.next_token += 1;
        PendingToken(self.next_token)
    }

    fn position_of(&self, token: PendingToken) -> Option<usize> {
        self.entries.iter().position(|e| matches!(e, MenuEntry::Pending { token: t, .. } if *t == token))
    }
}
