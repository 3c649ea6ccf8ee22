//! Open/closed state for a fixed set of modal dialogs.
//!
//! The set of names is declared when the manager is created. Every mutation
//! publishes a fresh [`ModalSnapshot`] through a [`Store`], so views can
//! subscribe and re-render from the snapshot they are handed.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::models::settings::UndeclaredPolicy;
use crate::ui::store::{Store, SubscriptionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("modal {0} is not declared")]
    Undeclared(String),
}

/// The dialogs of the scheduling screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerModal {
    AddParticipant,
    EventDetails,
    ConfirmSchedule,
}

impl SchedulerModal {
    pub const ALL: [SchedulerModal; 3] = [
        SchedulerModal::AddParticipant,
        SchedulerModal::EventDetails,
        SchedulerModal::ConfirmSchedule,
    ];
}

impl fmt::Display for SchedulerModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchedulerModal::AddParticipant => "add-participant",
            SchedulerModal::EventDetails => "event-details",
            SchedulerModal::ConfirmSchedule => "confirm-schedule",
        };
        f.write_str(name)
    }
}

/// Immutable view of which modals are open, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalSnapshot<K> {
    entries: Vec<(K, bool)>,
}

impl<K: Clone + PartialEq> ModalSnapshot<K> {
    fn all_closed(names: &[K]) -> Self {
        Self {
            entries: names.iter().cloned().map(|name| (name, false)).collect(),
        }
    }

    /// Copy of this snapshot with `name` set to `f(previous)`.
    /// Absent names are appended with `previous = false`.
    fn with_state(&self, name: &K, f: impl FnOnce(bool) -> bool) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, open)) => *open = f(*open),
            None => entries.push((name.clone(), f(false))),
        }
        Self { entries }
    }

    fn only(&self, name: &K) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(existing, _)| (existing.clone(), existing == name))
                .collect(),
        }
    }

    /// Absent names read as closed.
    pub fn is_open(&self, name: &K) -> bool {
        self.entries
            .iter()
            .any(|(existing, open)| existing == name && *open)
    }

    pub fn contains(&self, name: &K) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn is_any_open(&self) -> bool {
        self.entries.iter().any(|(_, open)| *open)
    }

    /// First open modal in declaration order; `None` when all are closed.
    pub fn active_modal(&self) -> Option<&K> {
        self.entries
            .iter()
            .find(|(_, open)| *open)
            .map(|(name, _)| name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, bool)> {
        self.entries.iter().map(|(name, open)| (name, *open))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub type ModalResult<K> = Result<Arc<ModalSnapshot<K>>, ModalError>;

pub struct ModalSetManager<K> {
    declared: Vec<K>,
    policy: UndeclaredPolicy,
    store: Store<ModalSnapshot<K>>,
}

impl<K> ModalSetManager<K>
where
    K: Clone + PartialEq + fmt::Debug,
{
    /// Manager over `names` that rejects undeclared names.
    pub fn new(names: impl IntoIterator<Item = K>) -> Self {
        Self::with_policy(names, UndeclaredPolicy::Reject)
    }

    /// Duplicate names collapse onto their first occurrence.
    pub fn with_policy(names: impl IntoIterator<Item = K>, policy: UndeclaredPolicy) -> Self {
        let declared = dedup(names);
        let store = Store::new(ModalSnapshot::all_closed(&declared));
        Self {
            declared,
            policy,
            store,
        }
    }

    pub fn declared(&self) -> &[K] {
        &self.declared
    }

    pub fn policy(&self) -> UndeclaredPolicy {
        self.policy
    }

    pub fn snapshot(&self) -> Arc<ModalSnapshot<K>> {
        self.store.get()
    }

    pub fn open(&mut self, name: impl Into<K>) -> ModalResult<K> {
        self.write(name.into(), |_| true)
    }

    pub fn close(&mut self, name: impl Into<K>) -> ModalResult<K> {
        self.write(name.into(), |_| false)
    }

    pub fn toggle(&mut self, name: impl Into<K>) -> ModalResult<K> {
        self.write(name.into(), |open| !open)
    }

    /// Open `name` and close every other modal.
    pub fn open_exclusive(&mut self, name: impl Into<K>) -> ModalResult<K> {
        let name = name.into();
        self.check_declared(&name)?;
        let current = self.store.get();
        let next = if current.contains(&name) {
            current.only(&name)
        } else {
            current.only(&name).with_state(&name, |_| true)
        };
        Ok(self.store.set(next))
    }

    /// Reset to the declared names, all closed.
    pub fn close_all(&mut self) -> Arc<ModalSnapshot<K>> {
        self.store.set(ModalSnapshot::all_closed(&self.declared))
    }

    pub fn is_open(&self, name: impl Into<K>) -> bool {
        self.store.get().is_open(&name.into())
    }

    pub fn is_any_open(&self) -> bool {
        self.store.get().is_any_open()
    }

    pub fn active_modal(&self) -> Option<K> {
        self.store.get().active_modal().cloned()
    }

    /// Replace the declared set if its content differs.
    ///
    /// Returns true when the set changed; state is then reset to all closed.
    pub fn redeclare(&mut self, names: impl IntoIterator<Item = K>) -> bool {
        let declared = dedup(names);
        if declared == self.declared {
            return false;
        }
        log::debug!("Modal set redeclared: {:?} -> {:?}", self.declared, declared);
        self.declared = declared;
        self.close_all();
        true
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&Arc<ModalSnapshot<K>>) + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    fn write(&mut self, name: K, f: impl FnOnce(bool) -> bool) -> ModalResult<K> {
        self.check_declared(&name)?;
        let next = self.store.get().with_state(&name, f);
        Ok(self.store.set(next))
    }

    fn check_declared(&self, name: &K) -> Result<(), ModalError> {
        if self.declared.contains(name) {
            return Ok(());
        }
        match self.policy {
            UndeclaredPolicy::Reject => Err(ModalError::Undeclared(format!("{:?}", name))),
            UndeclaredPolicy::AutoRegister => {
                log::debug!("Registering undeclared modal {:?}", name);
                Ok(())
            }
        }
    }
}

impl ModalSetManager<SchedulerModal> {
    pub fn for_scheduler(policy: UndeclaredPolicy) -> Self {
        Self::with_policy(SchedulerModal::ALL, policy)
    }
}

impl<K: fmt::Debug> fmt::Debug for ModalSetManager<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalSetManager")
            .field("declared", &self.declared)
            .field("policy", &self.policy)
            .field("state", &self.store)
            .finish()
    }
}

fn dedup<K: PartialEq>(names: impl IntoIterator<Item = K>) -> Vec<K> {
    let mut unique = Vec::new();
    for name in names {
        if !unique.contains(&name) {
            unique.push(name);
        }
    }
    unique
}
