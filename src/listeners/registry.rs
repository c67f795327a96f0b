//! # Listener registry - per-category ordered registrations.
//!
//! The registry is owned by exactly one [`Dispatcher`](crate::Dispatcher), which
//! guards it with a mutex and never holds that mutex while a callback runs.
//!
//! ## Rules
//! - A category key exists iff its list is non-empty.
//! - Lists are ordered by descending priority; ties keep insertion order.
//! - At most one registration per (category, callback).
//! - Re-adding a callback with a new priority moves it; with the same priority it
//!   changes nothing (context and one-shot flag are kept).
//!
//! ```text
//! Category::OPEN     ─► [ cbB p=100 #2 ] [ cbA p=0 #1 ] [ cbC p=0 #3 ]
//! Category::COMPLETE ─► [ cbD p=-5 #4 (once) ]
//! ```

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use crate::events::{Category, Target};

use super::Callback;

/// One listener registration.
///
/// Clones share the one-shot fired flag, so a snapshot taken by one dispatch pass
/// and the live entry agree on whether the listener has already run.
#[derive(Clone, Debug)]
pub(crate) struct Registration {
    pub(crate) callback: Callback,
    pub(crate) context: Option<Target>,
    pub(crate) priority: i32,
    seq: u64,
    fired: Option<Arc<AtomicBool>>,
}

impl Registration {
    #[inline]
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    #[inline]
    pub(crate) fn is_once(&self) -> bool {
        self.fired.is_some()
    }

    /// Claims the right to run. Always `true` for persistent listeners; `true` exactly
    /// once for one-shot listeners.
    pub(crate) fn claim(&self) -> bool {
        match &self.fired {
            Some(flag) => !flag.swap(true, AtomicOrdering::AcqRel),
            None => true,
        }
    }
}

/// Result of [`Registry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Added {
    Inserted,
    Reprioritized { from: i32 },
    Unchanged,
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
    lists: HashMap<Category, Vec<Registration>>,
    next_seq: u64,
}

impl Registry {
    pub(crate) fn add(
        &mut self,
        category: Category,
        callback: &Callback,
        context: Option<Target>,
        priority: i32,
        once: bool,
    ) -> Added {
        let list = self.lists.entry(category).or_default();

        if let Some(pos) = list.iter().position(|r| r.callback.ptr_eq(callback)) {
            let existing = &mut list[pos];
            if existing.priority == priority {
                return Added::Unchanged;
            }
            let from = existing.priority;
            existing.priority = priority;
            sort(list);
            return Added::Reprioritized { from };
        }

        self.next_seq += 1;
        list.push(Registration {
            callback: callback.clone(),
            context,
            priority,
            seq: self.next_seq,
            fired: once.then(|| Arc::new(AtomicBool::new(false))),
        });
        sort(list);
        Added::Inserted
    }

    /// Removes the registration of `callback` under `category`.
    pub(crate) fn remove(&mut self, category: Category, callback: &Callback) -> bool {
        self.remove_where(category, |r| r.callback.ptr_eq(callback))
    }

    /// Removes exactly the registration with sequence number `seq`.
    pub(crate) fn remove_exact(&mut self, category: Category, seq: u64) -> bool {
        self.remove_where(category, |r| r.seq == seq)
    }

    fn remove_where(&mut self, category: Category, pred: impl Fn(&Registration) -> bool) -> bool {
        let Some(list) = self.lists.get_mut(&category) else {
            return false;
        };
        let Some(pos) = list.iter().position(pred) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.lists.remove(&category);
        }
        true
    }

    /// Drops registrations whose bound receiver is gone. Returns how many were dropped.
    pub(crate) fn prune(&mut self, category: Category) -> usize {
        let Some(list) = self.lists.get_mut(&category) else {
            return 0;
        };
        let before = list.len();
        list.retain(|r| r.callback.is_invocable());
        let pruned = before - list.len();
        if list.is_empty() {
            self.lists.remove(&category);
        }
        pruned
    }

    pub(crate) fn clear(&mut self) {
        self.lists.clear();
    }

    #[inline]
    pub(crate) fn contains(&self, category: Category) -> bool {
        self.lists.contains_key(&category)
    }

    pub(crate) fn len(&self, category: Category) -> usize {
        self.lists.get(&category).map_or(0, Vec::len)
    }

    pub(crate) fn categories(&self) -> Vec<Category> {
        self.lists.keys().copied().collect()
    }

    /// Copy of the ordered list, or `None` if nothing is registered.
    pub(crate) fn snapshot(&self, category: Category) -> Option<Vec<Registration>> {
        self.lists.get(&category).cloned()
    }
}

fn sort(list: &mut [Registration]) {
    list.sort_by_key(|r| (Reverse(r.priority), r.seq));
}
