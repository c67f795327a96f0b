//! # Event categories.
//!
//! A [`Category`] is an opaque identifier classifying an event kind. Identity is a
//! numeric id, not the name: two subsystems that both mint a category called
//! `"READY"` get two distinct categories and never see each other's events.
//!
//! Well-known categories are associated constants (`Category::OPEN`, ...). Private
//! categories are minted at runtime with [`Category::new`], or with
//! [`Category::named`] when the name is only known at runtime.
//!
//! ## Example
//! ```rust
//! use eventhub::Category;
//!
//! let ready = Category::new("READY");
//! let other = Category::new("READY");
//!
//! assert_ne!(ready, other);
//! assert_eq!(ready.name(), other.name());
//! assert_eq!(Category::OPEN, Category::OPEN);
//!
//! let plugin = String::from("plugin.loaded");
//! assert_eq!(Category::named(&plugin).name(), "plugin.loaded");
//! ```

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Ids below this bound are reserved for the well-known constants.
const FIRST_MINTED_ID: u64 = 1024;

/// Global counter for minted categories.
static NEXT_ID: AtomicU64 = AtomicU64::new(FIRST_MINTED_ID);

/// Interned runtime names; each distinct name is allocated once per process.
static NAMES: Lazy<Mutex<HashSet<&'static str>>> = Lazy::new(Default::default);

/// Opaque, comparable event category.
#[derive(Clone, Copy)]
pub struct Category {
    id: u64,
    name: &'static str,
}

impl Category {
    pub const ADDED: Category = Category::reserved(1, "ADDED");
    pub const CHANGE: Category = Category::reserved(2, "CHANGE");
    pub const CLOSE: Category = Category::reserved(3, "CLOSE");
    pub const CLOSING: Category = Category::reserved(4, "CLOSING");
    pub const CANCEL: Category = Category::reserved(5, "CANCEL");
    pub const CLEAR: Category = Category::reserved(6, "CLEAR");
    pub const COMPLETE: Category = Category::reserved(7, "COMPLETE");
    pub const CONNECT: Category = Category::reserved(8, "CONNECT");
    pub const OPEN: Category = Category::reserved(9, "OPEN");
    pub const SELECT: Category = Category::reserved(10, "SELECT");
    pub const SELECT_ALL: Category = Category::reserved(11, "SELECT_ALL");

    /// Mints a new private category.
    ///
    /// Every call returns a category distinct from all others, whatever `name` is.
    /// The name is used for diagnostics only.
    pub fn new(name: &'static str) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, AtomicOrdering::Relaxed),
            name,
        }
    }

    /// Mints a new private category from a runtime name.
    ///
    /// Same identity rules as [`Category::new`]. The name is interned, so minting many
    /// categories with the same name stores it once.
    pub fn named(name: &str) -> Self {
        let mut names = NAMES.lock();
        let interned = match names.get(name) {
            Some(&existing) => existing,
            None => {
                let leaked: &'static str = Box::leak(name.to_owned().into_boxed_str());
                names.insert(leaked);
                leaked
            }
        };
        drop(names);
        Self::new(interned)
    }

    const fn reserved(id: u64, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Diagnostic name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` for the predefined constants.
    #[inline]
    pub fn is_well_known(&self) -> bool {
        self.id < FIRST_MINTED_ID
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({}#{})", self.name, self.id)
    }
}
