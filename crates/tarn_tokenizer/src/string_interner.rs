//! Global interning for token tag names.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

lazy_static! {
    static ref INTERNER: Mutex<HashSet<Arc<str>>> = Mutex::new(HashSet::new());
}

/// A reference-counted, interned string.
///
/// Equal strings share one allocation, so clones are a pointer copy and
/// equality usually short-circuits on pointer identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternedString(Arc<str>);

impl InternedString {
    /// Interns `s`, reusing the existing allocation when one exists.
    pub fn new(s: &str) -> Self {
        // A poisoned interner still holds a valid set.
        let mut set = INTERNER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match set.get(s) {
            Some(existing) => InternedString(Arc::clone(existing)),
            None => {
                let arc: Arc<str> = Arc::from(s);
                set.insert(Arc::clone(&arc));
                InternedString(arc)
            }
        }
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if both strings share the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<&str> for InternedString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for InternedString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for InternedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for InternedString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Ok(InternedString::new(&s))
    }
}
