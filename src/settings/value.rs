//! Per-type semantics used by the resolver.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;

/// A type that can be stored as a setting.
///
/// The resolver is written once for every type; these hooks supply the
/// handful of places where the meaning of a value depends on its type.
pub trait SettingValue:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Whether a global value in this state locks lower scopes.
    fn is_enforced(&self) -> bool;

    /// Whether this value defers to the next broader scope.
    fn is_unset(&self) -> bool {
        false
    }

    /// Applies an upper bound. Only meaningful for numeric caps.
    fn cap_with(self, _ceiling: &Self) -> Self {
        self
    }

    /// Combines a broader scope's value with a narrower one.
    fn merge_with(self, narrower: Self) -> Self {
        narrower
    }
}

impl SettingValue for bool {
    fn is_enforced(&self) -> bool {
        *self
    }
}

/// Integer settings use 0 as "no limit" / "off".
impl SettingValue for u64 {
    fn is_enforced(&self) -> bool {
        *self != 0
    }

    fn is_unset(&self) -> bool {
        *self == 0
    }

    fn cap_with(self, ceiling: &Self) -> Self {
        match (self, *ceiling) {
            (value, 0) => value,
            (0, ceiling) => ceiling,
            (value, ceiling) => value.min(ceiling),
        }
    }
}

impl SettingValue for String {
    fn is_enforced(&self) -> bool {
        !self.is_empty()
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl SettingValue for Option<String> {
    fn is_enforced(&self) -> bool {
        self.is_some()
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl<T> SettingValue for BTreeSet<T>
where
    T: Ord + Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn is_enforced(&self) -> bool {
        !self.is_empty()
    }

    fn is_unset(&self) -> bool {
        self.is_empty()
    }

    fn merge_with(mut self, narrower: Self) -> Self {
        self.extend(narrower);
        self
    }
}
