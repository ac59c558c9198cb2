//! Per-hospital blood unit counters.
//!
//! An [`Inventory`] holds one non-negative counter per [`BloodGroup`]. Updates
//! arrive as an [`InventoryPatch`] covering any subset of the counters; merging
//! overwrites exactly the counters present and leaves the others untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::BloodGroup;

/// Largest value a single counter may hold.
pub const MAX_UNITS: u32 = i32::MAX.unsigned_abs();

/// Eight named counters of available blood units.
///
/// # Examples
/// ```
/// use bloodbank::domain::{BloodGroup, Inventory};
///
/// let inventory = Inventory::default().with_units(BloodGroup::APositive, 4);
/// assert!(inventory.is_available(BloodGroup::APositive, 4));
/// assert!(!inventory.is_available(BloodGroup::APositive, 5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Units of A+.
    pub a_positive: u32,
    /// Units of A-.
    pub a_negative: u32,
    /// Units of B+.
    pub b_positive: u32,
    /// Units of B-.
    pub b_negative: u32,
    /// Units of AB+.
    pub ab_positive: u32,
    /// Units of AB-.
    pub ab_negative: u32,
    /// Units of O+.
    pub o_positive: u32,
    /// Units of O-.
    pub o_negative: u32,
}

impl Inventory {
    /// Units held for `group`.
    #[must_use]
    pub const fn units(&self, group: BloodGroup) -> u32 {
        match group {
            BloodGroup::APositive => self.a_positive,
            BloodGroup::ANegative => self.a_negative,
            BloodGroup::BPositive => self.b_positive,
            BloodGroup::BNegative => self.b_negative,
            BloodGroup::AbPositive => self.ab_positive,
            BloodGroup::AbNegative => self.ab_negative,
            BloodGroup::OPositive => self.o_positive,
            BloodGroup::ONegative => self.o_negative,
        }
    }

    fn slot_mut(&mut self, group: BloodGroup) -> &mut u32 {
        match group {
            BloodGroup::APositive => &mut self.a_positive,
            BloodGroup::ANegative => &mut self.a_negative,
            BloodGroup::BPositive => &mut self.b_positive,
            BloodGroup::BNegative => &mut self.b_negative,
            BloodGroup::AbPositive => &mut self.ab_positive,
            BloodGroup::AbNegative => &mut self.ab_negative,
            BloodGroup::OPositive => &mut self.o_positive,
            BloodGroup::ONegative => &mut self.o_negative,
        }
    }

    /// Return a copy with the counter for `group` set to `units`.
    #[must_use]
    pub fn with_units(mut self, group: BloodGroup, units: u32) -> Self {
        *self.slot_mut(group) = units;
        self
    }

    /// Whether at least `units` of `group` are held.
    #[must_use]
    pub const fn is_available(&self, group: BloodGroup, units: u32) -> bool {
        self.units(group) >= units
    }

    /// Overwrite the counters named in `patch`.
    pub fn merge(&mut self, patch: &InventoryPatch) {
        for (group, units) in patch.entries() {
            *self.slot_mut(group) = units;
        }
    }
}

/// Reasons an inventory patch is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryPatchError {
    /// The key does not name a blood group counter.
    UnknownCounter { key: String },
    /// The value is below zero.
    Negative { key: String, value: i64 },
    /// The value exceeds [`MAX_UNITS`].
    TooLarge { key: String, value: i64 },
}

impl InventoryPatchError {
    /// Counter key the error refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownCounter { key } | Self::Negative { key, .. } | Self::TooLarge { key, .. } => {
                key
            }
        }
    }
}

impl fmt::Display for InventoryPatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCounter { key } => write!(f, "unknown inventory counter '{key}'"),
            Self::Negative { key, value } => {
                write!(f, "inventory counter '{key}' must not be negative (got {value})")
            }
            Self::TooLarge { key, value } => {
                write!(f, "inventory counter '{key}' exceeds {MAX_UNITS} (got {value})")
            }
        }
    }
}

impl std::error::Error for InventoryPatchError {}

/// Validated subset of inventory counters to overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryPatch {
    counters: BTreeMap<BloodGroup, u32>,
}

impl InventoryPatch {
    /// Build a patch from `(counter key, value)` pairs.
    ///
    /// # Examples
    /// ```
    /// use bloodbank::domain::{BloodGroup, InventoryPatch};
    ///
    /// let patch = InventoryPatch::try_from_entries([("oNegative".to_owned(), 3)]).unwrap();
    /// assert_eq!(patch.get(BloodGroup::ONegative), Some(3));
    /// assert_eq!(patch.get(BloodGroup::OPositive), None);
    /// ```
    pub fn try_from_entries<I>(entries: I) -> Result<Self, InventoryPatchError>
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut counters = BTreeMap::new();
        for (key, value) in entries {
            let Some(group) = BloodGroup::from_counter_key(&key) else {
                return Err(InventoryPatchError::UnknownCounter { key });
            };
            if value < 0 {
                return Err(InventoryPatchError::Negative { key, value });
            }
            let units = u32::try_from(value)
                .ok()
                .filter(|units| *units <= MAX_UNITS)
                .ok_or_else(|| InventoryPatchError::TooLarge {
                    key: key.clone(),
                    value,
                })?;
            counters.insert(group, units);
        }
        Ok(Self { counters })
    }

    /// Add or replace one counter.
    #[must_use]
    pub fn set(mut self, group: BloodGroup, units: u32) -> Self {
        self.counters.insert(group, units.min(MAX_UNITS));
        self
    }

    /// Value supplied for `group`, if any.
    #[must_use]
    pub fn get(&self, group: BloodGroup) -> Option<u32> {
        self.counters.get(&group).copied()
    }

    /// Supplied counters in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (BloodGroup, u32)> + '_ {
        self.counters.iter().map(|(group, units)| (*group, *units))
    }

    /// Whether the patch names no counters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}
