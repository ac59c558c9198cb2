//! ABO/Rh blood groups and their inventory counter keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight ABO/Rh blood groups.
///
/// Serialised in its conventional textual form, e.g. `"AB-"`.
///
/// # Examples
/// ```
/// use bloodbank::domain::BloodGroup;
///
/// let group: BloodGroup = "O-".parse().expect("known group");
/// assert_eq!(group, BloodGroup::ONegative);
/// assert_eq!(group.counter_key(), "oNegative");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BloodGroup {
    /// A positive.
    APositive,
    /// A negative.
    ANegative,
    /// B positive.
    BPositive,
    /// B negative.
    BNegative,
    /// AB positive.
    AbPositive,
    /// AB negative.
    AbNegative,
    /// O positive.
    OPositive,
    /// O negative.
    ONegative,
}

/// Error returned when text does not name a known blood group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBloodGroup(pub String);

impl fmt::Display for UnknownBloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown blood group '{}'; expected one of A+, A-, B+, B-, AB+, AB-, O+, O-",
            self.0
        )
    }
}

impl std::error::Error for UnknownBloodGroup {}

impl BloodGroup {
    /// Every blood group in canonical order.
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// Conventional textual form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }

    /// Key of the inventory counter holding units of this group.
    #[must_use]
    pub const fn counter_key(self) -> &'static str {
        match self {
            Self::APositive => "aPositive",
            Self::ANegative => "aNegative",
            Self::BPositive => "bPositive",
            Self::BNegative => "bNegative",
            Self::AbPositive => "abPositive",
            Self::AbNegative => "abNegative",
            Self::OPositive => "oPositive",
            Self::ONegative => "oNegative",
        }
    }

    /// Resolve a group from its inventory counter key.
    #[must_use]
    pub fn from_counter_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.counter_key() == key)
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| UnknownBloodGroup(s.to_owned()))
    }
}

impl TryFrom<String> for BloodGroup {
    type Error = UnknownBloodGroup;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BloodGroup> for String {
    fn from(value: BloodGroup) -> Self {
        value.as_str().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A+", BloodGroup::APositive, "aPositive")]
    #[case("A-", BloodGroup::ANegative, "aNegative")]
    #[case("B+", BloodGroup::BPositive, "bPositive")]
    #[case("B-", BloodGroup::BNegative, "bNegative")]
    #[case("AB+", BloodGroup::AbPositive, "abPositive")]
    #[case("AB-", BloodGroup::AbNegative, "abNegative")]
    #[case("O+", BloodGroup::OPositive, "oPositive")]
    #[case("O-", BloodGroup::ONegative, "oNegative")]
    fn parses_and_maps_counter_key(
        #[case] raw: &str,
        #[case] expected: BloodGroup,
        #[case] key: &str,
    ) {
        let group: BloodGroup = raw.parse().expect("known group");
        assert_eq!(group, expected);
        assert_eq!(group.counter_key(), key);
        assert_eq!(BloodGroup::from_counter_key(key), Some(expected));
    }

    #[rstest]
    #[case("a+")]
    #[case("AB")]
    #[case("O")]
    #[case("")]
    fn rejects_unknown_groups(#[case] raw: &str) {
        assert!(raw.parse::<BloodGroup>().is_err());
    }

    #[rstest]
    fn deserialises_from_textual_form() {
        let group: BloodGroup = serde_json::from_str("\"AB-\"").expect("valid json");
        assert_eq!(group, BloodGroup::AbNegative);
        assert!(serde_json::from_str::<BloodGroup>("\"C+\"").is_err());
    }
}
