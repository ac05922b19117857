use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-supplied prefix data for locations and carriers.
///
/// Keys are digit strings made of the country calling code followed by the
/// leading national digits, so `"1650"` covers `+1 650 …` and `"4477"` covers
/// `+44 77 …`. Lookups pick the longest matching key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefixDirectory {
    #[serde(default)]
    pub locations: BTreeMap<String, String>,
    #[serde(default)]
    pub carriers: BTreeMap<String, String>,
}

impl PrefixDirectory {
    /// `digits` is the E.164 form without the leading `+`
    pub fn location_for(&self, digits: &str) -> Option<&str> {
        longest_match(&self.locations, digits)
    }

    pub fn carrier_for(&self, digits: &str) -> Option<&str> {
        longest_match(&self.carriers, digits)
    }
}

fn longest_match<'a>(table: &'a BTreeMap<String, String>, digits: &str) -> Option<&'a str> {
    (1..=digits.len())
        .rev()
        .find_map(|len| table.get(&digits[..len]))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
