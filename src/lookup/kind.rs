use phonenumber::Type;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification of a phone number shown in the results table.
///
/// The library reports a finer-grained type; `from_library` decides, variant
/// by variant, which of these nine buckets each one lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberKind {
    Mobile,
    FixedLine,
    FixedLineOrMobile,
    TollFree,
    PremiumRate,
    Voip,
    Pager,
    Uan,
    Unknown,
}

impl NumberKind {
    pub fn from_library(kind: Type) -> Self {
        match kind {
            Type::Mobile => NumberKind::Mobile,
            Type::FixedLine => NumberKind::FixedLine,
            Type::FixedLineOrMobile => NumberKind::FixedLineOrMobile,
            Type::TollFree => NumberKind::TollFree,
            Type::PremiumRate => NumberKind::PremiumRate,
            Type::Voip => NumberKind::Voip,
            Type::Pager => NumberKind::Pager,
            Type::Uan => NumberKind::Uan,
            // Not part of the displayed classification
            Type::SharedCost
            | Type::PersonalNumber
            | Type::Emergency
            | Type::Voicemail
            | Type::ShortCode
            | Type::StandardRate
            | Type::Carrier
            | Type::NoInternational
            | Type::Unknown => NumberKind::Unknown,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            NumberKind::Mobile => "Mobile",
            NumberKind::FixedLine => "Fixed-line",
            NumberKind::FixedLineOrMobile => "Fixed-line or Mobile",
            NumberKind::TollFree => "Toll-Free",
            NumberKind::PremiumRate => "Premium Rate",
            NumberKind::Voip => "VoIP",
            NumberKind::Pager => "Pager",
            NumberKind::Uan => "UAN (Universal Access Number)",
            NumberKind::Unknown => "Unknown",
        }
    }

    /// Whether a number of this kind may be served by a mobile carrier.
    /// Carrier names are only looked up for these kinds.
    pub fn is_mobile(&self) -> bool {
        matches!(
            self,
            NumberKind::Mobile | NumberKind::FixedLineOrMobile | NumberKind::Pager
        )
    }

    /// Kinds that are tied to a geographic area everywhere
    pub fn is_geographic(&self) -> bool {
        matches!(self, NumberKind::FixedLine | NumberKind::FixedLineOrMobile)
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_map_library_types_outside_the_display_set_to_unknown() {
        for kind in [
            Type::SharedCost,
            Type::PersonalNumber,
            Type::Emergency,
            Type::Voicemail,
            Type::ShortCode,
            Type::StandardRate,
            Type::Carrier,
            Type::NoInternational,
            Type::Unknown,
        ] {
            assert_eq!(NumberKind::from_library(kind), NumberKind::Unknown);
        }
    }

    #[test]
    fn test_should_keep_display_strings_stable() {
        assert_eq!(NumberKind::from_library(Type::Voip).to_string(), "VoIP");
        assert_eq!(
            NumberKind::from_library(Type::Uan).to_string(),
            "UAN (Universal Access Number)"
        );
        assert_eq!(
            NumberKind::FixedLineOrMobile.to_string(),
            "Fixed-line or Mobile"
        );
    }

    #[test]
    fn test_should_only_treat_mobile_capable_kinds_as_mobile() {
        assert!(NumberKind::Mobile.is_mobile());
        assert!(NumberKind::FixedLineOrMobile.is_mobile());
        assert!(NumberKind::Pager.is_mobile());
        assert!(!NumberKind::FixedLine.is_mobile());
        assert!(!NumberKind::TollFree.is_mobile());
    }
}
