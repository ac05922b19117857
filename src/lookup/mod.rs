//! Phone Number Lookup Module
//!
//! Turns raw user input into a [`NumberReport`]. Parsing, validation, type
//! detection and formatting are delegated to the `phonenumber` crate; this
//! module only maps its answers onto the fields the application displays.

pub mod kind;
pub mod prefixes;
pub mod regions;

pub use kind::NumberKind;
pub use prefixes::PrefixDirectory;

use crate::error::LookupError;
use once_cell::sync::Lazy;
use phonenumber::metadata::{DATABASE, Descriptor, Metadata};
use phonenumber::{Mode, PhoneNumber, Type};
use regex::Regex;
use serde::Serialize;

static DIGIT_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Countries where mobile numbers are tied to a geographic area
const GEO_MOBILE_COUNTRIES: &[u16] = &[52, 54, 55, 62, 86];

/// Geographic mobiles whose numbers still carry no area code
const GEO_MOBILE_COUNTRIES_WITHOUT_MOBILE_AREA_CODES: &[u16] = &[86];

/// Field labels in display order
pub const FIELD_NAMES: [&str; 12] = [
    "Time Zone(s)",
    "General Location",
    "Service Provider",
    "Number Type",
    "International Format",
    "National Format",
    "E.164 Format",
    "Country Code",
    "Country Name",
    "Area Code Length",
    "Is Possible Number",
    "Is Valid Number",
];

/// Everything derived from one successful lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberReport {
    pub input: String,
    pub time_zones: Vec<String>,
    pub location: String,
    pub carrier: String,
    pub kind: NumberKind,
    pub international: String,
    pub national: String,
    pub e164: String,
    pub country_code: u16,
    pub region: Option<String>,
    pub country_name: String,
    pub area_code_length: usize,
    pub is_possible: bool,
    pub is_valid: bool,
}

impl NumberReport {
    /// Field/value pairs in the order they are displayed and exported
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let values = [
            self.time_zones.join(", "),
            self.location.clone(),
            self.carrier.clone(),
            self.kind.display_name().to_string(),
            self.international.clone(),
            self.national.clone(),
            self.e164.clone(),
            format!("+{}", self.country_code),
            self.country_name.clone(),
            self.area_code_length.to_string(),
            yes_no(self.is_possible).to_string(),
            yes_no(self.is_valid).to_string(),
        ];

        FIELD_NAMES.into_iter().zip(values).collect()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Feedback shown next to the number input while typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveValidity {
    Empty,
    Valid,
    Possible,
    Invalid,
    BadFormat,
}

impl LiveValidity {
    pub fn label(&self) -> &'static str {
        match self {
            LiveValidity::Empty => "",
            LiveValidity::Valid => "✓ Valid",
            LiveValidity::Possible => "⚠ Possible",
            LiveValidity::Invalid => "✗ Invalid",
            LiveValidity::BadFormat => "✗ Invalid Format",
        }
    }
}

/// Lookup front door shared by the TUI and the CLI
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    directory: PrefixDirectory,
}

impl Tracker {
    pub fn new(directory: PrefixDirectory) -> Self {
        Self { directory }
    }

    fn parse(&self, raw: &str) -> Result<PhoneNumber, LookupError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookupError::Empty);
        }

        phonenumber::parse(None, trimmed).map_err(|err| {
            log::debug!("Failed to parse '{}': {}", trimmed, err);
            LookupError::Format(err.to_string())
        })
    }

    /// Parses the input and rejects numbers that fail the validity rules
    pub fn validate(&self, raw: &str) -> Result<PhoneNumber, LookupError> {
        let number = self.parse(raw)?;
        if !phonenumber::is_valid(&number) {
            return Err(LookupError::Invalid);
        }
        Ok(number)
    }

    pub fn lookup(&self, raw: &str) -> Result<NumberReport, LookupError> {
        let number = self.validate(raw)?;

        let country_code = number.country().code();
        let nsn = number.national().to_string();
        let metadata = region_metadata(&number);
        let region = metadata
            .map(Metadata::id)
            .filter(|id| *id != NON_GEOGRAPHIC_REGION)
            .map(str::to_string);
        let kind = NumberKind::from_library(
            metadata.map_or(Type::Unknown, |meta| classify(meta, &nsn)),
        );

        let international = number.format().mode(Mode::International).to_string();
        let national = number.format().mode(Mode::National).to_string();
        let e164 = number.format().mode(Mode::E164).to_string();
        let digits = e164.trim_start_matches('+').to_string();

        let country_name = region
            .as_deref()
            .map(regions::country_name)
            .unwrap_or_default();
        let time_zones = match region.as_deref() {
            Some(id) => regions::time_zones(id),
            None => vec![regions::UNKNOWN_ZONE.to_string()],
        };

        let location = self
            .directory
            .location_for(&digits)
            .map(str::to_string)
            .unwrap_or_else(|| country_name.clone());
        let carrier = if kind.is_mobile() {
            self.directory
                .carrier_for(&digits)
                .map(str::to_string)
                .unwrap_or_default()
        } else {
            String::new()
        };

        let area_code_length =
            geographic_area_code_length(&number, metadata, kind, &international);
        let is_possible = metadata.is_some_and(|meta| is_possible_length(meta, &nsn));

        log::debug!(
            "Looked up {} as {} ({:?}, {})",
            raw.trim(),
            e164,
            region,
            kind
        );

        Ok(NumberReport {
            input: raw.trim().to_string(),
            time_zones,
            location,
            carrier,
            kind,
            international,
            national,
            e164,
            country_code,
            region,
            country_name,
            area_code_length,
            is_possible,
            is_valid: true,
        })
    }

    pub fn live_validity(&self, raw: &str) -> LiveValidity {
        let number = match self.parse(raw) {
            Ok(number) => number,
            Err(LookupError::Empty) => return LiveValidity::Empty,
            Err(_) => return LiveValidity::BadFormat,
        };

        if phonenumber::is_valid(&number) {
            return LiveValidity::Valid;
        }

        // Invalid numbers under a shared calling code match no region, so
        // their length is judged against the code's main country
        let metadata =
            region_metadata(&number).or_else(|| main_metadata(number.country().code()));
        match metadata {
            Some(meta) if is_possible_length(meta, &number.national().to_string()) => {
                LiveValidity::Possible
            }
            _ => LiveValidity::Invalid,
        }
    }
}

/// Region id the metadata uses for non-geographic calling codes such as +800
const NON_GEOGRAPHIC_REGION: &str = "001";

/// Metadata of the region a number belongs to.
///
/// Matching runs on the national number with its leading zeros kept, so
/// Italian fixed lines resolve to IT and +39 06698 numbers to VA.
fn region_metadata(number: &PhoneNumber) -> Option<&'static Metadata> {
    let code = number.country().code();
    let national = number.national().to_string();
    let ids = DATABASE.region(&code)?;

    if let [only] = ids.as_slice() {
        return if *only == NON_GEOGRAPHIC_REGION {
            main_metadata(code)
        } else {
            DATABASE.by_id(*only)
        };
    }

    ids.into_iter()
        .filter_map(|id| DATABASE.by_id(id))
        .find(|meta| match meta.leading_digits() {
            Some(pattern) => pattern.find(&national).is_some_and(|m| m.start() == 0),
            None => classify(meta, &national) != Type::Unknown,
        })
}

fn main_metadata(code: u16) -> Option<&'static Metadata> {
    let candidates = DATABASE.by_code(&code)?;
    candidates
        .iter()
        .copied()
        .find(|meta| meta.is_main_country_for_code())
        .or_else(|| candidates.first().copied())
}

/// Types checked before fixed line and mobile, most specific first
const SPECIAL_TYPES: [Type; 8] = [
    Type::PremiumRate,
    Type::TollFree,
    Type::SharedCost,
    Type::Voip,
    Type::PersonalNumber,
    Type::Pager,
    Type::Uan,
    Type::Voicemail,
];

/// Types whose lengths make up the possible lengths of a region
const LENGTH_TYPES: [Type; 10] = [
    Type::FixedLine,
    Type::Mobile,
    Type::TollFree,
    Type::PremiumRate,
    Type::SharedCost,
    Type::PersonalNumber,
    Type::Voip,
    Type::Pager,
    Type::Uan,
    Type::Voicemail,
];

/// Number type of a national significant number, leading zeros included
fn classify(meta: &Metadata, nsn: &str) -> Type {
    let descriptors = meta.descriptors();
    let matches = |descriptor: Option<&Descriptor>| descriptor.is_some_and(|d| d.is_match(nsn));

    if !descriptors.general().is_match(nsn) {
        return Type::Unknown;
    }

    if let Some(kind) = SPECIAL_TYPES
        .into_iter()
        .find(|kind| matches(descriptors.get(*kind)))
    {
        return kind;
    }

    if matches(descriptors.fixed_line()) {
        let same_pattern = match (descriptors.fixed_line(), descriptors.mobile()) {
            (Some(fixed), Some(mobile)) => {
                fixed.national_number().as_str() == mobile.national_number().as_str()
            }
            _ => false,
        };
        return if same_pattern || matches(descriptors.mobile()) {
            Type::FixedLineOrMobile
        } else {
            Type::FixedLine
        };
    }

    if matches(descriptors.mobile()) {
        return Type::Mobile;
    }

    Type::Unknown
}

/// Whether the length fits any number type of the region, local-only
/// lengths included
fn is_possible_length(meta: &Metadata, nsn: &str) -> bool {
    let len = nsn.len() as u16;
    let descriptors = meta.descriptors();

    LENGTH_TYPES
        .into_iter()
        .filter_map(|kind| descriptors.get(kind))
        .any(|d| d.possible_length().contains(&len) || d.possible_local_length().contains(&len))
}

fn is_geographical(kind: NumberKind, country_code: u16) -> bool {
    kind.is_geographic()
        || (kind == NumberKind::Mobile && GEO_MOBILE_COUNTRIES.contains(&country_code))
}

fn mobile_token(country_code: u16) -> Option<&'static str> {
    match country_code {
        54 => Some("9"),
        _ => None,
    }
}

/// Length of the geographic area code, or 0 when the number has none
fn geographic_area_code_length(
    number: &PhoneNumber,
    metadata: Option<&Metadata>,
    kind: NumberKind,
    international: &str,
) -> usize {
    let Some(metadata) = metadata else {
        return 0;
    };
    let country_code = number.country().code();

    // Italian numbers keep their leading zero and still carry an area code
    if metadata.national_prefix().is_none() && number.national().zeros() == 0 {
        return 0;
    }

    if kind == NumberKind::Mobile
        && GEO_MOBILE_COUNTRIES_WITHOUT_MOBILE_AREA_CODES.contains(&country_code)
    {
        return 0;
    }

    if !is_geographical(kind, country_code) {
        return 0;
    }

    national_destination_code_length(international, kind, country_code)
}

fn national_destination_code_length(international: &str, kind: NumberKind, country_code: u16) -> usize {
    let groups: Vec<&str> = DIGIT_GROUPS
        .find_iter(international)
        .map(|group| group.as_str())
        .collect();

    // Country code plus a single subscriber block means no destination code
    if groups.len() <= 2 {
        return 0;
    }

    if kind == NumberKind::Mobile && mobile_token(country_code).is_some() && groups.len() > 3 {
        return groups[1].len() + groups[2].len();
    }

    groups[1].len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> Tracker {
        Tracker::default()
    }

    #[test]
    fn test_should_format_a_valid_us_number() {
        let report = tracker().lookup("+1 650-253-0000").expect("valid number");

        assert_eq!(report.international, "+1 650-253-0000");
        assert_eq!(report.national, "(650) 253-0000");
        assert_eq!(report.e164, "+16502530000");
        assert_eq!(report.country_code, 1);
        assert_eq!(report.region.as_deref(), Some("US"));
        assert_eq!(report.country_name, "United States");
        assert!(report.is_valid);
        assert!(report.is_possible);
    }

    #[test]
    fn test_should_format_a_valid_uk_number() {
        let report = tracker().lookup("+44 20 7031 3000").expect("valid number");

        assert_eq!(report.international, "+44 20 7031 3000");
        assert_eq!(report.national, "020 7031 3000");
        assert_eq!(report.e164, "+442070313000");
        assert_eq!(report.country_code, 44);
        assert_eq!(report.time_zones, vec!["Europe/London".to_string()]);
        assert_eq!(report.area_code_length, 2);
    }

    #[test]
    fn test_should_report_a_format_error_for_unparsable_input() {
        let result = tracker().lookup("not a number");
        assert!(matches!(result, Err(LookupError::Format(_))));
    }

    #[test]
    fn test_should_require_a_country_code() {
        let result = tracker().lookup("6502530000");
        assert!(matches!(result, Err(LookupError::Format(_))));
    }

    #[test]
    fn test_should_report_an_invalid_number_that_parses() {
        assert_eq!(
            tracker().lookup("+1 650-253-000"),
            Err(LookupError::Invalid)
        );
    }

    #[test]
    fn test_should_reject_blank_input() {
        assert_eq!(tracker().lookup("   "), Err(LookupError::Empty));
    }

    #[test]
    fn test_should_render_fields_in_display_order() {
        let report = tracker().lookup("+1 650-253-0000").expect("valid number");
        let fields = report.fields();

        assert_eq!(fields.len(), FIELD_NAMES.len());
        assert_eq!(fields[6], ("E.164 Format", "+16502530000".to_string()));
        assert_eq!(fields[7], ("Country Code", "+1".to_string()));
        assert_eq!(fields[11], ("Is Valid Number", "Yes".to_string()));
    }

    #[test]
    fn test_should_prefer_directory_locations_over_country_names() {
        let directory: PrefixDirectory =
            serde_json::from_str(r#"{ "locations": { "1650": "Mountain View, CA" } }"#)
                .expect("parse directory");
        let report = Tracker::new(directory)
            .lookup("+1 650-253-0000")
            .expect("valid number");

        assert_eq!(report.location, "Mountain View, CA");
    }

    #[test]
    fn test_should_grade_live_input() {
        let tracker = tracker();
        assert_eq!(tracker.live_validity(""), LiveValidity::Empty);
        assert_eq!(tracker.live_validity("abc"), LiveValidity::BadFormat);
        assert_eq!(tracker.live_validity("+1 650-253-0000"), LiveValidity::Valid);
        assert_eq!(tracker.live_validity("+1 650"), LiveValidity::Invalid);
    }

    #[test]
    fn test_should_measure_destination_codes_from_the_international_format() {
        assert_eq!(
            national_destination_code_length("+1 650-253-0000", NumberKind::FixedLineOrMobile, 1),
            3
        );
        assert_eq!(
            national_destination_code_length("+54 9 11 2345-6789", NumberKind::Mobile, 54),
            3
        );
        assert_eq!(
            national_destination_code_length("+800 1234 5678", NumberKind::TollFree, 800),
            4
        );
        assert_eq!(
            national_destination_code_length("+882 12345678", NumberKind::Unknown, 882),
            0
        );
    }

    #[test]
    fn test_should_keep_italian_leading_zeros_when_classifying() {
        let report = tracker().lookup("+39 02 3661 8300").expect("valid number");

        assert_eq!(report.kind, NumberKind::FixedLine);
        assert_eq!(report.region.as_deref(), Some("IT"));
        assert_eq!(report.international, "+39 02 3661 8300");
        assert_eq!(report.area_code_length, 2);
        assert!(report.is_possible);
    }

    #[test]
    fn test_should_give_chinese_mobiles_no_area_code() {
        let report = tracker().lookup("+86 138 0013 8000").expect("valid number");

        assert_eq!(report.kind, NumberKind::Mobile);
        assert_eq!(report.area_code_length, 0);

        // Brazilian mobiles keep theirs
        let report = tracker().lookup("+55 11 96123-4567").expect("valid number");
        assert_eq!(report.kind, NumberKind::Mobile);
        assert_eq!(report.area_code_length, 2);
    }

    #[test]
    fn test_should_grade_invalid_numbers_of_a_possible_length_as_possible() {
        let tracker = tracker();
        assert_eq!(tracker.live_validity("+49 1234567"), LiveValidity::Possible);
        // No region under +44 claims this one; judged against GB
        assert_eq!(
            tracker.live_validity("+44 99 9999 9999"),
            LiveValidity::Possible
        );
    }

    #[test]
    fn test_should_only_name_carriers_for_mobile_capable_numbers() {
        let directory: PrefixDirectory =
            serde_json::from_str(r#"{ "carriers": { "44": "Example Mobile" } }"#)
                .expect("parse directory");
        let tracker = Tracker::new(directory);

        let fixed = tracker.lookup("+44 20 7031 3000").expect("valid number");
        assert_eq!(fixed.kind, NumberKind::FixedLine);
        assert_eq!(fixed.carrier, "");

        let mobile = tracker.lookup("+44 7912 345678").expect("valid number");
        assert_eq!(mobile.kind, NumberKind::Mobile);
        assert_eq!(mobile.carrier, "Example Mobile");
    }

    #[test]
    fn test_should_show_a_fixed_format_error_message() {
        let err = tracker().lookup("not a number").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid phone number format. Please try again."
        );
    }
}
