//! Region names and time zones
//!
//! Country-level data keyed by ISO 3166-1 alpha-2 region id. The phone number
//! library resolves a number to its region; this table turns that region into
//! the English country name and the IANA zones shown in the results.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Zone list reported for regions without an entry
pub const UNKNOWN_ZONE: &str = "Etc/Unknown";

#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub zones: &'static [&'static str],
}

/// Countries offered by the quick country code picker
pub const QUICK_COUNTRY_CODES: &[(&str, u16)] = &[
    ("United States", 1),
    ("United Kingdom", 44),
    ("India", 91),
    ("China", 86),
    ("Japan", 81),
    ("Germany", 49),
    ("France", 33),
    ("Australia", 61),
    ("Canada", 1),
    ("Brazil", 55),
];

const REGIONS: &[Region] = &[
    Region { id: "AE", name: "United Arab Emirates", zones: &["Asia/Dubai"] },
    Region { id: "AF", name: "Afghanistan", zones: &["Asia/Kabul"] },
    Region { id: "AL", name: "Albania", zones: &["Europe/Tirane"] },
    Region { id: "AM", name: "Armenia", zones: &["Asia/Yerevan"] },
    Region { id: "AO", name: "Angola", zones: &["Africa/Luanda"] },
    Region {
        id: "AR",
        name: "Argentina",
        zones: &["America/Argentina/Buenos_Aires", "America/Argentina/Cordoba"],
    },
    Region { id: "AT", name: "Austria", zones: &["Europe/Vienna"] },
    Region {
        id: "AU",
        name: "Australia",
        zones: &[
            "Australia/Adelaide",
            "Australia/Brisbane",
            "Australia/Darwin",
            "Australia/Hobart",
            "Australia/Melbourne",
            "Australia/Perth",
            "Australia/Sydney",
        ],
    },
    Region { id: "AZ", name: "Azerbaijan", zones: &["Asia/Baku"] },
    Region { id: "BA", name: "Bosnia & Herzegovina", zones: &["Europe/Sarajevo"] },
    Region { id: "BD", name: "Bangladesh", zones: &["Asia/Dhaka"] },
    Region { id: "BE", name: "Belgium", zones: &["Europe/Brussels"] },
    Region { id: "BG", name: "Bulgaria", zones: &["Europe/Sofia"] },
    Region { id: "BH", name: "Bahrain", zones: &["Asia/Bahrain"] },
    Region { id: "BO", name: "Bolivia", zones: &["America/La_Paz"] },
    Region {
        id: "BR",
        name: "Brazil",
        zones: &[
            "America/Belem",
            "America/Fortaleza",
            "America/Manaus",
            "America/Noronha",
            "America/Recife",
            "America/Sao_Paulo",
        ],
    },
    Region { id: "BY", name: "Belarus", zones: &["Europe/Minsk"] },
    Region {
        id: "CA",
        name: "Canada",
        zones: &[
            "America/Edmonton",
            "America/Halifax",
            "America/Regina",
            "America/St_Johns",
            "America/Toronto",
            "America/Vancouver",
            "America/Winnipeg",
        ],
    },
    Region { id: "CH", name: "Switzerland", zones: &["Europe/Zurich"] },
    Region { id: "CL", name: "Chile", zones: &["America/Santiago", "Pacific/Easter"] },
    Region { id: "CM", name: "Cameroon", zones: &["Africa/Douala"] },
    Region { id: "CN", name: "China", zones: &["Asia/Shanghai"] },
    Region { id: "CO", name: "Colombia", zones: &["America/Bogota"] },
    Region { id: "CR", name: "Costa Rica", zones: &["America/Costa_Rica"] },
    Region { id: "CU", name: "Cuba", zones: &["America/Havana"] },
    Region { id: "CY", name: "Cyprus", zones: &["Asia/Nicosia"] },
    Region { id: "CZ", name: "Czechia", zones: &["Europe/Prague"] },
    Region { id: "DE", name: "Germany", zones: &["Europe/Berlin"] },
    Region { id: "DK", name: "Denmark", zones: &["Europe/Copenhagen"] },
    Region { id: "DO", name: "Dominican Republic", zones: &["America/Santo_Domingo"] },
    Region { id: "DZ", name: "Algeria", zones: &["Africa/Algiers"] },
    Region { id: "EC", name: "Ecuador", zones: &["America/Guayaquil", "Pacific/Galapagos"] },
    Region { id: "EE", name: "Estonia", zones: &["Europe/Tallinn"] },
    Region { id: "EG", name: "Egypt", zones: &["Africa/Cairo"] },
    Region { id: "ES", name: "Spain", zones: &["Africa/Ceuta", "Atlantic/Canary", "Europe/Madrid"] },
    Region { id: "ET", name: "Ethiopia", zones: &["Africa/Addis_Ababa"] },
    Region { id: "FI", name: "Finland", zones: &["Europe/Helsinki"] },
    Region { id: "FR", name: "France", zones: &["Europe/Paris"] },
    Region { id: "GB", name: "United Kingdom", zones: &["Europe/London"] },
    Region { id: "GE", name: "Georgia", zones: &["Asia/Tbilisi"] },
    Region { id: "GH", name: "Ghana", zones: &["Africa/Accra"] },
    Region { id: "GR", name: "Greece", zones: &["Europe/Athens"] },
    Region { id: "GT", name: "Guatemala", zones: &["America/Guatemala"] },
    Region { id: "HK", name: "Hong Kong", zones: &["Asia/Hong_Kong"] },
    Region { id: "HN", name: "Honduras", zones: &["America/Tegucigalpa"] },
    Region { id: "HR", name: "Croatia", zones: &["Europe/Zagreb"] },
    Region { id: "HU", name: "Hungary", zones: &["Europe/Budapest"] },
    Region {
        id: "ID",
        name: "Indonesia",
        zones: &["Asia/Jakarta", "Asia/Jayapura", "Asia/Makassar", "Asia/Pontianak"],
    },
    Region { id: "IE", name: "Ireland", zones: &["Europe/Dublin"] },
    Region { id: "IL", name: "Israel", zones: &["Asia/Jerusalem"] },
    Region { id: "IN", name: "India", zones: &["Asia/Calcutta"] },
    Region { id: "IQ", name: "Iraq", zones: &["Asia/Baghdad"] },
    Region { id: "IR", name: "Iran", zones: &["Asia/Tehran"] },
    Region { id: "IS", name: "Iceland", zones: &["Atlantic/Reykjavik"] },
    Region { id: "IT", name: "Italy", zones: &["Europe/Rome"] },
    Region { id: "JM", name: "Jamaica", zones: &["America/Jamaica"] },
    Region { id: "JO", name: "Jordan", zones: &["Asia/Amman"] },
    Region { id: "JP", name: "Japan", zones: &["Asia/Tokyo"] },
    Region { id: "KE", name: "Kenya", zones: &["Africa/Nairobi"] },
    Region { id: "KH", name: "Cambodia", zones: &["Asia/Phnom_Penh"] },
    Region { id: "KR", name: "South Korea", zones: &["Asia/Seoul"] },
    Region { id: "KW", name: "Kuwait", zones: &["Asia/Kuwait"] },
    Region { id: "KZ", name: "Kazakhstan", zones: &["Asia/Almaty", "Asia/Aqtobe"] },
    Region { id: "LB", name: "Lebanon", zones: &["Asia/Beirut"] },
    Region { id: "LK", name: "Sri Lanka", zones: &["Asia/Colombo"] },
    Region { id: "LT", name: "Lithuania", zones: &["Europe/Vilnius"] },
    Region { id: "LU", name: "Luxembourg", zones: &["Europe/Luxembourg"] },
    Region { id: "LV", name: "Latvia", zones: &["Europe/Riga"] },
    Region { id: "MA", name: "Morocco", zones: &["Africa/Casablanca"] },
    Region { id: "MD", name: "Moldova", zones: &["Europe/Chisinau"] },
    Region { id: "MK", name: "North Macedonia", zones: &["Europe/Skopje"] },
    Region { id: "MM", name: "Myanmar (Burma)", zones: &["Asia/Rangoon"] },
    Region { id: "MN", name: "Mongolia", zones: &["Asia/Ulaanbaatar"] },
    Region { id: "MT", name: "Malta", zones: &["Europe/Malta"] },
    Region {
        id: "MX",
        name: "Mexico",
        zones: &["America/Cancun", "America/Mexico_City", "America/Monterrey", "America/Tijuana"],
    },
    Region { id: "MY", name: "Malaysia", zones: &["Asia/Kuala_Lumpur"] },
    Region { id: "NG", name: "Nigeria", zones: &["Africa/Lagos"] },
    Region { id: "NI", name: "Nicaragua", zones: &["America/Managua"] },
    Region { id: "NL", name: "Netherlands", zones: &["Europe/Amsterdam"] },
    Region { id: "NO", name: "Norway", zones: &["Europe/Oslo"] },
    Region { id: "NP", name: "Nepal", zones: &["Asia/Katmandu"] },
    Region { id: "NZ", name: "New Zealand", zones: &["Pacific/Auckland", "Pacific/Chatham"] },
    Region { id: "OM", name: "Oman", zones: &["Asia/Muscat"] },
    Region { id: "PA", name: "Panama", zones: &["America/Panama"] },
    Region { id: "PE", name: "Peru", zones: &["America/Lima"] },
    Region { id: "PH", name: "Philippines", zones: &["Asia/Manila"] },
    Region { id: "PK", name: "Pakistan", zones: &["Asia/Karachi"] },
    Region { id: "PL", name: "Poland", zones: &["Europe/Warsaw"] },
    Region { id: "PR", name: "Puerto Rico", zones: &["America/Puerto_Rico"] },
    Region { id: "PT", name: "Portugal", zones: &["Atlantic/Azores", "Europe/Lisbon"] },
    Region { id: "PY", name: "Paraguay", zones: &["America/Asuncion"] },
    Region { id: "QA", name: "Qatar", zones: &["Asia/Qatar"] },
    Region { id: "RO", name: "Romania", zones: &["Europe/Bucharest"] },
    Region { id: "RS", name: "Serbia", zones: &["Europe/Belgrade"] },
    Region {
        id: "RU",
        name: "Russia",
        zones: &[
            "Asia/Novosibirsk",
            "Asia/Vladivostok",
            "Asia/Yekaterinburg",
            "Europe/Kaliningrad",
            "Europe/Moscow",
            "Europe/Samara",
        ],
    },
    Region { id: "SA", name: "Saudi Arabia", zones: &["Asia/Riyadh"] },
    Region { id: "SE", name: "Sweden", zones: &["Europe/Stockholm"] },
    Region { id: "SG", name: "Singapore", zones: &["Asia/Singapore"] },
    Region { id: "SI", name: "Slovenia", zones: &["Europe/Ljubljana"] },
    Region { id: "SK", name: "Slovakia", zones: &["Europe/Bratislava"] },
    Region { id: "SN", name: "Senegal", zones: &["Africa/Dakar"] },
    Region { id: "SV", name: "El Salvador", zones: &["America/El_Salvador"] },
    Region { id: "TH", name: "Thailand", zones: &["Asia/Bangkok"] },
    Region { id: "TN", name: "Tunisia", zones: &["Africa/Tunis"] },
    Region { id: "TR", name: "Türkiye", zones: &["Europe/Istanbul"] },
    Region { id: "TW", name: "Taiwan", zones: &["Asia/Taipei"] },
    Region { id: "TZ", name: "Tanzania", zones: &["Africa/Dar_es_Salaam"] },
    Region {
        id: "UA",
        name: "Ukraine",
        zones: &["Europe/Kiev", "Europe/Simferopol", "Europe/Uzhgorod", "Europe/Zaporozhye"],
    },
    Region { id: "UG", name: "Uganda", zones: &["Africa/Kampala"] },
    Region {
        id: "US",
        name: "United States",
        zones: &[
            "America/Anchorage",
            "America/Chicago",
            "America/Denver",
            "America/Los_Angeles",
            "America/New_York",
            "America/Phoenix",
            "Pacific/Honolulu",
        ],
    },
    Region { id: "UY", name: "Uruguay", zones: &["America/Montevideo"] },
    Region { id: "UZ", name: "Uzbekistan", zones: &["Asia/Tashkent"] },
    Region { id: "VE", name: "Venezuela", zones: &["America/Caracas"] },
    Region { id: "VN", name: "Vietnam", zones: &["Asia/Saigon"] },
    Region { id: "ZA", name: "South Africa", zones: &["Africa/Johannesburg"] },
    Region { id: "ZM", name: "Zambia", zones: &["Africa/Lusaka"] },
    Region { id: "ZW", name: "Zimbabwe", zones: &["Africa/Harare"] },
];

static REGION_INDEX: Lazy<HashMap<&'static str, &'static Region>> =
    Lazy::new(|| REGIONS.iter().map(|region| (region.id, region)).collect());

pub fn find(id: &str) -> Option<&'static Region> {
    REGION_INDEX.get(id.to_ascii_uppercase().as_str()).copied()
}

/// English country name for a region id, falling back to the id itself
pub fn country_name(id: &str) -> String {
    find(id)
        .map(|region| region.name.to_string())
        .unwrap_or_else(|| id.to_ascii_uppercase())
}

pub fn time_zones(id: &str) -> Vec<String> {
    match find(id) {
        Some(region) => region.zones.iter().map(|zone| zone.to_string()).collect(),
        None => vec![UNKNOWN_ZONE.to_string()],
    }
}

/// Entries formatted the way the picker lists them, e.g. "India (+91)"
pub fn quick_picker_labels() -> Vec<String> {
    QUICK_COUNTRY_CODES
        .iter()
        .map(|(name, code)| format!("{} (+{})", name, code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resolve_names_case_insensitively() {
        assert_eq!(country_name("gb"), "United Kingdom");
        assert_eq!(country_name("US"), "United States");
    }

    #[test]
    fn test_should_fall_back_for_unlisted_regions() {
        assert_eq!(country_name("XK"), "XK");
        assert_eq!(time_zones("XK"), vec![UNKNOWN_ZONE.to_string()]);
    }

    #[test]
    fn test_should_keep_region_ids_unique() {
        assert_eq!(REGION_INDEX.len(), REGIONS.len());
    }

    #[test]
    fn test_should_label_quick_picker_entries() {
        let labels = quick_picker_labels();
        assert_eq!(labels.len(), 10);
        assert_eq!(labels[0], "United States (+1)");
        assert_eq!(labels[2], "India (+91)");
    }
}
