//! Typed country record as returned by REST Countries v3.1
//!
//! Every field is optional on the wire. Formatting code never inspects the
//! raw fields: it goes through the accessors, which supply [`UNKNOWN`] (or an
//! empty list) when the service left something out.

use crate::i18n::{tr, Locale, Text};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder shown for a missing scalar field
pub const UNKNOWN: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryNames {
    pub common: Option<String>,
    pub official: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagImages {
    pub png: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
}

/// International direct dialing: `root` + each suffix is a calling code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Idd {
    pub root: Option<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    name: Option<CountryNames>,
    capital: Option<Vec<String>>,
    population: Option<u64>,
    region: Option<String>,
    subregion: Option<String>,
    area: Option<f64>,
    languages: Option<BTreeMap<String, String>>,
    currencies: Option<BTreeMap<String, Currency>>,
    flag: Option<String>,
    flags: Option<FlagImages>,
    borders: Option<Vec<String>>,
    timezones: Option<Vec<String>>,
    idd: Option<Idd>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

impl CountryRecord {
    /// Common name, or [`UNKNOWN`]
    pub fn name(&self) -> &str {
        non_empty(self.name.as_ref().and_then(|n| n.common.as_ref())).unwrap_or(UNKNOWN)
    }

    /// Official name, falling back to the common name
    pub fn official_name(&self) -> &str {
        non_empty(self.name.as_ref().and_then(|n| n.official.as_ref())).unwrap_or_else(|| self.name())
    }

    /// First listed capital, or [`UNKNOWN`]
    pub fn capital(&self) -> &str {
        non_empty(self.capital.as_ref().and_then(|c| c.first())).unwrap_or(UNKNOWN)
    }

    pub fn population(&self) -> Option<u64> {
        self.population
    }

    /// Population with grouped thousands (`47,351,567`), or [`UNKNOWN`]
    pub fn population_display(&self) -> String {
        self.population
            .map(group_thousands)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    pub fn region(&self) -> &str {
        non_empty(self.region.as_ref()).unwrap_or(UNKNOWN)
    }

    pub fn subregion(&self) -> &str {
        non_empty(self.subregion.as_ref()).unwrap_or(UNKNOWN)
    }

    pub fn area(&self) -> Option<f64> {
        self.area
    }

    /// Area in km² with grouped thousands, or [`UNKNOWN`]
    pub fn area_display(&self) -> String {
        match self.area {
            Some(area) if area.is_finite() && area >= 0.0 => format!("{} km²", format_area(area)),
            _ => UNKNOWN.to_string(),
        }
    }

    /// Flag emoji, or an empty string
    pub fn flag(&self) -> &str {
        non_empty(self.flag.as_ref()).unwrap_or("")
    }

    pub fn flag_png_url(&self) -> Option<&str> {
        non_empty(self.flags.as_ref().and_then(|f| f.png.as_ref()))
    }

    /// Language names ordered by language code; empty when absent
    pub fn languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .flat_map(|map| map.values())
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
            .collect()
    }

    /// Currency names with their symbol, ordered by currency code; empty when absent
    pub fn currencies(&self) -> Vec<String> {
        self.currencies
            .iter()
            .flat_map(|map| map.iter())
            .map(|(code, currency)| {
                let name = non_empty(currency.name.as_ref()).unwrap_or(code.as_str());
                match non_empty(currency.symbol.as_ref()) {
                    Some(symbol) => format!("{} ({})", name, symbol),
                    None => name.to_string(),
                }
            })
            .collect()
    }

    pub fn borders(&self) -> &[String] {
        self.borders.as_deref().unwrap_or(&[])
    }

    pub fn timezones(&self) -> &[String] {
        self.timezones.as_deref().unwrap_or(&[])
    }

    /// Calling code built from the IDD root and its first suffix (`+34`)
    pub fn calling_code(&self) -> Option<String> {
        let idd = self.idd.as_ref()?;
        let root = non_empty(idd.root.as_ref())?;
        // Countries with many suffixes (e.g. +1 xxx) list only the root meaningfully
        match idd.suffixes.as_slice() {
            [single] => Some(format!("{}{}", root, single)),
            _ => Some(root.to_string()),
        }
    }

    /// Plain-text fact sheet handed to the synthesis prompt.
    ///
    /// The fixed lines always appear (with placeholders when data is
    /// missing). The official name, flag image, languages, currencies,
    /// borders, timezones and calling code only appear when the record has them.
    pub fn fact_sheet(&self, locale: Locale) -> String {
        let mut lines = vec![
            format!("{}: {}", tr(locale, Text::LabelName), self.name()),
            format!("{}: {}", tr(locale, Text::LabelCapital), self.capital()),
            format!("{}: {}", tr(locale, Text::LabelPopulation), self.population_display()),
            format!("{}: {}", tr(locale, Text::LabelRegion), self.region()),
            format!("{}: {}", tr(locale, Text::LabelSubregion), self.subregion()),
            format!("{}: {}", tr(locale, Text::LabelArea), self.area_display()),
            format!("{}: {}", tr(locale, Text::LabelFlag), self.flag()).trim_end().to_string(),
        ];

        if self.official_name() != self.name() {
            lines.insert(1, format!("{}: {}", tr(locale, Text::LabelOfficialName), self.official_name()));
        }

        if let Some(url) = self.flag_png_url() {
            lines.push(format!("{}: {}", tr(locale, Text::LabelFlagImage), url));
        }

        let languages = self.languages();
        if !languages.is_empty() {
            lines.push(format!("{}: {}", tr(locale, Text::LabelLanguages), languages.join(", ")));
        }

        let currencies = self.currencies();
        if !currencies.is_empty() {
            lines.push(format!("{}: {}", tr(locale, Text::LabelCurrencies), currencies.join(", ")));
        }

        if !self.borders().is_empty() {
            lines.push(format!("{}: {}", tr(locale, Text::LabelBorders), self.borders().join(", ")));
        }

        if !self.timezones().is_empty() {
            lines.push(format!("{}: {}", tr(locale, Text::LabelTimezones), self.timezones().join(", ")));
        }

        if let Some(code) = self.calling_code() {
            lines.push(format!("{}: {}", tr(locale, Text::LabelCallingCode), code));
        }

        lines.join("\n")
    }
}

/// `1234567` → `"1,234,567"`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped integer part; the fractional part (up to two decimals) only when non-zero
fn format_area(area: f64) -> String {
    let rounded = (area * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;
    if cents == 0 {
        group_thousands(whole)
    } else {
        let fraction = format!("{:02}", cents);
        format!("{}.{}", group_thousands(whole), fraction.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spain() -> CountryRecord {
        serde_json::from_value(json!({
            "name": {"common": "Spain", "official": "Kingdom of Spain"},
            "capital": ["Madrid"],
            "population": 47351567,
            "region": "Europe",
            "subregion": "Southern Europe",
            "area": 505992.0,
            "languages": {"spa": "Spanish"},
            "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
            "flag": "🇪🇸",
            "flags": {"png": "https://flagcdn.com/w320/es.png"},
            "borders": ["AND", "FRA", "GIB", "PRT", "MAR"],
            "timezones": ["UTC", "UTC+01:00"],
            "idd": {"root": "+3", "suffixes": ["4"]}
        }))
        .unwrap()
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(47351567), "47,351,567");
        assert_eq!(group_thousands(1402112000), "1,402,112,000");
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(505992.0), "505,992");
        assert_eq!(format_area(2.02), "2.02");
        assert_eq!(format_area(0.5), "0.5");
    }

    #[test]
    fn test_accessors_on_full_record() {
        let record = spain();
        assert_eq!(record.name(), "Spain");
        assert_eq!(record.official_name(), "Kingdom of Spain");
        assert_eq!(record.capital(), "Madrid");
        assert_eq!(record.population_display(), "47,351,567");
        assert_eq!(record.area_display(), "505,992 km²");
        assert_eq!(record.languages(), vec!["Spanish"]);
        assert_eq!(record.currencies(), vec!["Euro (€)".to_string()]);
        assert_eq!(record.calling_code().as_deref(), Some("+34"));
        assert_eq!(record.flag_png_url(), Some("https://flagcdn.com/w320/es.png"));
    }

    #[test]
    fn test_missing_fields_degrade_to_placeholder() {
        let record: CountryRecord = serde_json::from_value(json!({
            "name": {"common": "Antarctica"},
            "capital": [],
            "region": ""
        }))
        .unwrap();

        assert_eq!(record.name(), "Antarctica");
        assert_eq!(record.capital(), UNKNOWN);
        assert_eq!(record.region(), UNKNOWN);
        assert_eq!(record.population_display(), UNKNOWN);
        assert_eq!(record.area_display(), UNKNOWN);
        assert_eq!(record.flag(), "");
        assert!(record.languages().is_empty());
        assert!(record.currencies().is_empty());
        assert!(record.calling_code().is_none());
    }

    #[test]
    fn test_fact_sheet_full() {
        let sheet = spain().fact_sheet(Locale::Spanish);
        assert!(sheet.contains("Nombre: Spain"));
        assert!(sheet.contains("Población: 47,351,567"));
        assert!(sheet.contains("Área: 505,992 km²"));
        assert!(sheet.contains("Idiomas: Spanish"));
        assert!(sheet.contains("Monedas: Euro (€)"));
        assert!(sheet.contains("Código de llamada: +34"));
        assert!(sheet.contains("Nombre oficial: Kingdom of Spain"));
        assert!(sheet.contains("Imagen de la bandera: https://flagcdn.com/w320/es.png"));
    }

    #[test]
    fn test_fact_sheet_skips_missing_official_name_and_flag_image() {
        let record: CountryRecord = serde_json::from_value(json!({
            "name": {"common": "Nowhere"},
            "flag": "🏳"
        }))
        .unwrap();

        let sheet = record.fact_sheet(Locale::English);
        assert!(sheet.starts_with("Name: Nowhere\nCapital: N/A"));
        assert!(!sheet.contains("Official name"));
        assert!(!sheet.contains("Flag image"));
        assert!(sheet.contains("Flag: 🏳"));
    }

    #[test]
    fn test_fact_sheet_omits_missing_currencies() {
        let record: CountryRecord = serde_json::from_value(json!({
            "name": {"common": "Nowhere"},
            "languages": {"eng": "English"}
        }))
        .unwrap();

        for locale in [Locale::Spanish, Locale::English] {
            let sheet = record.fact_sheet(locale);
            assert!(!sheet.contains("Monedas"));
            assert!(!sheet.contains("Currencies"));
            assert!(sheet.lines().any(|l| l.ends_with("English")));
        }
    }

    #[test]
    fn test_currency_without_name_uses_code() {
        let record: CountryRecord = serde_json::from_value(json!({
            "currencies": {"XYZ": {}}
        }))
        .unwrap();
        assert_eq!(record.currencies(), vec!["XYZ".to_string()]);
    }
}
