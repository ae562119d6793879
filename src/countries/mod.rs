//! Country data: typed records and the lookup service behind them

pub mod client;
pub mod record;

pub use client::{parse_lookup_body, CountrySource, LookupError, RestCountriesClient};
pub use record::{group_thousands, CountryRecord, UNKNOWN};
