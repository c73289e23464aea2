use lazy_static::lazy_static;
use regex::Regex;

use super::fetch;
use super::record::{Record,Region,RegionKey};


lazy_static! {
    static ref ESTIMATE: Regex =
	Regex::new(r"Estimate.+?<td>(\d{1,3}(?:,\d{3})*)").unwrap();
    static ref POPULATION: Regex =
	Regex::new(r"Population.+?<td>(\d{1,3}(?:,\d{3})*)").unwrap();
}

static STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"), ("AK", "Alaska"), ("AS", "American Samoa"),
    ("AZ", "Arizona"), ("AR", "Arkansas"), ("CA", "California"),
    ("CO", "Colorado"), ("CT", "Connecticut"), ("DE", "Delaware"),
    ("DC", "District of Columbia"), ("FL", "Florida"), ("GA", "Georgia"),
    ("GU", "Guam"), ("HI", "Hawaii"), ("ID", "Idaho"), ("IL", "Illinois"),
    ("IN", "Indiana"), ("IA", "Iowa"), ("KS", "Kansas"), ("KY", "Kentucky"),
    ("LA", "Louisiana"), ("ME", "Maine"), ("MD", "Maryland"),
    ("MA", "Massachusetts"), ("MI", "Michigan"), ("MN", "Minnesota"),
    ("MS", "Mississippi"), ("MO", "Missouri"), ("MT", "Montana"),
    ("NE", "Nebraska"), ("NV", "Nevada"), ("NH", "New Hampshire"),
    ("NJ", "New Jersey"), ("NM", "New Mexico"), ("NY", "New York"),
    ("NC", "North Carolina"), ("ND", "North Dakota"),
    ("MP", "Northern Mariana Islands"), ("OH", "Ohio"), ("OK", "Oklahoma"),
    ("OR", "Oregon"), ("PA", "Pennsylvania"), ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"), ("SC", "South Carolina"), ("SD", "South Dakota"),
    ("TN", "Tennessee"), ("TX", "Texas"), ("UT", "Utah"), ("VT", "Vermont"),
    ("VA", "Virginia"), ("VI", "U.S. Virgin Islands"), ("WA", "Washington"),
    ("WV", "West Virginia"), ("WI", "Wisconsin"), ("WY", "Wyoming"),
];


pub fn lookup(region: &Region, records: &[Record]) -> Option<u64> {
    let url = wikipedia_url(region, records)?;
    println!("Looking up population from {}...", url);
    let html = fetch::text(&url).ok()?;
    estimate(&html)
}


pub fn wikipedia_url(region: &Region, records: &[Record]) -> Option<String> {

    let record = records.iter().find(|record| region.matches(record))?;

    match &record.key {
	RegionKey::County(None) =>
	    Some("https://en.wikipedia.org/wiki/New_York_City".to_string()),
	RegionKey::County(Some(6075)) =>
	    Some("https://en.wikipedia.org/wiki/San_Francisco".to_string()),
	RegionKey::County(Some(_)) => Some(format!(
	    "https://en.wikipedia.org/wiki/{}_County,_{}",
	    record.name.replace(' ', "_"), record.area.replace(' ', "_"))),
	RegionKey::Country(_) => Some(format!(
	    "https://en.wikipedia.org/wiki/{}", record.name)),
	RegionKey::State(code) => state_name(code).map(|name| format!(
	    "https://en.wikipedia.org/wiki/{}", name.replace(' ', "_"))),
    }

}


fn estimate(html: &str) -> Option<u64> {
    ESTIMATE.captures(html)
	.or_else(|| POPULATION.captures(html))
	.and_then(|captures| captures.get(1))
	.and_then(|figure| figure.as_str().replace(',', "").parse().ok())
}


fn state_name(code: &str) -> Option<&'static str> {
    STATES.iter().find(|(abbr, _)| *abbr == code).map(|(_, name)| *name)
}


#[cfg(test)]
mod tests {

    use std::collections::BTreeMap;

    use chrono::naive::NaiveDate;

    use super::*;

    fn record(key: RegionKey, name: &str, area: &str) -> Record {
	Record {
	    date: NaiveDate::from_ymd(2020, 3, 1),
	    key,
	    name: name.to_string(),
	    area: area.to_string(),
	    cases: 0,
	    deaths: 0,
	    population: None,
	    extra: BTreeMap::new(),
	}
    }

    #[test]
    fn estimate_reads_the_infobox_figure() {
	let html = "<table><tr><th>Estimate</th><td>8,336,817</td></tr></table>";
	assert_eq!(estimate(html), Some(8336817));
    }

    #[test]
    fn estimate_falls_back_to_population_rows() {
	let html = "<tr><th>Population (2019)</th><td>197,800</td></tr>";
	assert_eq!(estimate(html), Some(197800));
	assert_eq!(estimate("<p>no figures here</p>"), None);
    }

    #[test]
    fn county_pages_use_county_and_state() {
	let records = vec![record(RegionKey::County(Some(53005)), "Benton", "Washington")];
	assert_eq!(wikipedia_url(&Region::Fips(53005), &records).unwrap(),
		   "https://en.wikipedia.org/wiki/Benton_County,_Washington");
    }

    #[test]
    fn special_pages_for_new_york_city_and_san_francisco() {
	let records = vec![
	    record(RegionKey::County(None), "New York City", "New York"),
	    record(RegionKey::County(Some(6075)), "San Francisco", "California"),
	];
	assert_eq!(wikipedia_url(&Region::Fips(-1), &records).unwrap(),
		   "https://en.wikipedia.org/wiki/New_York_City");
	assert_eq!(wikipedia_url(&Region::Fips(6075), &records).unwrap(),
		   "https://en.wikipedia.org/wiki/San_Francisco");
    }

    #[test]
    fn country_pages_use_the_reported_name() {
	let records = vec![record(RegionKey::Country("BE".to_string()),
				  "Belgium", "Belgium")];
	assert_eq!(wikipedia_url(&Region::Code("BE".to_string()), &records).unwrap(),
		   "https://en.wikipedia.org/wiki/Belgium");
    }

    #[test]
    fn state_pages_come_from_the_abbreviation_table() {
	let records = vec![
	    record(RegionKey::State("WA".to_string()), "WA", "WA"),
	    record(RegionKey::State("XX".to_string()), "XX", "XX"),
	];
	assert_eq!(wikipedia_url(&Region::State("WA".to_string()), &records).unwrap(),
		   "https://en.wikipedia.org/wiki/Washington");
	assert_eq!(wikipedia_url(&Region::State("XX".to_string()), &records), None);
	assert_eq!(wikipedia_url(&Region::State("NM".to_string()), &records), None);
    }

}
