use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use chrono::naive::NaiveDate;

use super::error::{Result,Error};
use super::fetch;
use super::record::{Record,RegionKey};
use super::series::Convention;


pub const CONVENTION: Convention = Convention::Daily;
pub const CITATION: &str =
    "Data from the European Centre for Disease Prevention and Control - https://www.ecdc.europa.eu/en/publications-data/download-todays-data-geographic-distribution-covid-19-cases-worldwide";

const URL: &str = "https://opendata.ecdc.europa.eu/covid19/casedistribution/csv";


#[derive(Deserialize,Debug)]
struct Row {
    year: i32,
    month: u32,
    day: u32,
    cases: i64,
    deaths: i64,
    #[serde(rename = "countriesAndTerritories")]
    country: String,
    #[serde(rename = "geoId")]
    geo_id: String,
    #[serde(rename = "popData2019")]
    population: Option<u64>,
}


pub fn records(cache_path: &Path, update: bool) -> Result<Vec<Record>> {
    let text = fetch::cached_text(&cache_path.join("ecdc"), "casedistribution.csv",
				  URL, update)?;
    parse(&text)
}


fn parse(text: &str) -> Result<Vec<Record>> {

    let mut reader = csv::Reader::from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for &required in ["year", "month", "day", "cases", "deaths",
		      "countriesAndTerritories", "geoId"].iter() {
	if !headers.iter().any(|header| header == required) {
	    return Err(Error::MissingColumn(required));
	}
    }

    let mut records = Vec::new();

    // rows arrive newest first
    for row in reader.deserialize::<Row>() {

	let row = match row {
	    Ok(row) => row,
	    Err(_) => continue,
	};

	let date = match NaiveDate::from_ymd_opt(row.year, row.month, row.day) {
	    Some(date) => date,
	    None => continue,
	};

	records.push(Record {
	    date,
	    key: RegionKey::Country(row.geo_id),
	    name: row.country.clone(),
	    area: row.country,
	    cases: row.cases,
	    deaths: row.deaths,
	    population: row.population,
	    extra: BTreeMap::new(),
	});

    }

    records.reverse();
    Ok(records)

}
