use std::collections::BTreeMap;
use std::fmt;

use chrono::naive::NaiveDate;
use csv::StringRecord;

use super::error::{Result,Error};


pub const NYC_FIPS: i32 = -1;
pub const NYC_NAME: &str = "New York City";


#[derive(Debug,Clone)]
pub struct Record {
    pub date: NaiveDate,
    pub key: RegionKey,
    pub name: String,
    pub area: String,
    pub cases: i64,
    pub deaths: i64,
    pub population: Option<u64>,
    pub extra: BTreeMap<String,f64>,
}


#[derive(Debug,Clone,PartialEq)]
pub enum RegionKey {
    County(Option<u32>),
    Country(String),
    State(String),
}


#[derive(Debug,Clone,PartialEq)]
pub enum Region {
    Fips(i32),
    Code(String),
    State(String),
}

impl Region {

    pub fn parse(selector: &str, state: bool) -> Result<Region> {
	match (state, selector.parse::<i32>()) {
	    (true, Ok(_)) => Err(Error::Usage(format!(
		"-state expects a state abbreviation, got {}", selector))),
	    (true, Err(_)) => Ok(Region::State(selector.to_uppercase())),
	    (false, Ok(fips)) => Ok(Region::Fips(fips)),
	    (false, Err(_)) => Ok(Region::Code(selector.to_uppercase())),
	}
    }

    pub fn matches(&self, record: &Record) -> bool {
	match (self, &record.key) {
	    (Region::State(code), _) => record.area == *code,
	    (_, RegionKey::Country(geo)) => match self {
		Region::Code(code) => code == geo,
		_ => false,
	    },
	    (Region::Code(_), _) => false,
	    (Region::Fips(fips), RegionKey::County(Some(code))) =>
		*fips >= 0 && *code == *fips as u32,
	    (Region::Fips(fips), RegionKey::County(None)) =>
		*fips == NYC_FIPS && record.name == NYC_NAME,
	    (Region::Fips(_), RegionKey::State(_)) => false,
	}
    }

}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
	match self {
	    Region::Fips(fips) => write!(f, "fips {}", fips),
	    Region::Code(code) => write!(f, "country {}", code),
	    Region::State(code) => write!(f, "state {}", code),
	}
    }
}


pub fn matched<'a>(records: &'a [Record], region: &Region) -> Vec<&'a Record> {
    records.iter().filter(|record| region.matches(record)).collect()
}


pub fn column(headers: &StringRecord, name: &'static str) -> Result<usize> {
    headers.iter().position(|header| header == name)
	.ok_or(Error::MissingColumn(name))
}
