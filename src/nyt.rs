use std::collections::BTreeMap;
use std::path::Path;

use chrono::naive::NaiveDate;

use super::error::Result;
use super::fetch;
use super::record::{column,Record,RegionKey};
use super::series::Convention;


pub const CONVENTION: Convention = Convention::Cumulative;
pub const CITATION: &str =
    "Data from The New York Times - https://github.com/nytimes/covid-19-data";

const URL: &str =
    "https://raw.githubusercontent.com/nytimes/covid-19-data/master/us-counties.csv";


pub fn records(cache_path: &Path, update: bool) -> Result<Vec<Record>> {
    let text = fetch::cached_text(&cache_path.join("nyt"), "us-counties.csv",
				  URL, update)?;
    parse(&text)
}


fn parse(text: &str) -> Result<Vec<Record>> {

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let date_col = column(&headers, "date")?;
    let county_col = column(&headers, "county")?;
    let state_col = column(&headers, "state")?;
    let fips_col = column(&headers, "fips")?;
    let cases_col = column(&headers, "cases")?;
    let deaths_col = column(&headers, "deaths")?;

    let mut records = Vec::new();

    for row in reader.into_records() {

	let row = match row {
	    Ok(row) => row,
	    Err(_) => continue,
	};

	let date = match NaiveDate::parse_from_str(row.get(date_col).unwrap_or(""),
						   "%Y-%m-%d") {
	    Ok(date) => date,
	    Err(_) => continue,
	};

	let fips = match row.get(fips_col).unwrap_or("") {
	    "" => None,
	    field => match field.parse::<u32>() {
		Ok(fips) => Some(fips),
		Err(_) => continue,
	    },
	};

	let (cases, deaths) = match (row.get(cases_col).unwrap_or("").parse::<i64>(),
				     row.get(deaths_col).unwrap_or("").parse::<i64>()) {
	    (Ok(cases), Ok(deaths)) => (cases, deaths),
	    _ => continue,
	};

	records.push(Record {
	    date,
	    key: RegionKey::County(fips),
	    name: row.get(county_col).unwrap_or("").to_string(),
	    area: row.get(state_col).unwrap_or("").to_string(),
	    cases,
	    deaths,
	    population: None,
	    extra: BTreeMap::new(),
	});

    }

    Ok(records)

}


#[cfg(test)]
mod tests {

    use super::*;
    use super::super::error::Error;

    static SAMPLE: &str = "\
date,county,state,fips,cases,deaths
2020-03-01,Benton,Washington,53005,1,0
2020-03-01,New York City,New York,,12,0
2020-03-01,San Francisco,California,06075,9,0
2020-03-02,Benton,Washington,53005,bad,0
2020-03-02,Benton,Washington,53005,3,1
";

    #[test]
    fn parses_county_rows() {
	let records = parse(SAMPLE).unwrap();
	assert_eq!(records.len(), 4);
	assert_eq!(records[0].key, RegionKey::County(Some(53005)));
	assert_eq!(records[0].name, "Benton");
	assert_eq!(records[0].area, "Washington");
	assert_eq!(records[0].cases, 1);
	assert_eq!(records[0].date, NaiveDate::from_ymd(2020, 3, 1));
    }

    #[test]
    fn empty_fips_becomes_the_sentinel_key() {
	let records = parse(SAMPLE).unwrap();
	assert_eq!(records[1].key, RegionKey::County(None));
	assert_eq!(records[1].name, "New York City");
    }

    #[test]
    fn leading_zero_codes_parse_numerically() {
	let records = parse(SAMPLE).unwrap();
	assert_eq!(records[2].key, RegionKey::County(Some(6075)));
    }

    #[test]
    fn malformed_counts_skip_the_row() {
	let records = parse(SAMPLE).unwrap();
	assert_eq!(records[3].cases, 3);
	assert_eq!(records[3].deaths, 1);
	assert_eq!(records[3].date, NaiveDate::from_ymd(2020, 3, 2));
    }

    #[test]
    fn missing_columns_fail_the_source() {
	match parse("date,county,state,cases,deaths\n") {
	    Err(Error::MissingColumn(name)) => assert_eq!(name, "fips"),
	    other => panic!("unexpected result: {:?}", other),
	}
    }

}
