use std::collections::BTreeMap;
use std::path::Path;

use chrono::naive::NaiveDate;

use super::error::Result;
use super::fetch;
use super::record::{column,Record,RegionKey};
use super::series::Convention;


pub const CONVENTION: Convention = Convention::Cumulative;
pub const CITATION: &str =
    "Data from The COVID Tracking Project - https://covidtracking.com";

const URL: &str = "https://api.covidtracking.com/v1/states/daily.csv";


pub fn records(cache_path: &Path, update: bool) -> Result<Vec<Record>> {
    let text = fetch::cached_text(&cache_path.join("covidtracking"),
				  "states-daily.csv", URL, update)?;
    parse(&text)
}


fn parse(text: &str) -> Result<Vec<Record>> {

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let date_col = column(&headers, "date")?;
    let state_col = column(&headers, "state")?;
    let cases_col = column(&headers, "positive")?;
    let deaths_col = column(&headers, "death")?;

    let mut records = Vec::new();

    // rows arrive newest first
    for row in reader.into_records() {

	let row = match row {
	    Ok(row) => row,
	    Err(_) => continue,
	};

	let date = match slice_date(row.get(date_col).unwrap_or("")) {
	    Some(date) => date,
	    None => continue,
	};

	let state = match row.get(state_col).unwrap_or("") {
	    "" => continue,
	    state => state.to_string(),
	};

	let (cases, deaths) = match (row.get(cases_col).unwrap_or("").parse::<i64>(),
				     row.get(deaths_col).unwrap_or("").parse::<i64>()) {
	    (Ok(cases), Ok(deaths)) => (cases, deaths),
	    _ => continue,
	};

	let mut extra = BTreeMap::new();
	for (i, field) in row.iter().enumerate() {
	    if i == date_col || i == state_col || i == cases_col || i == deaths_col {
		continue;
	    }
	    if let (Some(name), Ok(value)) = (headers.get(i), field.parse::<f64>()) {
		extra.insert(name.to_string(), value);
	    }
	}

	records.push(Record {
	    date,
	    key: RegionKey::State(state.clone()),
	    name: state.clone(),
	    area: state,
	    cases,
	    deaths,
	    population: None,
	    extra,
	});

    }

    records.reverse();
    Ok(records)

}


fn slice_date(field: &str) -> Option<NaiveDate> {
    if field.len() != 8 {
	return None;
    }
    let year = field.get(0..4)?.parse().ok()?;
    let month = field.get(4..6)?.parse().ok()?;
    let day = field.get(6..8)?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
