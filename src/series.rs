use std::collections::BTreeMap;

use chrono::naive::NaiveDate;

use super::record::Record;


#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Convention {
    Cumulative,
    Daily,
}


#[derive(Debug)]
pub struct Matched {
    pub dates: Vec<NaiveDate>,
    pub cases: Vec<f64>,
    pub deaths: Vec<f64>,
    pub extra: BTreeMap<String,Vec<f64>>,
    pub population: Option<u64>,
}


pub fn build<F>(records: &[&Record], convention: Convention, lookup: F) -> Matched
where F: FnOnce() -> Option<u64> {

    let mut dates = Vec::new();
    let mut cases = Vec::new();
    let mut deaths = Vec::new();
    let mut extra : BTreeMap<String,Vec<f64>> = BTreeMap::new();

    match convention {

	Convention::Cumulative => {
	    for record in records {
		for (name, value) in &record.extra {
		    let values = extra.entry(name.clone()).or_insert_with(Vec::new);
		    values.resize(dates.len(), f64::NAN);
		    values.push(*value);
		}
		dates.push(record.date);
		cases.push(record.cases as f64);
		deaths.push(record.deaths as f64);
	    }
	    for values in extra.values_mut() {
		values.resize(dates.len(), f64::NAN);
	    }
	}

	Convention::Daily => {
	    // counting starts on the first day the case total turns positive;
	    // deaths reported before that day are dropped with it
	    let mut total_cases = 0;
	    let mut total_deaths = 0;
	    for record in records {
		total_cases += record.cases;
		if dates.is_empty() && total_cases <= 0 {
		    continue;
		}
		total_deaths += record.deaths;
		dates.push(record.date);
		cases.push(total_cases as f64);
		deaths.push(total_deaths as f64);
	    }
	}

    }

    Matched {
	dates,
	cases,
	deaths,
	extra,
	population: records.iter().find_map(|record| record.population).or_else(lookup),
    }

}
