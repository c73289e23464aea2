use super::graph::Series;
use super::series::Matched;
use super::solve;


#[derive(Debug,Clone,PartialEq)]
pub enum Metric {
    Cases,
    Deaths,
    Cases1000,
    Deaths1000,
    CasesGradient,
    DeathsGradient,
    Cases1000Gradient,
    Deaths1000Gradient,
    DoublingTime,
    Field(String),
    Field1000(String),
}

impl Metric {

    pub fn parse(name: &str) -> Metric {
	match name.to_lowercase().as_str() {
	    "cases" => Metric::Cases,
	    "deaths" => Metric::Deaths,
	    "cases_1000" => Metric::Cases1000,
	    "deaths_1000" => Metric::Deaths1000,
	    "cases_gradient" => Metric::CasesGradient,
	    "deaths_gradient" => Metric::DeathsGradient,
	    "cases_1000_gradient" => Metric::Cases1000Gradient,
	    "deaths_1000_gradient" => Metric::Deaths1000Gradient,
	    "doubling_time" => Metric::DoublingTime,
	    _ => match name.strip_suffix("_1000") {
		Some(field) => Metric::Field1000(field.to_string()),
		None => Metric::Field(name.to_string()),
	    },
	}
    }

    pub fn name(&self) -> String {
	match self {
	    Metric::Cases => "cases".to_string(),
	    Metric::Deaths => "deaths".to_string(),
	    Metric::Cases1000 => "cases_1000".to_string(),
	    Metric::Deaths1000 => "deaths_1000".to_string(),
	    Metric::CasesGradient => "cases_gradient".to_string(),
	    Metric::DeathsGradient => "deaths_gradient".to_string(),
	    Metric::Cases1000Gradient => "cases_1000_gradient".to_string(),
	    Metric::Deaths1000Gradient => "deaths_1000_gradient".to_string(),
	    Metric::DoublingTime => "doubling_time".to_string(),
	    Metric::Field(field) => field.clone(),
	    Metric::Field1000(field) => format!("{}_1000", field),
	}
    }

    pub fn needs_population(&self) -> bool {
	match self {
	    Metric::Cases1000 | Metric::Deaths1000
		| Metric::Cases1000Gradient | Metric::Deaths1000Gradient
		| Metric::Field1000(_) => true,
	    _ => false,
	}
    }

    pub fn ytitle(&self) -> &'static str {
	match self {
	    Metric::Cases | Metric::Deaths | Metric::Field(_) => "Count",
	    Metric::Cases1000 | Metric::Deaths1000 | Metric::Field1000(_) => "Count per 1000",
	    Metric::CasesGradient | Metric::DeathsGradient => "Daily change",
	    Metric::Cases1000Gradient | Metric::Deaths1000Gradient => "Daily change per 1000",
	    Metric::DoublingTime => "Days to double",
	}
    }

}


pub fn series(matched: &Matched, metric: &Metric) -> Option<Series> {

    let values = match metric {
	Metric::Cases => matched.cases.clone(),
	Metric::Deaths => matched.deaths.clone(),
	Metric::Cases1000 => per_1000(&matched.cases, matched.population)?,
	Metric::Deaths1000 => per_1000(&matched.deaths, matched.population)?,
	Metric::CasesGradient => gradient(&matched.cases),
	Metric::DeathsGradient => gradient(&matched.deaths),
	Metric::Cases1000Gradient => gradient(&per_1000(&matched.cases, matched.population)?),
	Metric::Deaths1000Gradient => gradient(&per_1000(&matched.deaths, matched.population)?),
	Metric::DoublingTime => {
	    let offsets = solve::day_offsets(&matched.dates);
	    solve::doubling_times(&offsets, &matched.cases)?
	}
	Metric::Field(field) => matched.extra.get(field)?.clone(),
	Metric::Field1000(field) => per_1000(matched.extra.get(field)?, matched.population)?,
    };

    Some(matched.dates.iter().cloned().zip(values).collect())

}


fn per_1000(values: &[f64], population: Option<u64>) -> Option<Vec<f64>> {
    match population {
	Some(population) if population > 0 =>
	    Some(values.iter().map(|value| value * 1000.0 / population as f64).collect()),
	_ => None,
    }
}


pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
	return vec![0.0; n];
    }
    (0..n).map(|i| match i {
	0 => values[1] - values[0],
	i if i == n - 1 => values[n-1] - values[n-2],
	i => (values[i+1] - values[i-1]) / 2.0,
    }).collect()
}
