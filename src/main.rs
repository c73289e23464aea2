mod graph;
mod error;
mod fetch;
mod record;
mod series;
mod solve;
mod metric;
mod population;
mod nyt;
mod ecdc;
mod covidtracking;

use std::env;
use std::path::{PathBuf,Path};

use unidecode::unidecode;

use error::{Result,Error};
use graph::{Series,PlotData};
use metric::Metric;
use record::{Record,Region,RegionKey};
use series::Convention;


struct Config {
    region: Region,
    vs: Option<Region>,
    metric: Metric,
    update: bool,
}

struct Line {
    slug: String,
    series: Series,
    wikipedia: Option<String>,
}


fn main() -> Result<()> {

    let args : Vec<String> = env::args().skip(1).collect();
    let config = parse_args(&args)?;

    if let Err(err) = run(&config, &PathBuf::from("cache"), &PathBuf::from("graphs")) {
	eprintln!("Error: {}", err);
    }

    Ok(())

}


fn parse_args(args: &[String]) -> Result<Config> {

    let selector = args.get(0).ok_or(Error::Usage(
	"expected a region selector".to_string()))?;

    let mut vs_selector = None;
    let mut metric = Metric::Deaths;
    let mut update = false;
    let mut state = false;

    let mut i = 1;
    while i < args.len() {
	match args[i].as_str() {
	    "-update" => {
		update = true;
		i += 1;
	    }
	    "-state" => {
		state = true;
		i += 1;
	    }
	    "-vs" => {
		vs_selector = Some(args.get(i+1).ok_or(Error::Usage(
		    "-vs expects a region selector".to_string()))?);
		i += 2;
	    }
	    "-type" => {
		metric = Metric::parse(args.get(i+1).ok_or(Error::Usage(
		    "-type expects a metric name".to_string()))?);
		i += 2;
	    }
	    arg => {
		return Err(Error::Usage(format!("unknown argument {}", arg)));
	    }
	}
    }

    Ok(Config {
	region: Region::parse(selector, state)?,
	vs: match vs_selector {
	    Some(selector) => Some(Region::parse(selector, state)?),
	    None => None,
	},
	metric,
	update,
    })

}


fn run(config: &Config, cache_path: &Path, graph_path: &Path) -> Result<()> {

    let records = source_records(&config.region, cache_path, config.update)?;
    let vs_records = match &config.vs {
	Some(vs) if !same_source(vs, &config.region) =>
	    Some(source_records(vs, cache_path, config.update)?),
	_ => None,
    };

    let mut data = PlotData::new();
    let mut citations = Vec::new();
    let mut wikipedia = Vec::new();
    let mut title = None;

    cite(&mut citations, citation(&config.region));

    match build_line(&config.region, &records, &config.metric,
		     || population::lookup(&config.region, &records)) {
	Some(line) => {
	    title = Some(format!("{}_{}", line.slug, config.metric.name()));
	    data.push((format!("{}_{}", line.slug, config.metric.name()), line.series));
	    wikipedia.extend(line.wikipedia);
	}
	None => println!("Warning: no {} data for {}",
			 config.metric.name(), config.region),
    }

    if let Some(vs) = &config.vs {
	if !same_source(vs, &config.region) {
	    cite(&mut citations, citation(vs));
	}
	let vs_records = vs_records.as_ref().unwrap_or(&records);
	match build_line(vs, vs_records, &config.metric,
			 || population::lookup(vs, vs_records)) {
	    Some(line) => {
		title = Some(match title {
		    Some(title) => format!("{}_vs_{}", title, line.slug),
		    None => format!("{}_{}", line.slug, config.metric.name()),
		});
		data.push((format!("{}_{}", line.slug, config.metric.name()), line.series));
		wikipedia.extend(line.wikipedia);
	    }
	    None => println!("Warning: no {} data for {}", config.metric.name(), vs),
	}
    }

    let title = match title {
	Some(title) => title,
	None => return Ok(()),
    };

    for url in wikipedia {
	cite(&mut citations, &format!("Estimated population - {}", url));
    }

    let filename = format!("{}.html", title);
    graph::metric_graph(graph_path, &filename, &title, config.metric.ytitle(),
			&citations, &data)?;
    println!("Wrote {}", graph_path.join(&filename).display());

    Ok(())

}


fn build_line<F>(region: &Region, records: &[Record], metric: &Metric,
		 lookup: F) -> Option<Line>
where F: FnOnce() -> Option<u64> {

    let matched = record::matched(records, region);
    let first = *matched.first()?;

    let from_source = matched.iter().any(|record| record.population.is_some());
    let built = series::build(&matched, convention(region), lookup);
    if built.dates.is_empty() {
	return None;
    }

    let values = metric::series(&built, metric)?;

    Some(Line {
	slug: region_slug(first),
	series: values,
	wikipedia: match metric.needs_population() && !from_source {
	    true => population::wikipedia_url(region, records),
	    false => None,
	},
    })

}


fn source_records(region: &Region, cache_path: &Path, update: bool) -> Result<Vec<Record>> {
    match region {
	Region::Fips(_) => nyt::records(cache_path, update),
	Region::Code(_) => ecdc::records(cache_path, update),
	Region::State(_) => covidtracking::records(cache_path, update),
    }
}


fn convention(region: &Region) -> Convention {
    match region {
	Region::Fips(_) => nyt::CONVENTION,
	Region::Code(_) => ecdc::CONVENTION,
	Region::State(_) => covidtracking::CONVENTION,
    }
}


fn citation(region: &Region) -> &'static str {
    match region {
	Region::Fips(_) => nyt::CITATION,
	Region::Code(_) => ecdc::CITATION,
	Region::State(_) => covidtracking::CITATION,
    }
}


fn same_source(a: &Region, b: &Region) -> bool {
    match (a, b) {
	(Region::Fips(_), Region::Fips(_)) => true,
	(Region::Code(_), Region::Code(_)) => true,
	(Region::State(_), Region::State(_)) => true,
	_ => false,
    }
}


fn cite(citations: &mut Vec<String>, text: &str) {
    let number = citations.len() + 1;
    citations.push(format!("{} - {}", number, text));
}


fn region_slug(record: &Record) -> String {
    match &record.key {
	RegionKey::County(Some(fips)) =>
	    format!("{}_{}_{:05}", slug(&record.name), slug(&record.area), fips),
	RegionKey::County(None) =>
	    format!("{}_{}", slug(&record.name), slug(&record.area)),
	RegionKey::Country(geo) =>
	    format!("{}_{}", slug(&record.name), slug(geo)),
	RegionKey::State(code) => code.to_lowercase(),
    }
}


fn slug(name: &str) -> String {
    unidecode(name).to_lowercase().replace(' ', "_")
}
