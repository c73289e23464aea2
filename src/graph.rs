use std::{io,fs};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::naive::NaiveDate;
use serde_json::json;

use super::error::Result;


pub type Series = Vec<(NaiveDate,f64)>;
pub type PlotData = Vec<(String,Series)>;


pub fn metric_graph(graph_path: &Path, path: &str, title: &str, ytitle: &str,
		    citations: &Vec<String>, data: &PlotData) -> Result<()> {

    fs::create_dir_all(graph_path)?;
    let mut out = io::BufWriter::new(File::create(graph_path.join(path))?);

    write!(out, "<!DOCTYPE html><html><head>")?;
    write!(out, "<meta charset=\"UTF-8\">")?;
    write!(out, "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">")?;
    write!(out, "<title>{}</title>", title)?;
    write!(out, "<script src=\"https://cdn.jsdelivr.net/npm/vega@5\"></script>")?;
    write!(out, "<script src=\"https://cdn.jsdelivr.net/npm/vega-lite@4\"></script>")?;
    write!(out, "<script src=\"https://cdn.jsdelivr.net/npm/vega-embed\"></script>")?;
    write!(out, "</head>")?;
    write!(out, "<body>")?;
    write!(out, "<div id=\"vis\" style=\"overflow: hidden; position: absolute;top: 0; left: 0; right: 0; bottom: 0;\"></div>")?;
    write!(out, "<script type=\"text/javascript\">")?;
    write!(out, "var spec = ")?;

    serde_json::to_writer_pretty(out.by_ref(), &json!({
	"$schema": "https://vega.github.io/schema/vega-lite/v4.json",
	"height": "container",
	"width": "container",
	"title": {
	    "text": title,
	    "subtitle": citations,
	    "subtitleFontSize": 9
	},
	"data": {
	    "values": data.iter().flat_map(
		|(region,vals)| vals.iter().filter_map(
		    move |(date,val)| match val.is_finite() {
			false => None,
			true => Some(json!({
			    "Date": format!("{}", date.format("%Y-%m-%d")),
			    "Region": region.to_string(),
			    "Value": val
			}))
		    })
	    ).collect::<Vec<_>>()
	},
	"layer": [
	    {
		"encoding": {
		    "color": {
			"field": "Region",
			"type":"nominal"
		    },
		    "x": {
			"field":"Date",
			"timeUnit": "utcyearmonthdate",
			"title":"Date",
			"type":"temporal"
		    },
		    "y": {
			"field":"Value",
			"title": ytitle,
			"type":"quantitative"
		    }
		},
		"layer": [
		    {
			"mark":"line",
			"selection": {
			    "Highlight": {"bind":"legend","type":"multi","fields":["Region"]},
			    "Grid": {"bind":"scales","type":"interval"}
			},
			"encoding":{
			    "opacity":{"value":0.1,"condition":{"value":1,"selection":"Highlight"}}
			}
		    },
		    {
			"mark":"point",
			"encoding": {
			    "opacity": {
				"value":0,
				"condition": [
				    {"value":1,"test":{"and":[{"selection":"Highlight"},{"selection":"Hover"}]}},
				    {"value":0.2,"selection":"Hover"}
				]
			    }
			}
		    }
		]
	    },
	    {
		"transform": [
		    {
			"groupby": ["Date"],
			"value": "Value",
			"pivot": "Region"
		    }
		],
		"mark": {
		    "color": "gray",
		    "tooltip": {"content":"data"},
		    "type": "rule"
		},
		"selection": {
		    "Hover": {
			"nearest":true,
			"empty":"none",
			"clear":"mouseout",
			"type":"single",
			"on":"mouseover",
			"fields":["Date"]
		    }
		},
		"encoding": {
		    "opacity": {
			"value": 0,
			"condition": {
			    "value": 1,
			    "selection": "Hover"
			}
		    },
		    "x": {
			"field":"Date",
			"type":"temporal"
		    },
		    "tooltip": vec![
			json!({"field":"Date","type":"temporal"})
		    ].into_iter().chain(data.iter().map(
			|(region,_)| json!({"field":region,"format":".3f","type":"quantitative"})
		    )).collect::<Vec<_>>()
		}
	    }
	]
    }))?;

    write!(out, ";vegaEmbed('#vis', spec,{{}}).then(function(result) {{")?;
    write!(out, "}}).catch(console.error);")?;
    write!(out, "</script>")?;
    write!(out, "</body></html>")?;

    Ok(())

}


#[cfg(test)]
mod tests {

    use std::env;

    use super::*;

    #[test]
    fn writes_an_embedded_vega_lite_page() {
	let dir = env::temp_dir().join("covid19-plot-rs-graph-test");
	let data = vec![("benton_washington_53005_cases".to_string(),
			 vec![(NaiveDate::from_ymd(2020, 3, 1), 1.0),
			      (NaiveDate::from_ymd(2020, 3, 2), f64::NAN),
			      (NaiveDate::from_ymd(2020, 3, 3), 3.0)])];
	let citations = vec!["1 - Data from The New York Times - \
			      https://github.com/nytimes/covid-19-data".to_string()];
	metric_graph(&dir, "test.html", "benton_washington_53005_cases",
		     "Count", &citations, &data).unwrap();
	let html = fs::read_to_string(dir.join("test.html")).unwrap();
	assert!(html.contains("vega-lite@4"));
	assert!(html.contains("benton_washington_53005_cases"));
	assert!(html.contains("2020-03-01"));
	assert!(!html.contains("2020-03-02"));
	assert!(html.contains("The New York Times"));
    }

}
