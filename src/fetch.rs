use std::fs;
use std::path::Path;

use encoding_rs::mem::decode_latin1;

use super::error::{Result,Error};


pub fn text(url: &str) -> Result<String> {

    let res = reqwest::blocking::get(url)?;
    if !res.status().is_success() {
	return Err(Error::HttpError(res.status()));
    }

    let bytes = res.bytes()?;
    Ok(match std::str::from_utf8(&bytes) {
	Ok(text) => text.to_string(),
	Err(_) => decode_latin1(&bytes).into_owned(),
    })

}


pub fn cached_text(cache_path: &Path, name: &str, url: &str, update: bool) -> Result<String> {

    let cache_file = cache_path.join(name);

    if !update && cache_file.exists() {
	return Ok(fs::read_to_string(&cache_file)?);
    }

    println!("Downloading {}...", name);
    let data = text(url)?;
    fs::create_dir_all(cache_path)?;
    fs::write(&cache_file, &data)?;
    Ok(data)

}
