use std::fs::File;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
}

/// Fetches `url` and writes the response body to `dest`, overwriting any existing file.
/// One blocking HTTP GET; no retries.
pub fn download_to_file<P: AsRef<Path>>(url: &str, dest: P) -> Result<(), DownloadError> {
    let response = ureq::get(url)
        .call()
        .map_err(|e| DownloadError::Request {
            url: url.to_string(),
            source: Box::new(e),
        })?;

    let mut file = File::create(dest)?;
    io::copy(&mut response.into_reader(), &mut file)?;
    Ok(())
}
