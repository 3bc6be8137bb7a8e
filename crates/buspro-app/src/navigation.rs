//! Turn-by-turn navigation links for a stop address

use buspro_types::{Error, Result};
use reqwest::Url;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

/// Maps directions URL with the address as destination
///
/// The address is not validated or geocoded; it is only percent-encoded.
pub fn build_navigation_url(address: &str) -> String {
    match Url::parse_with_params(DIRECTIONS_BASE, [("api", "1"), ("destination", address)]) {
        Ok(url) => url.to_string(),
        // base is a constant valid URL
        Err(_) => format!("{}?api=1", DIRECTIONS_BASE),
    }
}

/// Hand a URL to the platform opener without waiting for it
pub fn open_url(url: &str) -> Result<()> {
    let (program, args) = opener_args(std::env::consts::OS, url);
    std::process::Command::new(program)
        .args(&args)
        .spawn()
        .map_err(|e| Error::Launch(format!("{}: {}", url, e)))?;
    tracing::info!(url, program, "opened navigation link");
    Ok(())
}

/// Opener program and arguments for `os`
///
/// The URL is always one argument to a program that does not parse it as a
/// shell command line, so `&` in the query survives on Windows.
fn opener_args(os: &str, url: &str) -> (&'static str, Vec<String>) {
    match os {
        "macos" => ("open", vec![url.to_string()]),
        "windows" => (
            "rundll32",
            vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()],
        ),
        _ => ("xdg-open", vec![url.to_string()]),
    }
}
