use super::model::{check_status, parse_manifest, Artwork, ManifestError};
use gloo_net::http::Request;

/// GET the manifest at `url` and parse it into artwork records.
pub async fn fetch_manifest(url: &str) -> Result<Vec<Artwork>, ManifestError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| ManifestError::Transport(e.to_string()))?;
    check_status(resp.status())?;
    let text = resp
        .text()
        .await
        .map_err(|e| ManifestError::Transport(e.to_string()))?;
    parse_manifest(&text)
}
