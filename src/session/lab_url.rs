use crate::error::SessionError;
use url::Url;

/// Port the embedded notebook environment listens on.
const LAB_PORT: u16 = 8000;

/// Builds the iframe `src` for an embedded notebook session:
/// `{scheme}://{host}:8000/user/<user>/lab/workspaces/auto/tree/codes/nodes/<category>/<filename>`.
///
/// Segments are appended through the `url` crate so user names, categories,
/// and file names are percent-encoded correctly. There is no further contract
/// with the embedded environment beyond this URL.
pub fn session_url(
    scheme: &str,
    host: &str,
    user: &str,
    category: &str,
    filename: &str,
) -> Result<Url, SessionError> {
    let mut url = Url::parse(&format!("{scheme}://{host}:{LAB_PORT}/"))
        .map_err(|_| SessionError::InvalidHost(host.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SessionError::InvalidHost(host.to_string()))?
        .extend([
            "user", user, "lab", "workspaces", "auto", "tree", "codes", "nodes", category,
            filename,
        ]);
    Ok(url)
}
