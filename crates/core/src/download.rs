//! Resolve what a "Download" action on a deliverable should do.

use serde::Serialize;

/// Notice shown when a deliverable has no attached file.
pub const NO_FILE_NOTICE: &str = "No file available for download";

/// Outcome of a download request for a single deliverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// Open the file at `url` in a new browsing context.
    Open { url: String, file_name: String },
    /// Nothing to download; show `notice` and do not navigate.
    NoFileAvailable { file_name: String, notice: String },
}

/// Decide the download outcome for a deliverable.
///
/// Absolute `http://` / `https://` locations are used verbatim. Any other
/// non-blank location is treated as an object path inside the storage
/// bucket and joined onto `storage_base`, one percent-encoded segment at a
/// time.
pub fn resolve_download(
    file_name: &str,
    file_url: Option<&str>,
    storage_base: &str,
) -> DownloadOutcome {
    let location = match file_url.map(str::trim) {
        Some(loc) if !loc.is_empty() => loc,
        _ => {
            return DownloadOutcome::NoFileAvailable {
                file_name: file_name.to_string(),
                notice: NO_FILE_NOTICE.to_string(),
            }
        }
    };

    let url = if location.starts_with("http://") || location.starts_with("https://") {
        location.to_string()
    } else {
        format!(
            "{}/{}",
            storage_base.trim_end_matches('/'),
            encode_object_path(location.trim_start_matches('/'))
        )
    };

    DownloadOutcome::Open {
        url,
        file_name: file_name.to_string(),
    }
}

/// Percent-encode each `/`-separated segment of a storage object path.
///
/// Segments that are already encoded are decoded first so they are not
/// encoded twice.
fn encode_object_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let decoded = urlencoding::decode(segment)
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| segment.to_string());
            urlencoding::encode(&decoded).into_owned()
        })
        .collect::<Vec<_>>()
        .join("/")
}
