//! Static file serving for the frontend bundle: path resolution with
//! traversal protection, file loading, and content-type detection.

use std::path::{Component, Path, PathBuf};

use log::warn;
use tokio::fs;

use crate::error::ApiError;

/// Resolve a request path inside `root`. Any component that would escape the
/// root (`..`, absolute segments) is rejected before the filesystem is
/// touched.
pub fn resolve(root: &Path, request_path: &str) -> Result<PathBuf, ApiError> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();

    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => {
                warn!("Rejected traversal attempt in static path: {}", request_path);
                return Err(ApiError::InvalidPath);
            }
        }
    }

    Ok(resolved)
}

/// Read a file under `root`, returning its bytes and content type. Missing
/// files (and directories) surface as `NotFound`.
pub async fn serve(root: &Path, request_path: &str) -> Result<(Vec<u8>, &'static str), ApiError> {
    let path = resolve(root, request_path)?;

    let content = fs::read(&path).await.map_err(|_| ApiError::NotFound)?;
    let content_type = content_type_for(path.extension().and_then(|e| e.to_str()));

    Ok((content, content_type))
}

/// Content-Type from file extension.
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
