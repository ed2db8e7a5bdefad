//! Image URL resolution.
//!
//! The API returns image fields as paths relative to the asset host
//! (`/media/todos/a.png`). Absolute URLs and local `blob:` previews pass
//! through untouched.

/// Resolve an image path against `asset_base`. Empty or missing paths
/// resolve to `None`.
pub fn resolve_image_url(path: Option<&str>, asset_base: &str) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;

    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("blob:") {
        return Some(path.to_string());
    }

    Some(format!(
        "{}/{}",
        asset_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// Like [`resolve_image_url`], falling back to a sized placeholder.
pub fn image_url_or_placeholder(path: Option<&str>, asset_base: &str, width: u32, height: u32) -> String {
    resolve_image_url(path, asset_base).unwrap_or_else(|| placeholder_url(width, height))
}

pub fn placeholder_url(width: u32, height: u32) -> String {
    format!("/placeholder.svg?height={}&width={}", height, width)
}
