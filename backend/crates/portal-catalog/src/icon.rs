//! Icon and chat URL rewriting for synchronized applications.

const FILE_ROUTE: &str = "/admin/oss/file/";
const RELATIVE_FILE_PREFIX: &str = "./oss/file/";

/// Resolve an application's icon to a browser-usable URL.
///
/// Rules, first match wins:
/// 1. absolute `http(s)` URL: unchanged
/// 2. `./oss/file/{id}`: `{base}/admin/oss/file/{id}`
/// 3. contains `/admin/oss/file/`: prefixed with `{base}`
/// 4. any other `./` path or a filename: empty, the UI shows a placeholder
/// 5. anything else is a file id: `{base}/admin/oss/file/{id}`
///
/// With no `icon`, `icon_file_id` is expanded like a file id.
pub fn resolve_icon(base_url: &str, icon: Option<&str>, icon_file_id: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');

    match icon.map(str::trim).filter(|i| !i.is_empty()) {
        Some(icon) => {
            if icon.starts_with("http://") || icon.starts_with("https://") {
                icon.to_string()
            } else if let Some(file_id) = icon.strip_prefix(RELATIVE_FILE_PREFIX) {
                format!("{base}{FILE_ROUTE}{file_id}")
            } else if icon.contains(FILE_ROUTE) {
                format!("{base}/{}", icon.trim_start_matches('/'))
            } else if icon.starts_with("./") || icon.contains('.') {
                String::new()
            } else {
                format!("{base}{FILE_ROUTE}{icon}")
            }
        }
        None => match icon_file_id.map(str::trim).filter(|i| !i.is_empty()) {
            Some(file_id) => format!("{base}{FILE_ROUTE}{file_id}"),
            None => String::new(),
        },
    }
}

/// `{base}/chat/{key}` where `key` is an access token or, as a fallback, the app id.
pub fn chat_url(base_url: &str, key: &str) -> String {
    format!("{}/chat/{key}", base_url.trim_end_matches('/'))
}
