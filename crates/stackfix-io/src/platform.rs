//! Read-only platform signals: color-scheme preference and languages.

/// Whether the browser reports `prefers-color-scheme: dark`.
///
/// Returns `false` outside a browser or if the query fails.
#[must_use]
pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .is_some_and(|mql| mql.matches())
}

/// The browser's preferred languages (`navigator.languages`), most
/// preferred first.
#[must_use]
pub fn browser_languages() -> Vec<String> {
    let Some(window) = web_sys::window() else {
        return Vec::new();
    };
    window
        .navigator()
        .languages()
        .iter()
        .filter_map(|v| v.as_string())
        .collect()
}
