//! Platform-aware classification of bare tokens as filesystem paths.
//!
//! Command approval needs to know whether a token like `~/notes` or
//! `C:\Users\x` names a file so that path-scoped rules can be offered for
//! it. The platform is an explicit parameter rather than ambient process
//! state, so both rule tables are testable in the same process.

/// Path syntax family to classify against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Forward-slash paths only
    Unix,
    /// Forward-slash paths plus backslash, drive-letter, and UNC forms
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    ///
    /// Provided as a convenience for callers; [`is_path_like`] never
    /// consults it implicitly.
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// Decide whether a bare token looks like a filesystem path.
///
/// Rules are checked in order, first match wins. Plain words, flags, and
/// tokens with no separator are not paths. `".."` alone is a parent
/// reference and accepted; a dot-prefixed name like `"..hidden"` is not.
///
/// # Example
///
/// ```
/// use toolwarden::engine::{is_path_like, Platform};
///
/// assert!(is_path_like("~/notes", Platform::Unix));
/// assert!(is_path_like("C:\\Users\\x", Platform::Windows));
/// assert!(!is_path_like("C:\\Users\\x", Platform::Unix));
/// assert!(!is_path_like("--force", Platform::Unix));
/// ```
pub fn is_path_like(token: &str, platform: Platform) -> bool {
    let windows = platform == Platform::Windows;

    if token.is_empty() || token == "." {
        return false;
    }
    if token == ".." {
        return true;
    }
    if token == "/" || token == "\\" || token == "--" {
        return false;
    }

    // Home-relative
    if token == "~" || token.starts_with("~/") {
        return true;
    }
    if windows && token.starts_with("~\\") {
        return true;
    }

    // Dot-relative
    if token.starts_with("./") || token.starts_with("../") {
        return true;
    }
    if windows && (token.starts_with(".\\") || token.starts_with("..\\")) {
        return true;
    }

    // Absolute unix paths, including MSYS-style /c/Users/... tokens
    if token.starts_with('/') {
        return true;
    }

    if windows && (has_drive_prefix(token) || has_unc_prefix(token)) {
        return true;
    }

    // Forward-slash paths are recognized cross-platform
    if token.contains('/') {
        return true;
    }

    // A lone "\\" was rejected above
    if windows && token.contains('\\') {
        return true;
    }

    false
}

/// `<letter>:\` or `<letter>:/`
fn has_drive_prefix(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'/' || bytes[2] == b'\\')
}

/// `\\server\share` or `//server/share`
fn has_unc_prefix(token: &str) -> bool {
    (token.starts_with("\\\\") || token.starts_with("//")) && token.len() > 2
}
