use std::borrow::Cow;

/// Looks up `name` in a `Cookie:` header value (`a=1; b=2`) and returns the
/// percent-decoded value.
///
/// Values that are not valid percent-encoded UTF-8 are returned as-is.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(Cow::into_owned)
                .unwrap_or_else(|_| raw.to_owned())
        })
}

/// Whether `value` can be stored in a cookie without quoting: non-empty and
/// made only of RFC 6265 `cookie-octet`s.
pub fn is_cookie_value(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| {
            matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
        })
}
