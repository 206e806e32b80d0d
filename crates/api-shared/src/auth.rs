/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` with any casing of the scheme. Returns `None` for other schemes or an
/// empty token.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
