//! `Authorization: Bearer <token>` parsing.

use crate::error::AuthError;

/// Extract the token from an Authorization header value.
///
/// The scheme is matched case-insensitively; surrounding whitespace is ignored.
///
/// # Errors
///
/// `AuthError::MissingHeader` when `header` is `None`,
/// `AuthError::InvalidScheme` for a non-Bearer scheme, and
/// `AuthError::InvalidHeader` when no token follows the scheme.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?.trim();
    let (scheme, token) = value.split_once(' ').ok_or_else(|| {
        if value.eq_ignore_ascii_case("bearer") {
            AuthError::InvalidHeader
        } else {
            AuthError::InvalidScheme
        }
    })?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidScheme);
    }
    let token = token.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::InvalidHeader);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", "abc.def.ghi")]
    #[case("bearer abc", "abc")]
    #[case("  BEARER   abc  ", "abc")]
    fn accepts_bearer(#[case] header: &str, #[case] token: &str) {
        assert_eq!(parse_bearer(Some(header)).unwrap(), token);
    }

    #[test]
    fn rejects_everything_else() {
        assert!(matches!(parse_bearer(None), Err(AuthError::MissingHeader)));
        assert!(matches!(
            parse_bearer(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidScheme)
        ));
        assert!(matches!(parse_bearer(Some("token")), Err(AuthError::InvalidScheme)));
        assert!(matches!(parse_bearer(Some("Bearer")), Err(AuthError::InvalidHeader)));
        assert!(matches!(
            parse_bearer(Some("Bearer a b")),
            Err(AuthError::InvalidHeader)
        ));
    }
}
