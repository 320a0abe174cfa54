use crate::error::{AppError, AppResult};

/// Keywords travel the API as a token list but are stored comma-joined in a
/// single text column, so tokens may not contain the delimiter.
pub const KEYWORD_DELIMITER: char = ',';

/// Join a keyword list for storage. Tokens are trimmed; empty tokens and
/// tokens containing the delimiter are rejected.
pub fn join_keywords(keywords: &[String]) -> AppResult<String> {
    let mut tokens = Vec::with_capacity(keywords.len());
    for raw in keywords {
        let token = raw.trim();
        if token.is_empty() {
            return Err(AppError::Validation(
                "Keywords must not be empty".to_string(),
            ));
        }
        if token.contains(KEYWORD_DELIMITER) {
            return Err(AppError::Validation(format!(
                "Keyword '{}' must not contain '{}'",
                token, KEYWORD_DELIMITER
            )));
        }
        tokens.push(token);
    }
    Ok(tokens.join(","))
}

/// Split a stored keyword string back into tokens.
pub fn split_keywords(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(KEYWORD_DELIMITER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_and_split() {
        let keywords = vec!["git".to_string(), "version control".to_string()];
        let joined = join_keywords(&keywords).unwrap();
        assert_eq!(joined, "git,version control");
        assert_eq!(split_keywords(&joined), keywords);
    }

    #[test]
    fn join_trims_tokens() {
        let keywords = vec![" rust ".to_string(), "axum".to_string()];
        assert_eq!(join_keywords(&keywords).unwrap(), "rust,axum");
    }

    #[test]
    fn join_rejects_delimiter_in_token() {
        let keywords = vec!["foo,bar".to_string()];
        assert!(matches!(
            join_keywords(&keywords),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn join_rejects_empty_token() {
        let keywords = vec!["  ".to_string()];
        assert!(matches!(
            join_keywords(&keywords),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn empty_list_round_trips() {
        let joined = join_keywords(&[]).unwrap();
        assert_eq!(joined, "");
        assert!(split_keywords(&joined).is_empty());
    }
}
