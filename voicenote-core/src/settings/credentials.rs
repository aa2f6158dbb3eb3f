use crate::error::{Result, VoiceNoteError};

/// Read the API key from `var`. A missing or blank value is a configuration
/// error and must be reported before any other work starts.
pub fn api_key_from_env(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(VoiceNoteError::configuration(format!("{var} not set"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = api_key_from_env("VOICENOTE_TEST_KEY_MISSING").unwrap_err();
        assert!(matches!(err, VoiceNoteError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: VOICENOTE_TEST_KEY_MISSING not set"
        );
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        std::env::set_var("VOICENOTE_TEST_KEY_BLANK", "   ");
        let err = api_key_from_env("VOICENOTE_TEST_KEY_BLANK").unwrap_err();
        assert!(matches!(err, VoiceNoteError::Configuration(_)));
    }

    #[test]
    fn test_key_is_trimmed() {
        std::env::set_var("VOICENOTE_TEST_KEY_SET", " secret\n");
        assert_eq!(api_key_from_env("VOICENOTE_TEST_KEY_SET").unwrap(), "secret");
    }
}
