//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// ISO-ish language codes: 2 to 5 letters, e.g. "EN", "PT-BR" without the dash.
    static ref LANGUAGE_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z]{2,5}$").unwrap();
    /// Setting keys: lowercase snake_case, e.g. "site_name", "stream_quality".
    static ref SETTING_KEY_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_]{0,99}$").unwrap();
    /// Translation keys: dot-separated segments, e.g. "common.buttons.save".
    static ref TRANSLATION_KEY_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*$").unwrap();
    /// BCP 47-style locales: "en", "sk", "pt-BR".
    static ref LOCALE_REGEX: Regex = Regex::new(r"^[a-z]{2,3}(?:-[A-Z]{2})?$").unwrap();
}

/// Maximum length of a translation key.
const MAX_TRANSLATION_KEY_LEN: usize = 200;

/// Validates a language code (2 to 5 letters, case-insensitive).
///
/// Codes are stored uppercase; callers normalize after validation.
pub fn validate_language_code(code: &str) -> Result<(), ValidationError> {
    if LANGUAGE_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        let mut err = ValidationError::new("language_code");
        err.message = Some("Language code must be 2 to 5 letters".into());
        Err(err)
    }
}

/// Validates a setting key (lowercase snake_case, max 100 characters).
pub fn validate_setting_key(key: &str) -> Result<(), ValidationError> {
    if SETTING_KEY_REGEX.is_match(key) {
        Ok(())
    } else {
        let mut err = ValidationError::new("setting_key");
        err.message = Some(
            "Setting key must start with a letter and contain only lowercase letters, digits and underscores"
                .into(),
        );
        Err(err)
    }
}

/// Validates a translation key (dot-separated segments, max 200 characters).
pub fn validate_translation_key(key: &str) -> Result<(), ValidationError> {
    if key.len() <= MAX_TRANSLATION_KEY_LEN && TRANSLATION_KEY_REGEX.is_match(key) {
        Ok(())
    } else {
        let mut err = ValidationError::new("translation_key");
        err.message =
            Some("Translation key must be dot-separated segments of letters, digits and underscores".into());
        Err(err)
    }
}

/// Validates a locale identifier such as "en" or "pt-BR".
pub fn validate_locale(locale: &str) -> Result<(), ValidationError> {
    if LOCALE_REGEX.is_match(locale) {
        Ok(())
    } else {
        let mut err = ValidationError::new("locale");
        err.message = Some("Locale must look like \"en\" or \"en-US\"".into());
        Err(err)
    }
}

/// Validates a language priority (0 to 1000, higher sorts first).
pub fn validate_priority(priority: i32) -> Result<(), ValidationError> {
    if (0..=1000).contains(&priority) {
        Ok(())
    } else {
        let mut err = ValidationError::new("priority_range");
        err.message = Some("Priority must be between 0 and 1000".into());
        Err(err)
    }
}
