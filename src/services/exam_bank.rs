use std::path::PathBuf;

use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::models::exam::ExamBank;

pub const DEFAULT_LOCALE: &str = "en";

/// Reads locale bank files (`<dir>/<locale>.json`) per request so edits to
/// the bank show up without a restart.
#[derive(Clone)]
pub struct ExamBankService {
    dir: PathBuf,
}

impl ExamBankService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads the bank for the requested locale, falling back to the default
    /// when the locale file is missing or unreadable. A missing default bank
    /// is a deployment fault, not a user error.
    pub async fn load(&self, requested: Option<&str>) -> Result<(String, ExamBank)> {
        if let Some(locale) = requested {
            if !is_safe_locale(locale) {
                warn!("ignoring invalid exam locale {:?}", locale);
            } else if locale != DEFAULT_LOCALE {
                match self.read_bank(locale).await {
                    Ok(bank) => return Ok((locale.to_string(), bank)),
                    Err(err) => {
                        warn!(
                            "exam bank for locale '{}' unavailable, falling back to '{}': {}",
                            locale, DEFAULT_LOCALE, err
                        );
                    }
                }
            }
        }

        match self.read_bank(DEFAULT_LOCALE).await {
            Ok(bank) => Ok((DEFAULT_LOCALE.to_string(), bank)),
            Err(err) => {
                error!("default exam bank '{}' unavailable: {}", DEFAULT_LOCALE, err);
                Err(Error::Config(format!(
                    "default exam bank '{}' is unavailable: {}",
                    DEFAULT_LOCALE, err
                )))
            }
        }
    }

    async fn read_bank(&self, locale: &str) -> Result<ExamBank> {
        let path = self.dir.join(format!("{}.json", locale));
        let raw = tokio::fs::read_to_string(&path).await?;
        let bank: ExamBank = serde_json::from_str(&raw)?;
        Ok(bank)
    }
}

/// Locale values come straight from clients and become file names, so only
/// plain identifier characters are accepted.
fn is_safe_locale(locale: &str) -> bool {
    !locale.is_empty()
        && locale.len() <= 16
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const EN_BANK: &str = r#"{"pass_pct":80,"questions":[{"id":"q1","answer":"a"}]}"#;
    const ES_BANK: &str = r#"{"questions":[{"id":"q1","answer":"b","explain":"seguridad"}]}"#;

    fn bank_dir(files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("exam-bank-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        for (name, body) in files {
            fs::write(dir.join(name), body).unwrap();
        }
        dir
    }

    #[test]
    fn serves_requested_locale() {
        let dir = bank_dir(&[("en.json", EN_BANK), ("es.json", ES_BANK)]);
        let service = ExamBankService::new(dir);
        let (locale, bank) = tokio_test::block_on(service.load(Some("es"))).unwrap();
        assert_eq!(locale, "es");
        assert_eq!(bank.questions[0].answer, "b");
        assert_eq!(bank.pass_mark(), 80);
    }

    #[test]
    fn falls_back_when_locale_file_missing() {
        let dir = bank_dir(&[("en.json", EN_BANK)]);
        let service = ExamBankService::new(dir);
        let (locale, bank) = tokio_test::block_on(service.load(Some("de"))).unwrap();
        assert_eq!(locale, "en");
        assert_eq!(bank.questions[0].answer, "a");
    }

    #[test]
    fn falls_back_when_locale_file_is_malformed() {
        let dir = bank_dir(&[("en.json", EN_BANK), ("fr.json", "{not json")]);
        let service = ExamBankService::new(dir);
        let (locale, _) = tokio_test::block_on(service.load(Some("fr"))).unwrap();
        assert_eq!(locale, "en");
    }

    #[test]
    fn rejects_locales_with_path_characters() {
        let dir = bank_dir(&[("en.json", EN_BANK)]);
        let service = ExamBankService::new(dir);
        let (locale, _) = tokio_test::block_on(service.load(Some("../../etc/passwd"))).unwrap();
        assert_eq!(locale, "en");
    }

    #[test]
    fn missing_default_bank_is_a_config_error() {
        let dir = bank_dir(&[]);
        let service = ExamBankService::new(dir);
        let err = tokio_test::block_on(service.load(None)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
