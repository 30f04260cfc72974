use anyhow::{bail, Context, Result};

/// Hard ceiling on questions per interview, regardless of `MAX_QUESTIONS`.
pub const QUESTION_LIMIT: usize = 10;

const DEFAULT_QUESTIONS: usize = 5;
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_WHISPER_MODEL: &str = "whisper-large-v3";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value is out of range.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub whisper_model: String,
    pub max_questions: usize,
    pub default_questions: usize,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_questions = parse_env("MAX_QUESTIONS", QUESTION_LIMIT)?;
        let default_questions = match std::env::var("DEFAULT_QUESTIONS") {
            Ok(_) => Some(parse_env("DEFAULT_QUESTIONS", DEFAULT_QUESTIONS)?),
            Err(_) => None,
        };
        let (max_questions, default_questions) =
            question_limits(max_questions, default_questions)?;

        let max_upload_mb = parse_env("MAX_UPLOAD_MB", 25usize)?;

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            openai_model: optional_env("OPENAI_MODEL", DEFAULT_MODEL),
            whisper_model: optional_env("WHISPER_MODEL", DEFAULT_WHISPER_MODEL),
            max_questions,
            default_questions,
            cors_allowed_origins: split_origins(&optional_env(
                "CORS_ALLOWED_ORIGINS",
                DEFAULT_CORS_ORIGINS,
            )),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            port: parse_env("PORT", 8000u16)?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

/// Validates the question limits. An unset default follows a lowered maximum.
fn question_limits(
    max_questions: usize,
    default_questions: Option<usize>,
) -> Result<(usize, usize)> {
    if !(1..=QUESTION_LIMIT).contains(&max_questions) {
        bail!("MAX_QUESTIONS must be between 1 and {QUESTION_LIMIT}, got {max_questions}");
    }

    let default_questions = default_questions.unwrap_or(DEFAULT_QUESTIONS.min(max_questions));
    if !(1..=max_questions).contains(&default_questions) {
        bail!(
            "DEFAULT_QUESTIONS must be between 1 and MAX_QUESTIONS ({max_questions}), got {default_questions}"
        );
    }
    Ok((max_questions, default_questions))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins_trims_and_drops_empty() {
        let origins = split_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_split_origins_default_has_two_entries() {
        assert_eq!(split_origins(DEFAULT_CORS_ORIGINS).len(), 2);
    }

    #[test]
    fn test_unset_default_follows_lowered_maximum() {
        assert_eq!(question_limits(3, None).unwrap(), (3, 3));
        assert_eq!(question_limits(QUESTION_LIMIT, None).unwrap(), (10, 5));
    }

    #[test]
    fn test_explicit_default_above_maximum_is_rejected() {
        let err = question_limits(3, Some(5)).unwrap_err();
        assert!(err.to_string().contains("DEFAULT_QUESTIONS"));
        assert_eq!(question_limits(3, Some(2)).unwrap(), (3, 2));
    }

    #[test]
    fn test_maximum_out_of_range_is_rejected() {
        assert!(question_limits(0, None).is_err());
        assert!(question_limits(QUESTION_LIMIT + 1, None).is_err());
    }
}
