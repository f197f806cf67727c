use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Development mode. A compiled binary cannot reload itself, so this only
    /// raises log verbosity (see `main`).
    pub dev_reload: bool,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub enabled: bool,
    pub lang: String,
    pub dpi: u32,
    pub max_pages: u32,
    pub timeout_secs: u64,
    pub pdftoppm_bin: String,
    pub tesseract_bin: String,
    /// Forwarded to tesseract so it can locate `<lang>.traineddata`.
    pub tessdata_prefix: Option<PathBuf>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lang: "eng".to_string(),
            dpi: 300,
            max_pages: 10,
            timeout_secs: 120,
            pdftoppm_bin: "pdftoppm".to_string(),
            tesseract_bin: "tesseract".to_string(),
            tessdata_prefix: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = OcrConfig::default();
        let max_upload_mb: usize = parse_or(&lookup, "MAX_UPLOAD_MB", 10)?;
        let max_upload_bytes = max_upload_mb
            .checked_mul(1024 * 1024)
            .with_context(|| format!("MAX_UPLOAD_MB is too large, got '{max_upload_mb}'"))?;
        let max_pages: u32 = parse_or(&lookup, "OCR_MAX_PAGES", defaults.max_pages)?;
        if max_pages == 0 {
            bail!("OCR_MAX_PAGES must be at least 1");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            dev_reload: flag_or(&lookup, "DEV_RELOAD", false)?,
            upload_dir: lookup("UPLOAD_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            max_upload_bytes,
            ocr: OcrConfig {
                enabled: flag_or(&lookup, "OCR_ENABLED", defaults.enabled)?,
                lang: lookup("OCR_LANG").unwrap_or(defaults.lang),
                dpi: parse_or(&lookup, "OCR_DPI", defaults.dpi)?,
                max_pages,
                timeout_secs: parse_or(&lookup, "OCR_TIMEOUT_SECS", defaults.timeout_secs)?,
                pdftoppm_bin: lookup("PDFTOPPM_BIN").unwrap_or(defaults.pdftoppm_bin),
                tesseract_bin: lookup("TESSERACT_BIN").unwrap_or(defaults.tesseract_bin),
                tessdata_prefix: lookup("TESSDATA_PREFIX")
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

fn flag_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("{key} must be a boolean (true/false/1/0/yes/no), got '{other}'"),
    }
}
