//! OCR fallback via poppler (`pdftoppm`) and tesseract, both run as child
//! processes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::OcrConfig;
use crate::extract::ExtractError;

/// Prefix handed to pdftoppm; pages come out as `page-1.png`, `page-01.png`, ...
const PAGE_PREFIX: &str = "page";

#[derive(Debug, Clone)]
pub struct OcrOutput {
    pub text: String,
    pub pages: usize,
}

/// Availability of the external OCR toolchain, reported at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub pdftoppm: bool,
    pub tesseract: bool,
}

impl ToolStatus {
    pub fn ready(&self) -> bool {
        self.pdftoppm && self.tesseract
    }
}

#[derive(Debug, Clone)]
pub struct OcrEngine {
    config: OcrConfig,
}

impl OcrEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    pub fn rasterize_args(&self, pdf: &Path, out_prefix: &Path) -> Vec<OsString> {
        vec![
            "-r".into(),
            self.config.dpi.to_string().into(),
            "-f".into(),
            "1".into(),
            "-l".into(),
            self.config.max_pages.to_string().into(),
            "-png".into(),
            pdf.as_os_str().to_owned(),
            out_prefix.as_os_str().to_owned(),
        ]
    }

    pub fn tesseract_args(&self, image: &Path) -> Vec<OsString> {
        vec![
            image.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            self.config.lang.clone().into(),
        ]
    }

    /// Renders the first `max_pages` pages of `pdf` into `out_dir` and returns
    /// the images in page order.
    pub async fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let mut cmd = Command::new(&self.config.pdftoppm_bin);
        cmd.args(self.rasterize_args(pdf, &out_dir.join(PAGE_PREFIX)));
        run_tool(cmd, &self.config.pdftoppm_bin, self.timeout()).await?;

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(n) = path.file_name().and_then(|n| n.to_str()).and_then(page_number) {
                pages.push((n, path));
            }
        }
        pages.sort_by_key(|(n, _)| *n);
        Ok(pages.into_iter().map(|(_, p)| p).collect())
    }

    pub async fn recognize(&self, image: &Path) -> Result<String, ExtractError> {
        let mut cmd = Command::new(&self.config.tesseract_bin);
        cmd.args(self.tesseract_args(image));
        if let Some(prefix) = &self.config.tessdata_prefix {
            cmd.env("TESSDATA_PREFIX", prefix);
        }
        let stdout = run_tool(cmd, &self.config.tesseract_bin, self.timeout()).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Rasterizes and recognizes every page, joining page texts with newlines.
    pub async fn ocr_pdf(&self, pdf: &Path) -> Result<OcrOutput, ExtractError> {
        let scratch = tempfile::tempdir()?;
        let pages = self.rasterize(pdf, scratch.path()).await?;
        debug!(pages = pages.len(), "Rasterized PDF for OCR");

        let mut texts = Vec::with_capacity(pages.len());
        for page in &pages {
            texts.push(self.recognize(page).await?);
        }

        Ok(OcrOutput {
            text: texts.join("\n"),
            pages: pages.len(),
        })
    }

    /// Checks that both binaries can be launched.
    pub async fn probe(&self) -> ToolStatus {
        ToolStatus {
            pdftoppm: launches(&self.config.pdftoppm_bin, "-v").await,
            tesseract: launches(&self.config.tesseract_bin, "--version").await,
        }
    }
}

async fn launches(bin: &str, flag: &str) -> bool {
    match Command::new(bin)
        .arg(flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
    {
        Ok(_) => true,
        Err(e) => {
            warn!("{bin} is not available: {e}");
            false
        }
    }
}

/// Runs a child process to completion and returns its stdout.
async fn run_tool(mut cmd: Command, tool: &str, limit: Duration) -> Result<Vec<u8>, ExtractError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match tokio::time::timeout(limit, cmd.output()).await {
        Ok(result) => result.map_err(|source| ExtractError::Spawn {
            tool: tool.to_string(),
            source,
        })?,
        Err(_) => {
            return Err(ExtractError::Timeout {
                tool: tool.to_string(),
                secs: limit.as_secs(),
            })
        }
    };

    if !output.status.success() {
        return Err(ExtractError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output.stdout)
}

/// Parses the page number out of a pdftoppm output name (`page-07.png` → 7).
fn page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix(PAGE_PREFIX)?
        .strip_prefix('-')?
        .strip_suffix(".png")?
        .parse()
        .ok()
}
