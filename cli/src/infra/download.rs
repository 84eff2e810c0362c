//! Archive download over HTTP with a terminal progress bar.
//!
//! Bytes stream into `{dest}.partial`, which is renamed onto `dest` only once
//! the body has been fully written. A failed transfer removes the partial file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::ArchiveDownloader;

/// Production `ArchiveDownloader` backed by `ureq`.
#[derive(Debug, Clone, Copy)]
pub struct UreqDownloader {
    quiet: bool,
}

impl UreqDownloader {
    /// `quiet` hides the progress bar.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ArchiveDownloader for UreqDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let url = url.to_string();
        let dest = dest.to_path_buf();
        let quiet = self.quiet;
        tokio::task::spawn_blocking(move || download_blocking(&url, &dest, quiet))
            .await
            .context("download task panicked")?
    }
}

pub(crate) fn partial_path(dest: &Path) -> PathBuf {
    let mut s = dest.as_os_str().to_owned();
    s.push(".partial");
    PathBuf::from(s)
}

fn download_blocking(url: &str, dest: &Path, quiet: bool) -> Result<()> {
    let partial = partial_path(dest);
    let result = stream_to(url, &partial, quiet);
    match result {
        Ok(()) => std::fs::rename(&partial, dest)
            .with_context(|| format!("failed to finalize download at {}", dest.display())),
        Err(e) => {
            std::fs::remove_file(&partial).ok();
            Err(e)
        }
    }
}

fn stream_to(url: &str, partial: &Path, quiet: bool) -> Result<()> {
    tracing::debug!(url, "starting download");
    let response = match ureq::get(url).call() {
        Ok(r) => r,
        Err(ureq::Error::Status(code, _)) => anyhow::bail!("HTTP {code}"),
        Err(e) => return Err(anyhow::Error::new(e).context("Download interrupted")),
    };

    let total = response
        .header("Content-Length")
        .and_then(|v| v.parse::<u64>().ok());
    let mut file =
        File::create(partial).with_context(|| format!("creating {}", partial.display()))?;
    let pb = make_progress_bar(quiet, total);

    let mut reader = response.into_reader();
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).context("Download interrupted")?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).context("Download interrupted")?;
        pb.inc(n as u64);
    }
    pb.finish_and_clear();
    file.flush().context("flushing download")?;
    Ok(())
}

fn make_progress_bar(quiet: bool, total: Option<u64>) -> indicatif::ProgressBar {
    if quiet {
        return indicatif::ProgressBar::hidden();
    }
    if let Some(t) = total {
        let pb = indicatif::ProgressBar::new(t);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("[{bar:40}] {percent}% {bytes}/{total_bytes}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        pb
    } else {
        indicatif::ProgressBar::new_spinner()
    }
}
