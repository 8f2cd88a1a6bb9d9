// src/recipe/kitchen/archive.rs

//! Archive retrieval and extraction for the Kitchen
//!
//! Archives are fetched over HTTP(S) with reqwest, or copied when the
//! location is a local path or `file://` URL. Extraction happens in-process
//! with the tar crate on top of an xz or gzip decoder.

use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for a whole archive download
const HTTP_TIMEOUT: Duration = Duration::from_secs(600);

/// Buffer size for streaming downloads (8 KB)
const STREAM_BUFFER_SIZE: usize = 8192;

/// Where an archive comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveLocation {
    Remote(String),
    Local(PathBuf),
}

impl ArchiveLocation {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Remote(location.to_string())
        } else if let Some(path) = location.strip_prefix("file://") {
            Self::Local(PathBuf::from(path))
        } else {
            Self::Local(PathBuf::from(location))
        }
    }
}

/// Compression wrapped around a tarball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarXz,
    TarGz,
    Tar,
}

impl ArchiveFormat {
    /// Detect the format from a file name
    pub fn from_filename(filename: &str) -> Result<Self> {
        if filename.ends_with(".tar.xz") || filename.ends_with(".txz") {
            Ok(Self::TarXz)
        } else if filename.ends_with(".tar.gz") || filename.ends_with(".tgz") {
            Ok(Self::TarGz)
        } else if filename.ends_with(".tar") {
            Ok(Self::Tar)
        } else {
            Err(Error::ParseError(format!(
                "Unknown archive format: {} (supported: .tar.xz, .tar.gz, .tar)",
                filename
            )))
        }
    }
}

/// Fetch an archive location into `dest`
pub fn fetch_archive(location: &ArchiveLocation, dest: &Path, progress: bool) -> Result<u64> {
    match location {
        ArchiveLocation::Remote(url) => download_file(url, dest, progress),
        ArchiveLocation::Local(path) => {
            debug!("Copying local archive {}", path.display());
            fs::copy(path, dest).map_err(|e| {
                Error::DownloadError(format!("Failed to copy {}: {}", path.display(), e))
            })
        }
    }
}

/// Download a URL to a file, streaming the body
pub fn download_file(url: &str, dest: &Path, progress: bool) -> Result<u64> {
    info!("Downloading {}", url);

    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| Error::DownloadError(format!("Failed to create HTTP client: {e}")))?;

    let mut response = client
        .get(url)
        .send()
        .map_err(|e| Error::DownloadError(format!("Failed to fetch {}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(Error::DownloadError(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let progress_bar = progress.then(|| {
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        pb.set_message(
            dest.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        pb
    });

    let mut file = File::create(dest)
        .map_err(|e| Error::IoError(format!("Failed to create {}: {}", dest.display(), e)))?;

    let mut downloaded: u64 = 0;
    let mut buffer = [0u8; STREAM_BUFFER_SIZE];
    loop {
        let bytes_read = response
            .read(&mut buffer)
            .map_err(|e| Error::DownloadError(format!("Failed to read response: {e}")))?;
        if bytes_read == 0 {
            break;
        }
        file.write_all(&buffer[..bytes_read])
            .map_err(|e| Error::IoError(format!("Failed to write data: {e}")))?;
        downloaded += bytes_read as u64;
        if let Some(pb) = &progress_bar {
            pb.set_position(downloaded);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }
    debug!("Downloaded {} bytes to {}", downloaded, dest.display());
    Ok(downloaded)
}

/// Extract a tarball into `dest`
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let filename = archive
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let format = ArchiveFormat::from_filename(filename)?;

    let file = File::open(archive)
        .map_err(|e| Error::IoError(format!("Failed to open {}: {}", archive.display(), e)))?;
    let reader = BufReader::new(file);

    let decoder: Box<dyn Read> = match format {
        ArchiveFormat::TarXz => Box::new(xz2::read::XzDecoder::new(reader)),
        ArchiveFormat::TarGz => Box::new(flate2::read::GzDecoder::new(reader)),
        ArchiveFormat::Tar => Box::new(reader),
    };

    fs::create_dir_all(dest)?;
    tar::Archive::new(decoder).unpack(dest).map_err(|e| {
        Error::IoError(format!(
            "Failed to extract {}: {}",
            archive.display(),
            e
        ))
    })?;

    debug!("Extracted {} to {}", archive.display(), dest.display());
    Ok(())
}
