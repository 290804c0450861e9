use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download interrupted for {url}: {source}")]
    Transfer {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write cascade to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve a cascade definition by name, checking local copies before
/// downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled directory (for development / pre-packaged installs)
/// 3. Download from URL to cache
pub fn resolve(
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    resolve_in(&cascade_cache_dir()?, name, url, bundled_dir, progress)
}

/// Same as [`resolve`] with an explicit cache directory.
pub fn resolve_in(
    cache_dir: &Path,
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, CascadeResolveError> {
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        log::debug!("Using cached cascade {}", cached_path.display());
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            log::debug!("Using bundled cascade {}", bundled_path.display());
            return Ok(bundled_path);
        }
    }

    fs::create_dir_all(cache_dir).map_err(CascadeResolveError::CacheDir)?;
    log::info!("Downloading {name} from {url}");
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific cascade cache directory.
///
/// - macOS: `~/Library/Application Support/EyeSide/cascades/`
/// - Linux: `$XDG_CACHE_HOME/EyeSide/cascades/` or `~/.cache/EyeSide/cascades/`
/// - Windows: `%LOCALAPPDATA%/EyeSide/cascades/`
pub fn cascade_cache_dir() -> Result<PathBuf, CascadeResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("EyeSide").join("cascades"))
            .ok_or(CascadeResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("EyeSide").join("cascades"))
            .ok_or(CascadeResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), CascadeResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), CascadeResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| CascadeResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);

    let mut file = fs::File::create(temp_path).map_err(|e| CascadeResolveError::Write {
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    stream_body(url, &mut response, &mut file, temp_path, total, progress.as_ref())?;

    file.flush().map_err(|e| CascadeResolveError::Write {
        path: temp_path.to_path_buf(),
        source: e,
    })?;
    drop(file);

    // Rename last so a partial download never looks like a cached cascade
    fs::rename(temp_path, dest).map_err(|e| CascadeResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Copies the response body into `out`, reporting progress per chunk.
/// Read failures belong to the transfer, write failures to `out_path`.
fn stream_body(
    url: &str,
    body: &mut impl Read,
    out: &mut impl Write,
    out_path: &Path,
    total: u64,
    progress: Option<&ProgressFn>,
) -> Result<u64, CascadeResolveError> {
    let mut downloaded: u64 = 0;
    let mut buf = vec![0u8; 64 * 1024];
    loop {
        let n = body
            .read(&mut buf)
            .map_err(|e| CascadeResolveError::Transfer {
                url: url.to_string(),
                source: e,
            })?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])
            .map_err(|e| CascadeResolveError::Write {
                path: out_path.to_path_buf(),
                source: e,
            })?;
        downloaded += n as u64;
        if let Some(cb) = progress {
            cb(downloaded, total);
        }
    }
    Ok(downloaded)
}
