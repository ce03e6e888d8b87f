//! Filesystem-backed platform services.
//!
//! Downloads land in the configured download directory. "Saving to the library"
//! copies the file into the library directory and "sharing" copies it into a
//! share outbox, which is as close as a terminal host gets to a media library
//! and a share sheet.

use super::PlatformServices;
use crate::domain::error::{PixgridError, Result};
use crate::Config;
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Local directories standing in for the host media library and share target.
#[derive(Debug, Clone)]
pub struct LocalPlatform {
    client: Client,
    download_dir: PathBuf,
    library_dir: PathBuf,
    share_dir: PathBuf,
}

impl LocalPlatform {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            download_dir: config.download_dir.clone(),
            library_dir: config.library_dir.clone(),
            share_dir: config.share_dir.clone(),
        })
    }

    async fn copy_into(path: &Path, dir: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .ok_or_else(|| PixgridError::Platform(format!("not a file: {}", path.display())))?;

        tokio::fs::create_dir_all(dir).await?;
        let target = dir.join(file_name);
        tokio::fs::copy(path, &target).await?;
        Ok(target)
    }
}

#[async_trait]
impl PlatformServices for LocalPlatform {
    async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        if file_name.is_empty() {
            return Err(PixgridError::Platform("image has no file name".to_string()));
        }
        if matches!(file_name, "." | "..") || file_name.contains(['/', '\\']) {
            return Err(PixgridError::Platform(format!("invalid file name: {file_name}")));
        }

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PixgridError::Api { status, body });
        }
        let bytes = response.bytes().await?;

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let path = self.download_dir.join(file_name);
        tokio::fs::write(&path, &bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "download written");
        Ok(path)
    }

    async fn save(&self, path: &Path) -> Result<()> {
        let target = Self::copy_into(path, &self.library_dir).await?;
        tracing::info!(target = %target.display(), "image saved to library");
        Ok(())
    }

    async fn share(&self, path: &Path) -> Result<()> {
        let target = Self::copy_into(path, &self.share_dir).await?;
        tracing::info!(target = %target.display(), "image placed in share outbox");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn platform(root: &Path) -> LocalPlatform {
        let config = Config {
            download_dir: root.join("downloads"),
            library_dir: root.join("library"),
            share_dir: root.join("outbox"),
            ..Config::default()
        };
        LocalPlatform::new(&config).unwrap()
    }

    #[tokio::test]
    async fn save_copies_into_library() {
        let tmp = TempDir::new().unwrap();
        let platform = platform(tmp.path());
        let source = tmp.path().join("cat.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        platform.save(&source).await.unwrap();

        let saved = std::fs::read(tmp.path().join("library/cat.jpg")).unwrap();
        assert_eq!(saved, b"jpeg");
    }

    #[tokio::test]
    async fn share_copies_into_outbox() {
        let tmp = TempDir::new().unwrap();
        let platform = platform(tmp.path());
        let source = tmp.path().join("dog.png");
        std::fs::write(&source, b"png").unwrap();

        platform.share(&source).await.unwrap();

        assert!(tmp.path().join("outbox/dog.png").exists());
    }

    #[tokio::test]
    async fn save_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let platform = platform(tmp.path());

        let err = platform.save(&tmp.path().join("missing.jpg")).await.unwrap_err();
        assert!(matches!(err, PixgridError::Io(_)));
    }

    #[tokio::test]
    async fn download_rejects_invalid_url() {
        let tmp = TempDir::new().unwrap();
        let platform = platform(tmp.path());

        let err = platform.download("not a url", "x.jpg").await.unwrap_err();
        assert!(matches!(err, PixgridError::Http(_)));
        assert!(!tmp.path().join("downloads/x.jpg").exists());
    }

    #[tokio::test]
    async fn download_stays_inside_download_dir() {
        let tmp = TempDir::new().unwrap();
        let platform = platform(tmp.path());

        for name in ["..", ".", "../escape.jpg", "a/b.jpg", "a\\b.jpg"] {
            let err = platform.download("https://cdn.example/a.jpg", name).await.unwrap_err();
            assert!(matches!(err, PixgridError::Platform(_)), "{name}: {err}");
        }
        assert!(!tmp.path().join("escape.jpg").exists());
    }

    #[tokio::test]
    async fn download_requires_file_name() {
        let tmp = TempDir::new().unwrap();
        let platform = platform(tmp.path());

        let err = platform.download("https://cdn.example/a.jpg", "").await.unwrap_err();
        assert!(matches!(err, PixgridError::Platform(_)));
    }
}
