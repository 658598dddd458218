use crate::http::HttpClient;
use crate::runtime::Runtime;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Downloads a file from a URL to `dest` in a single attempt.
#[tracing::instrument(skip(runtime, dest, http_client))]
pub async fn download_file<R: Runtime>(
    runtime: &R,
    url: &str,
    dest: &Path,
    http_client: &HttpClient,
) -> Result<u64> {
    info!("Downloading {}...", url);

    let bytes = http_client
        .download_file(url, || {
            runtime
                .create_file(dest)
                .with_context(|| format!("Failed to create {:?}", dest))
        })
        .await?;

    info!("Saved {} bytes to {:?}", bytes, dest);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use reqwest::Client;

    #[tokio::test]
    async fn test_download_file() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/powershell_7.4.0_amd64.deb")
            .with_status(200)
            .with_body("test content")
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_create_file()
            .with(mockall::predicate::eq(
                Path::new("/tmp/powershell_7.4.0_amd64.deb").to_path_buf(),
            ))
            .times(1)
            .returning(|_| Ok(Box::new(std::io::sink())));

        let bytes = download_file(
            &runtime,
            &format!("{}/powershell_7.4.0_amd64.deb", url),
            Path::new("/tmp/powershell_7.4.0_amd64.deb"),
            &HttpClient::new(Client::new()),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(bytes, 12);
    }

    #[tokio::test]
    async fn test_download_file_not_found() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/powershell_7.4.0_amd64.deb")
            .with_status(404)
            .create_async()
            .await;

        // No expectations: the file is never created
        let runtime = MockRuntime::new();

        let result = download_file(
            &runtime,
            &format!("{}/powershell_7.4.0_amd64.deb", url),
            Path::new("/tmp/powershell_7.4.0_amd64.deb"),
            &HttpClient::new(Client::new()),
        )
        .await;

        mock.assert_async().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_download_file_create_fails() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/powershell_7.4.0_amd64.deb")
            .with_status(200)
            .with_body("test content")
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_create_file()
            .returning(|_| Err(anyhow::anyhow!("Read-only file system")));

        let result = download_file(
            &runtime,
            &format!("{}/powershell_7.4.0_amd64.deb", url),
            Path::new("/tmp/powershell_7.4.0_amd64.deb"),
            &HttpClient::new(Client::new()),
        )
        .await;

        assert!(result.is_err());
    }
}
