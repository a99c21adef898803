use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use eyre::Result;
use log::{info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{ClassifiedError, ErrorKind, RawFailure};

/// Pinata pinning endpoint
const PINATA_PIN_FILE_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";

/// A failed upload as reported by the service, before classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFailure {
    /// HTTP status, if a response was received
    pub status: Option<u16>,
    /// Response body or transport error
    pub message: String,
}

/// Stores an image and returns a URL for it.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// Uploads `payload` under `file_name`.
    async fn upload(
        &self,
        file_name: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<String, UploadFailure>;
}

/// Pinata IPFS uploader
#[derive(Debug)]
pub struct PinataUploader {
    /// Pinata JWT
    jwt: String,
    /// The HTTP client
    client: Client,
}

/// Successful pin response
#[derive(Deserialize)]
struct PinResponse {
    /// Content identifier of the pinned file
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataUploader {
    /// Create a new uploader authenticated with `jwt`.
    ///
    /// # Errors
    /// * If the HTTP client cannot be built
    pub fn new(jwt: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            jwt: jwt.into(),
            client,
        })
    }

    /// Create an uploader from the `PINATA_JWT` setting.
    ///
    /// # Errors
    /// * If `PINATA_JWT` is not set
    pub fn from_jwt(jwt: Option<&str>) -> Result<Self> {
        let jwt = jwt.ok_or_else(|| eyre::eyre!("PINATA_JWT not set"))?;
        Self::new(jwt)
    }
}

#[async_trait]
impl ImageUploader for PinataUploader {
    async fn upload(
        &self,
        file_name: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<String, UploadFailure> {
        let part = Part::bytes(payload.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| transport_failure(&e))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(PINATA_PIN_FILE_URL)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadFailure {
                status: Some(status.as_u16()),
                message: format!("Pinata API error {status}: {body}"),
            });
        }

        let pinned = response
            .json::<PinResponse>()
            .await
            .map_err(|e| transport_failure(&e))?;
        Ok(format!("ipfs://{}", pinned.ipfs_hash))
    }
}

/// A failure that happened before a response status was available.
fn transport_failure(error: &reqwest::Error) -> UploadFailure {
    let message = if error.is_timeout() || error.is_connect() {
        format!("connection error: {error}")
    } else {
        error.to_string()
    };
    UploadFailure {
        status: error.status().map(|status| status.as_u16()),
        message,
    }
}

/// Content type for an image file name, from its extension.
#[must_use]
pub fn image_content_type(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Uploads an image and classifies any failure.
///
/// # Errors
/// * [`ErrorKind::UploadFailed`] for an empty payload or an unknown image type
/// * Classified upload failure otherwise
pub async fn upload_image<U>(
    uploader: &U,
    file_name: &str,
    payload: Bytes,
) -> Result<String, ClassifiedError>
where
    U: ImageUploader + ?Sized,
{
    if payload.is_empty() {
        return Err(ClassifiedError::new(
            ErrorKind::UploadFailed,
            format!("{file_name} is empty"),
            "empty payload",
        ));
    }
    let content_type = image_content_type(file_name).ok_or_else(|| {
        ClassifiedError::new(
            ErrorKind::UploadFailed,
            format!("{file_name} is not a supported image type"),
            "unsupported extension",
        )
    })?;

    match uploader.upload(file_name, payload, content_type).await {
        Ok(url) => {
            info!("upload::upload_image: {file_name} pinned at {url}");
            Ok(url)
        }
        Err(failure) => {
            warn!(
                "upload::upload_image: {file_name} failed ({:?}): {}",
                failure.status, failure.message
            );
            Err(ClassifiedError::classify(&RawFailure::upload(
                &failure.message,
                failure.status,
            )))
        }
    }
}

/// Reads an image from disk and uploads it.
///
/// # Errors
/// * [`ErrorKind::UploadFailed`] if the file cannot be read
/// * Anything [`upload_image`] returns
pub async fn upload_image_file<U>(uploader: &U, path: &Path) -> Result<String, ClassifiedError>
where
    U: ImageUploader + ?Sized,
{
    let payload = tokio::fs::read(path).await.map_err(|e| {
        ClassifiedError::new(
            ErrorKind::UploadFailed,
            format!("cannot read {}", path.display()),
            e.to_string(),
        )
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image");
    upload_image(uploader, file_name, Bytes::from(payload)).await
}
