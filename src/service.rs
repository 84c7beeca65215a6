use std::sync::Arc;

use log::{info, warn};
use thiserror::Error;

use crate::cache::ImageCache;
use crate::images::{
    decode_image, render, DecodeError, EncodeError, EncodedImage, PipelineError, TransformError,
};
use crate::models::ImageRequest;
use crate::source::{ImageSource, SourceError};

/// Everything that can go wrong while serving one request. The HTTP layer
/// answers all of them the same way; the distinction is kept for logs.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Source error: {0}")]
    Source(SourceError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Transform error: {0}")]
    Transform(TransformError),

    #[error(transparent)]
    Encode(EncodeError),

    #[error("Worker error: {0}")]
    Worker(String),
}

impl ServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Source(_) => "source",
            ServiceError::Decode(_) => "decode",
            ServiceError::Transform(_) => "transform",
            ServiceError::Encode(_) => "encode",
            ServiceError::Worker(_) => "worker",
        }
    }
}

impl From<SourceError> for ServiceError {
    fn from(error: SourceError) -> Self {
        match error {
            SourceError::NotFound(name) => ServiceError::NotFound(name),
            other => ServiceError::Source(other),
        }
    }
}

impl From<PipelineError> for ServiceError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Transform(e) => ServiceError::Transform(e),
            PipelineError::Encode(e) => ServiceError::Encode(e),
        }
    }
}

/// A failed request, carrying the request as it was received.
#[derive(Error, Debug)]
#[error("Bad request for '{}': {kind}", .request.name)]
pub struct RequestError {
    pub request: ImageRequest,
    #[source]
    pub kind: ServiceError,
}

#[derive(Debug, Clone)]
pub struct ServedImage {
    pub image: EncodedImage,
    /// Seconds since the image was rendered, when it came from the cache.
    pub cache_age: Option<u64>,
}

#[derive(Clone)]
pub struct ImageService {
    source: Arc<dyn ImageSource>,
    cache: Arc<ImageCache>,
}

impl ImageService {
    pub fn new(source: Arc<dyn ImageSource>, cache: Arc<ImageCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Serves `request` from the cache, rendering and storing it on a miss.
    ///
    /// Two concurrent misses for the same key both render; the later store
    /// wins. Failures are never cached.
    pub fn handle(&self, request: ImageRequest) -> Result<ServedImage, RequestError> {
        let key = request.cache_key();

        if let Some((image, age)) = self.cache.get_image(&key) {
            info!("Rendered image found in cache: {}", key);
            return Ok(ServedImage {
                image,
                cache_age: Some(age),
            });
        }

        info!("Rendered image not found in cache: {}", key);

        match self.process(&request) {
            Ok(image) => {
                self.cache.store_image(&key, image.clone());
                Ok(ServedImage {
                    image,
                    cache_age: None,
                })
            }
            Err(kind) => {
                warn!(
                    "Failed to serve '{}' ({}): {}",
                    request.name,
                    kind.kind(),
                    kind
                );
                Err(RequestError { request, kind })
            }
        }
    }

    fn process(&self, request: &ImageRequest) -> Result<EncodedImage, ServiceError> {
        let data = self.source.open(&request.name)?;
        let source = decode_image(&data)?;
        Ok(render(source, request)?)
    }
}
