use rocket::http::{ContentType, Header, Status};
use rocket::response::{self, Responder, Response};
use rocket::serde::json::Json;
use rocket::{Request, State};
use std::io::Cursor;

use crate::images::{OutputFormat, TransformError};
use crate::models::ImageRequest;
use crate::service::{ImageService, RequestError, ServiceError};

#[post("/image", format = "json", data = "<body>")]
pub async fn post_image(
    body: Json<ImageRequest>,
    service: &State<ImageService>,
) -> Result<ImageResponse, RequestError> {
    serve(service, body.into_inner()).await
}

#[get("/image?<query..>")]
pub async fn get_image(
    query: ImageQuery,
    service: &State<ImageService>,
) -> Result<ImageResponse, RequestError> {
    let request = query.into_request().map_err(|err| {
        log::warn!("Rejected image query: {}", err);
        err
    })?;
    serve(service, request).await
}

async fn serve(service: &ImageService, request: ImageRequest) -> Result<ImageResponse, RequestError> {
    log::debug!("Serving image request: {:?}", request);

    let ttl = service.cache().ttl.as_secs();
    let worker = service.clone();
    let echo = request.clone();

    // decoding and transforming is CPU bound, keep it off the async workers
    let served = rocket::tokio::task::spawn_blocking(move || worker.handle(request))
        .await
        .map_err(|e| RequestError {
            request: echo,
            kind: ServiceError::Worker(e.to_string()),
        })??;

    let max_age = served.cache_age.map(|age| ttl.saturating_sub(age)).unwrap_or(ttl);

    Ok(ImageResponse {
        data: served.image.data,
        format: served.image.format,
        max_age,
    })
}

// Query-string form of ImageRequest; keys match the JSON field names.
// Dimensions arrive as raw text so a malformed number is rejected instead of
// being read as absent.
#[derive(FromForm)]
pub struct ImageQuery {
    #[field(name = uncased("name"))]
    pub name: String,
    #[field(name = uncased("format"))]
    pub format: Option<String>,
    #[field(name = uncased("watermark"))]
    pub watermark: Option<String>,
    #[field(name = uncased("backgroundcolor"))]
    pub background_color: Option<String>,
    #[field(name = uncased("height"))]
    pub height: Option<String>,
    #[field(name = uncased("width"))]
    pub width: Option<String>,
}

impl ImageQuery {
    pub fn into_request(self) -> Result<ImageRequest, RequestError> {
        let width = parse_dimension("Width", self.width.as_deref());
        let height = parse_dimension("Height", self.height.as_deref());

        let mut request = ImageRequest {
            name: self.name,
            format: self.format,
            watermark: self.watermark,
            background_color: self.background_color,
            height: height.as_ref().ok().copied().flatten(),
            width: width.as_ref().ok().copied().flatten(),
        };

        match (width, height) {
            (Ok(_), Ok(_)) => Ok(request),
            (Err(e), _) | (_, Err(e)) => {
                request.width = None;
                request.height = None;
                Err(RequestError {
                    request,
                    kind: ServiceError::Transform(e),
                })
            }
        }
    }
}

fn parse_dimension(field: &'static str, value: Option<&str>) -> Result<Option<i32>, TransformError> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<i32>()
                .map_err(|_| TransformError::InvalidParameter {
                    field,
                    value: raw.to_string(),
                })
        })
        .transpose()
}

// Responder for rendered image data
pub struct ImageResponse {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    pub max_age: u64,
}

impl<'r> Responder<'r, 'static> for ImageResponse {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let content_type =
            ContentType::parse_flexible(self.format.mime_type()).unwrap_or(ContentType::Binary);
        let cache_control = format!("public, max-age={}", self.max_age);
        let etag = format!("\"{:x}\"", md5::compute(&self.data));

        if req.headers().get_one("If-None-Match") == Some(etag.as_str()) {
            return Response::build()
                .status(Status::NotModified)
                .header(Header::new("ETag", etag))
                .header(Header::new("Cache-Control", cache_control))
                .ok();
        }

        Response::build()
            .header(content_type)
            .header(Header::new("Cache-Control", cache_control))
            .header(Header::new("ETag", etag))
            .sized_body(self.data.len(), Cursor::new(self.data))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(width: Option<&str>, height: Option<&str>) -> ImageQuery {
        ImageQuery {
            name: "chair.png".into(),
            format: None,
            watermark: None,
            background_color: None,
            height: height.map(String::from),
            width: width.map(String::from),
        }
    }

    #[test]
    fn numeric_dimensions_are_parsed() {
        let request = query(Some("200"), Some(" 100 ")).into_request().unwrap();
        assert_eq!(request.dimensions(), Some((200, 100)));
    }

    #[test]
    fn malformed_dimension_is_rejected() {
        let err = query(Some("abc"), Some("10")).into_request().unwrap_err();
        assert!(matches!(
            err.kind,
            ServiceError::Transform(TransformError::InvalidParameter { field: "Width", .. })
        ));
        assert_eq!(err.request.name, "chair.png");
    }

    #[test]
    fn lone_dimension_still_parses() {
        let request = query(None, Some("10")).into_request().unwrap();
        assert_eq!(request.height, Some(10));
        assert_eq!(request.dimensions(), None);
    }

    #[test]
    fn every_output_format_has_a_content_type() {
        for format in [
            OutputFormat::Png,
            OutputFormat::Jpeg,
            OutputFormat::Tiff,
            OutputFormat::Gif,
            OutputFormat::Bmp,
        ] {
            let parsed = ContentType::parse_flexible(format.mime_type()).unwrap();
            assert_eq!(parsed.to_string(), format.mime_type());
        }
    }
}
