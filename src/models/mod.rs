pub mod image_request;

pub use image_request::ImageRequest;
