pub mod error;
pub mod images;

pub use images::ImageResponse;
