pub mod decoded_image;
pub mod pixel_point;
pub mod point2d;
pub mod render_request;
pub mod viewport;
