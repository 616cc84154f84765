pub mod read_image;
