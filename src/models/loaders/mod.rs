pub mod image_loader;

pub use image_loader::{load_batch, load_image_file};
