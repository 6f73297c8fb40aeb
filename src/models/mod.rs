pub mod contact;
pub mod image_file;
pub mod loaders;
pub mod progress;

pub use contact::ExtractedContact;
pub use image_file::ImageFile;
pub use loaders::{load_batch, load_image_file};
pub use progress::BatchProgress;
