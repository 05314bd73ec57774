mod load;
mod loaded;
mod meta;

pub use load::{decode_image_from_bytes, decode_image_from_path};
pub use loaded::LoadedImage;
pub use meta::{ImageMeta, human_readable_bytes};
