pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod params;
pub mod resize;

pub use decode::decode_image;
pub use dimensions::width_driven_dimensions;
pub use encode::encode_image;
pub use params::{EncodeSettings, OutputFormat};
pub use resize::resize_to_width;
