// cartridge builder root
mod address;
mod image;
mod program;
mod segment;
mod sink;

pub use address::RomSize;
pub use image::{assemble, ImageConfig};
pub use program::{rainbow, ProgramOptions, VideoStandard};
pub use sink::{write_image, Summary};
