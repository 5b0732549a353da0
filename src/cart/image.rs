// cartridge image assembly
use log::{debug, info};
use thiserror::Error;

use super::address::{compute_reset_address, split_address, RomSize, TOP_OF_ADDRESS_SPACE};
use super::segment::Segment;

/// Reset vector position relative to the end of the image.
const RESET_LO_FROM_END: usize = 5;
const RESET_HI_FROM_END: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("program code is {code_len} bytes but a {rom_size} byte cartridge only has room for {capacity} before the reset vector")]
    Oversize {
        code_len: usize,
        capacity: usize,
        rom_size: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageConfig {
    pub rom_size: RomSize,
    pub pad_byte: u8,
    top: u16,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self::new(RomSize::default(), 0)
    }
}

impl ImageConfig {
    pub fn new(rom_size: RomSize, pad_byte: u8) -> Self {
        Self {
            rom_size,
            pad_byte,
            top: TOP_OF_ADDRESS_SPACE,
        }
    }

    pub fn top(&self) -> u16 {
        self.top
    }

    /// Code has to stop short of the reset vector in the trailer.
    pub fn code_capacity(&self) -> usize {
        self.rom_size.bytes() - RESET_LO_FROM_END
    }

    pub fn reset_address(&self) -> u16 {
        compute_reset_address(self.top, self.rom_size.bytes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
    code_len: usize,
    reset_address: u16,
}

impl Image {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn code_len(&self) -> usize {
        self.code_len
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn reset_address(&self) -> u16 {
        self.reset_address
    }
}

/// Stitch `segments` together, pad to the cartridge size and poke the
/// reset vector into the trailer.
pub fn assemble(segments: &[Segment], config: &ImageConfig) -> Result<Image, ImageError> {
    let rom_size = config.rom_size.bytes();

    let mut rom = Vec::with_capacity(rom_size);
    for seg in segments {
        debug!("{:<10} offset {:#06X} len {}", seg.name(), rom.len(), seg.len());
        rom.extend_from_slice(seg.bytes());
    }

    let code_len = rom.len();
    let capacity = config.code_capacity();
    if code_len > capacity {
        return Err(ImageError::Oversize {
            code_len,
            capacity,
            rom_size,
        });
    }

    rom.resize(rom_size, config.pad_byte);

    let reset_address = config.reset_address();
    let (lo, hi) = split_address(reset_address);
    rom[rom_size - RESET_LO_FROM_END] = lo;
    rom[rom_size - RESET_HI_FROM_END] = hi;
    info!("reset vector 0x{reset_address:04X}, {code_len} bytes of code");

    Ok(Image {
        bytes: rom,
        code_len,
        reset_address,
    })
}
