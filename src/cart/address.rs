// address arithmetic for the top mirror window
use clap::ValueEnum;

/// Highest address the 6507 can see. The cartridge is mirrored so that its
/// last byte always lands here.
pub const TOP_OF_ADDRESS_SPACE: u16 = 0xFFFF;

/// Cartridge sizes the 2600 mirrors cleanly without bank switching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RomSize {
    #[default]
    #[value(name = "2k")]
    K2,
    #[value(name = "4k")]
    K4,
}

impl RomSize {
    pub fn bytes(self) -> usize {
        match self {
            RomSize::K2 => 2 * 1024,
            RomSize::K4 => 4 * 1024,
        }
    }
}

/// Little-endian split: (low, high).
pub fn split_address(addr: u16) -> (u8, u8) {
    ((addr & 0x00FF) as u8, (addr >> 8) as u8)
}

/// First byte of the image as seen through the topmost mirror,
/// 0xF800 for 2K carts and 0xF000 for 4K carts. The window must fit below
/// `top`.
pub fn compute_reset_address(top: u16, rom_size: usize) -> u16 {
    let base = (top as usize + 1)
        .checked_sub(rom_size)
        .unwrap_or_else(|| panic!("{rom_size} byte window does not fit below 0x{top:04X}"));
    base as u16
}

/// Address of `offset_into_segments` inside the mirrored image. The offset
/// must land inside the image.
pub fn compute_reentry_address(top: u16, rom_size: usize, offset_into_segments: usize) -> u16 {
    assert!(
        offset_into_segments < rom_size,
        "offset {offset_into_segments} lies outside a {rom_size} byte image"
    );
    compute_reset_address(top, rom_size) + offset_into_segments as u16
}
