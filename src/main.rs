use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod cart;

use cart::{ImageConfig, ProgramOptions, RomSize, Summary, VideoStandard};

#[derive(Parser, Debug)]
#[command(about = "Build an Atari 2600 cartridge from raw 6502 opcodes")]
struct Args {
    /// Output file for the cartridge image
    #[arg(default_value = "rainbows.bin")]
    output: PathBuf,

    /// Cartridge size
    #[arg(long, value_enum, default_value_t = RomSize::K2)]
    rom_size: RomSize,

    /// Byte used to fill unused ROM (decimal or 0x hex)
    #[arg(long, default_value = "0", value_parser = parse_byte)]
    pad_byte: u8,

    /// Draw 242 visible lines instead of 192
    #[arg(long)]
    pal: bool,

    /// Colour change per frame; larger scrolls faster (decimal or 0x hex)
    #[arg(long, default_value = "4", value_parser = parse_byte)]
    color_step: u8,
}

fn parse_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte {s:?}: {e}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ImageConfig::new(args.rom_size, args.pad_byte);
    let opts = ProgramOptions {
        video: if args.pal { VideoStandard::Pal } else { VideoStandard::Ntsc },
        color_step: args.color_step,
    };

    let segments = cart::rainbow(&opts, config.top(), config.rom_size.bytes());
    let image = cart::assemble(&segments, &config)?;
    cart::write_image(&args.output, &image)?;

    println!();
    println!("{}", Summary::new(args.output.display().to_string(), &image));
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_parse_as_decimal_or_hex() {
        assert_eq!(parse_byte("0"), Ok(0));
        assert_eq!(parse_byte("255"), Ok(255));
        assert_eq!(parse_byte("0xEA"), Ok(0xEA));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xZZ").is_err());
    }

    #[test]
    fn defaults_match_classic_build() {
        let args = Args::parse_from(["cartmaker"]);
        assert_eq!(args.output, PathBuf::from("rainbows.bin"));
        assert_eq!(args.rom_size, RomSize::K2);
        assert_eq!(args.pad_byte, 0);
        assert_eq!(args.color_step, 4);
        assert!(!args.pal);
    }

    #[test]
    fn default_cart_builds_through_reexports() {
        let config = ImageConfig::new(RomSize::K2, 0);
        let segments = cart::rainbow(&ProgramOptions::default(), config.top(), config.rom_size.bytes());
        let image = cart::assemble(&segments, &config).unwrap();

        let summary = Summary::new("rainbows.bin", &image);
        assert_eq!(summary.total_len, 2048);
        assert_eq!(summary.reset_address, 0xF800);
        assert_eq!(&image.bytes()[2043..2046], &[0x00, 0x00, 0xF8]);
    }

    #[test]
    fn flags_are_parsed() {
        let args = Args::parse_from(["cartmaker", "out.bin", "--rom-size", "4k", "--pad-byte", "0xFF", "--pal"]);
        assert_eq!(args.rom_size, RomSize::K4);
        assert_eq!(args.pad_byte, 0xFF);
        assert!(args.pal);
    }
}
