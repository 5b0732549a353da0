// the "rainbow waterfall" program, as raw 6502 opcodes
//
// Every routine is written out as opcode bytes with the mnemonic alongside.
// Relative branches are hand counted within a segment; the one absolute jump
// crosses segments and is resolved from segment lengths.
use log::info;

use super::address::compute_reentry_address;
use super::segment::{offset_after, Segment};

/// Displacement of the first `STA VSYNC` inside `vblank`, where the frame
/// loop resumes (A has already been loaded with 2 by the end of overscan).
const VSYNC_ENTRY: usize = 4;

/// Position of the JMP operand inside `overscan`.
const LOOP_JMP_OPERAND: usize = 25;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum VideoStandard {
    #[default]
    Ntsc,
    Pal,
}

impl VideoStandard {
    pub fn visible_lines(self) -> u8 {
        match self {
            VideoStandard::Ntsc => 192,
            VideoStandard::Pal => 242,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramOptions {
    pub video: VideoStandard,
    /// Subtracted from the starting colour each frame; sets the scroll speed.
    pub color_step: u8,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            video: VideoStandard::default(),
            color_step: 4,
        }
    }
}

/// Set up the 6507 and clear every TIA register.
pub fn init_tia() -> Segment {
    Segment::new(
        "init_tia",
        vec![
            0x78,       // SEI           ; disable interrupts
            0xD8,       // CLD           ; binary mode
            0xA2, 0xFF, // LDX #$FF
            0x9A,       // TXS           ; stack at top of RAM
            0xA9, 0x00, // LDA #0
            0xE8,       // INX           ; X wraps to 0
            0xA8,       // TAY
            0x95, 0x00, // STA $00,X
            0xCA,       // DEX
            0xD0, 0xFB, // BNE -5        ; to STA $00,X
        ],
    )
}

/// Three lines of vertical sync, then 37 lines of vertical blank.
pub fn vblank() -> Segment {
    Segment::new(
        "vblank",
        vec![
            0xA9, 0x02, // LDA #2
            0x85, 0x01, // STA VBLANK
            0x85, 0x00, // STA VSYNC
            0x85, 0x02, // STA WSYNC
            0x85, 0x02, // STA WSYNC
            0x85, 0x02, // STA WSYNC
            0xA9, 0x00, // LDA #0
            0x85, 0x00, // STA VSYNC
            0xA2, 0x25, // LDX #37
            0x85, 0x02, // STA WSYNC
            0xCA,       // DEX
            0xD0, 0xFB, // BNE -5        ; to STA WSYNC
            0x85, 0x01, // STA VBLANK
        ],
    )
}

/// Visible frame: a new background colour on every scanline, starting from
/// the colour held at $80.
pub fn viz_area(video: VideoStandard) -> Segment {
    Segment::new(
        "viz_area",
        vec![
            0xA2, video.visible_lines(), // LDX #lines
            0xA4, 0x80,                  // LDY $80
            0x84, 0x09,                  // STY COLUBK
            0xC8,                        // INY
            0xC8,                        // INY        ; low bit is ignored
            0x85, 0x02,                  // STA WSYNC
            0xCA,                        // DEX
            0xD0, 0xF7,                  // BNE -9     ; to STY COLUBK
        ],
    )
}

/// 30 blank lines at the bottom of the frame. Shifts the starting colour
/// and jumps back to `looptop`.
pub fn overscan(color_step: u8, looptop: u16) -> Segment {
    Segment::new(
        "overscan",
        vec![
            0xA9, 0x02,       // LDA #2
            0x85, 0x01,       // STA VBLANK
            0xA2, 0x1C,       // LDX #28
            0x85, 0x02,       // STA WSYNC
            0xCA,             // DEX
            0xD0, 0xFB,       // BNE -5      ; to STA WSYNC
            0xA5, 0x80,       // LDA $80
            0x38,             // SEC
            0xE9, color_step, // SBC #step
            0x85, 0x02,       // STA WSYNC   ; 29th line
            0x85, 0x80,       // STA $80
            0xA9, 0x02,       // LDA #2      ; for VSYNC at top of loop
            0x85, 0x02,       // STA WSYNC   ; 30th line
            0x4C, 0x00, 0x00, // JMP looptop
        ],
    )
    .with_address(LOOP_JMP_OPERAND, looptop)
}

/// Lay out the program with the given init routine in front. The loop
/// target is resolved from the real length of `init`.
pub fn frame_loop(init: Segment, opts: &ProgramOptions, top: u16, rom_size: usize) -> Vec<Segment> {
    let vblank = vblank();
    let looptop = compute_reentry_address(top, rom_size, offset_after(&[&init]) + VSYNC_ENTRY);
    info!("main loop re-enters at 0x{looptop:04X}");

    let viz = viz_area(opts.video);
    let overscan = overscan(opts.color_step, looptop);
    vec![init, vblank, viz, overscan]
}

pub fn rainbow(opts: &ProgramOptions, top: u16, rom_size: usize) -> Vec<Segment> {
    frame_loop(init_tia(), opts, top, rom_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::address::{compute_reset_address, TOP_OF_ADDRESS_SPACE};

    fn jmp_target(segs: &[Segment]) -> u16 {
        let bytes = segs[3].bytes();
        assert_eq!(bytes[LOOP_JMP_OPERAND - 1], 0x4C);
        u16::from_le_bytes([bytes[LOOP_JMP_OPERAND], bytes[LOOP_JMP_OPERAND + 1]])
    }

    #[test]
    fn jmp_lands_on_sta_vsync() {
        let segs = rainbow(&ProgramOptions::default(), TOP_OF_ADDRESS_SPACE, 2048);
        let target = jmp_target(&segs);
        let offset = (target - compute_reset_address(TOP_OF_ADDRESS_SPACE, 2048)) as usize;

        let code: Vec<u8> = segs.iter().flat_map(|s| s.bytes().to_vec()).collect();
        assert_eq!(&code[offset..offset + 2], &[0x85, 0x00]);
        assert_eq!(target, 0xF800 + segs[0].len() as u16 + 4);
    }

    #[test]
    fn jmp_follows_init_length() {
        let opts = ProgramOptions::default();
        let base = jmp_target(&rainbow(&opts, TOP_OF_ADDRESS_SPACE, 4096));

        let mut bytes = init_tia().bytes().to_vec();
        bytes.insert(0, 0xEA); // NOP
        let longer = Segment::new("init_tia", bytes);
        let shifted = jmp_target(&frame_loop(longer, &opts, TOP_OF_ADDRESS_SPACE, 4096));

        assert_eq!(shifted, base + 1);
    }

    #[test]
    fn options_reach_operands() {
        let opts = ProgramOptions {
            video: VideoStandard::Pal,
            color_step: 2,
        };
        let segs = rainbow(&opts, TOP_OF_ADDRESS_SPACE, 2048);
        assert_eq!(segs[2].bytes()[1], 242);
        assert_eq!(&segs[3].bytes()[14..16], &[0xE9, 0x02]);
    }

    #[test]
    fn default_options_are_ntsc_at_step_four() {
        let opts = ProgramOptions::default();
        assert_eq!(opts.video, VideoStandard::Ntsc);
        assert_eq!(opts.color_step, 4);
        let segs = rainbow(&opts, TOP_OF_ADDRESS_SPACE, 2048);
        assert_eq!(segs[2].bytes()[1], 192);
    }

    #[test]
    fn segments_in_order() {
        let segs = rainbow(&ProgramOptions::default(), TOP_OF_ADDRESS_SPACE, 2048);
        let names: Vec<_> = segs.iter().map(Segment::name).collect();
        assert_eq!(names, ["init_tia", "vblank", "viz_area", "overscan"]);
        assert_eq!(segs[0].len(), 14);
    }
}
