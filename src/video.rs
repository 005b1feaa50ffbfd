/*!
Video clock collaborator: the narrow timing interface the CPU side needs
from the picture unit, plus an NTSC dot/scanline counter implementing it.

The CPU core only reads `cycle()` / `scanline()` (to annotate trace lines).
The console loop ticks the clock three times per CPU cycle and polls
`take_frame_complete()` / `take_nmi_request()`.

NTSC timing:
- 341 dots per scanline (0..=340)
- scanlines -1 (pre-render) and 0..=260; 241..=260 is vertical blank
- a frame completes when scanline 260 wraps back to -1
*/

pub const DOTS_PER_SCANLINE: u16 = 341;
pub const PRE_RENDER_SCANLINE: i16 = -1;
pub const LAST_SCANLINE: i16 = 260;
pub const VBLANK_SCANLINE: i16 = 241;

/// Dots per full NTSC frame.
pub const DOTS_PER_FRAME: u32 =
    DOTS_PER_SCANLINE as u32 * (LAST_SCANLINE - PRE_RENDER_SCANLINE + 1) as u32;

/// Timing surface of the video unit.
pub trait VideoClock {
    /// Advance by one dot.
    fn tick(&mut self);

    /// Return to the power-up position (pre-render line, dot 0) and drop
    /// any pending frame / NMI latches.
    fn reset(&mut self);

    /// Dot within the current scanline.
    fn cycle(&self) -> u16;

    fn scanline(&self) -> i16;

    /// True once per completed frame; reading clears it.
    fn take_frame_complete(&mut self) -> bool;

    /// True once per vertical-blank NMI the unit wants delivered to the CPU.
    fn take_nmi_request(&mut self) -> bool {
        false
    }
}

/// Bare NTSC timing counter.
#[derive(Clone, Debug)]
pub struct NtscTiming {
    dot: u16,
    scanline: i16,
    frame: u64,
    frame_complete: bool,
    nmi_on_vblank: bool,
    nmi_latch: bool,
}

impl Default for NtscTiming {
    fn default() -> Self {
        Self::new()
    }
}

impl NtscTiming {
    pub fn new() -> Self {
        Self {
            dot: 0,
            scanline: PRE_RENDER_SCANLINE,
            frame: 0,
            frame_complete: false,
            nmi_on_vblank: false,
            nmi_latch: false,
        }
    }

    /// Same counter, but raising an NMI request at the start of vertical blank.
    pub fn with_vblank_nmi() -> Self {
        Self {
            nmi_on_vblank: true,
            ..Self::new()
        }
    }

    pub fn set_nmi_on_vblank(&mut self, on: bool) {
        self.nmi_on_vblank = on;
    }

    /// Completed frames since construction / reset.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn in_vblank(&self) -> bool {
        self.scanline >= VBLANK_SCANLINE
    }
}

impl VideoClock for NtscTiming {
    fn reset(&mut self) {
        *self = Self {
            nmi_on_vblank: self.nmi_on_vblank,
            ..Self::new()
        };
    }

    fn tick(&mut self) {
        self.dot += 1;

        // Events fire on dot 1 of their scanline.
        if self.dot == 1 && self.scanline == VBLANK_SCANLINE && self.nmi_on_vblank {
            self.nmi_latch = true;
        }

        if self.dot >= DOTS_PER_SCANLINE {
            self.dot = 0;
            self.scanline += 1;
            if self.scanline > LAST_SCANLINE {
                self.scanline = PRE_RENDER_SCANLINE;
                self.frame += 1;
                self.frame_complete = true;
            }
        }
    }

    fn cycle(&self) -> u16 {
        self.dot
    }

    fn scanline(&self) -> i16 {
        self.scanline
    }

    fn take_frame_complete(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }

    fn take_nmi_request(&mut self) -> bool {
        std::mem::take(&mut self.nmi_latch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_returns_to_pre_render_and_keeps_nmi_setting() {
        let mut t = NtscTiming::with_vblank_nmi();
        for _ in 0..DOTS_PER_FRAME {
            t.tick();
        }
        t.reset();
        assert_eq!((t.cycle(), t.scanline(), t.frame()), (0, -1, 0));
        assert!(!t.take_frame_complete());
        for _ in 0..242 * DOTS_PER_SCANLINE as u32 + 1 {
            t.tick();
        }
        assert!(t.take_nmi_request());
    }

    #[test]
    fn starts_on_pre_render_line() {
        let t = NtscTiming::new();
        assert_eq!(t.cycle(), 0);
        assert_eq!(t.scanline(), -1);
    }

    #[test]
    fn scanline_wraps_after_341_dots() {
        let mut t = NtscTiming::new();
        for _ in 0..340 {
            t.tick();
        }
        assert_eq!((t.cycle(), t.scanline()), (340, -1));
        t.tick();
        assert_eq!((t.cycle(), t.scanline()), (0, 0));
    }

    #[test]
    fn frame_completes_once_per_frame() {
        let mut t = NtscTiming::new();
        for _ in 0..DOTS_PER_FRAME - 1 {
            t.tick();
            assert!(!t.take_frame_complete());
        }
        t.tick();
        assert!(t.take_frame_complete());
        assert!(!t.take_frame_complete());
        assert_eq!(t.frame(), 1);
        assert_eq!((t.cycle(), t.scanline()), (0, -1));
    }

    #[test]
    fn vblank_nmi_is_opt_in() {
        let mut plain = NtscTiming::new();
        let mut nmi = NtscTiming::with_vblank_nmi();
        // Dot 1 of scanline 241: 242 full lines (-1..=240) plus one dot.
        let dots = 242 * DOTS_PER_SCANLINE as u32 + 1;
        for _ in 0..dots {
            plain.tick();
            nmi.tick();
        }
        assert_eq!(nmi.scanline(), VBLANK_SCANLINE);
        assert!(nmi.in_vblank());
        assert!(nmi.take_nmi_request());
        assert!(!nmi.take_nmi_request());
        assert!(!plain.take_nmi_request());
    }
}
