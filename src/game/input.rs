//! Input Capture and Recording
//!
//! Control calls arriving between frames are folded into one
//! [`InputFrame`] and applied at the start of the next tick. A run can be
//! recorded as `(delta_ms, InputFrame)` pairs and replayed exactly.

use serde::{Serialize, Deserialize};

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Control input for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Jump pressed
    /// - Bit 1: Duck pressed
    /// - Bit 2: Duck released
    /// - Bit 3: Reset requested
    /// - Bit 4-7: Reserved
    pub flags: u8,
}

impl InputFrame {
    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x01;

    /// Duck press flag bit
    pub const FLAG_DUCK_PRESS: u8 = 0x02;

    /// Duck release flag bit
    pub const FLAG_DUCK_RELEASE: u8 = 0x04;

    /// Reset flag bit
    pub const FLAG_RESET: u8 = 0x08;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Frame with a jump.
    pub const fn jump() -> Self {
        Self { flags: Self::FLAG_JUMP }
    }

    /// Frame with a duck press or release.
    pub const fn duck(active: bool) -> Self {
        Self {
            flags: if active { Self::FLAG_DUCK_PRESS } else { Self::FLAG_DUCK_RELEASE },
        }
    }

    /// Frame with a reset.
    pub const fn reset() -> Self {
        Self { flags: Self::FLAG_RESET }
    }

    /// Jump requested.
    #[inline]
    pub fn jump_pressed(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Duck pressed this frame.
    #[inline]
    pub fn duck_pressed(&self) -> bool {
        self.flags & Self::FLAG_DUCK_PRESS != 0
    }

    /// Duck released this frame.
    #[inline]
    pub fn duck_released(&self) -> bool {
        self.flags & Self::FLAG_DUCK_RELEASE != 0
    }

    /// Run restart requested.
    #[inline]
    pub fn reset_requested(&self) -> bool {
        self.flags & Self::FLAG_RESET != 0
    }

    /// Check if frame has no input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags == 0
    }

    /// Merge another frame's controls into this one.
    ///
    /// A later reset discards everything before it. The later duck state
    /// wins when both press and release arrive in the same frame.
    pub fn merge(&mut self, later: InputFrame) {
        if later.reset_requested() {
            self.flags = 0;
        }
        if later.duck_pressed() {
            self.flags &= !Self::FLAG_DUCK_RELEASE;
        }
        if later.duck_released() {
            self.flags &= !Self::FLAG_DUCK_PRESS;
        }
        self.flags |= later.flags;
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// One recorded frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Elapsed time handed to the tick
    pub delta_ms: f64,
    /// Controls applied before the tick
    pub input: InputFrame,
}

/// Recorded run: enough to reproduce it bit-for-bit from the same seed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Seed the run started from
    pub seed: u64,
    /// Frames in order
    pub frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Start an empty recording.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            frames: Vec::new(),
        }
    }

    /// Append a frame.
    pub fn push(&mut self, delta_ms: f64, input: InputFrame) {
        self.frames.push(RecordedFrame { delta_ms, input });
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// =============================================================================
// TESTS
// =============================================================================
