//! Animated style of the designated main-content region.

/// Duration of the fade-out that precedes a navigation.
///
pub const FADE_OUT_MS: u64 = 200;

/// Delay before the entrance transition starts, so layout settles first.
///
pub const ENTRANCE_DELAY_MS: u64 = 50;

/// Duration of the entrance fade and slide.
///
pub const ENTRANCE_MS: u64 = 400;

/// Vertical offset the entrance transition slides up from.
///
pub const ENTRANCE_OFFSET: u16 = 20;

/// Style of the main-content region as the page animates in and out.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainRegion {
    pub opacity: f32,
    pub translate_y: u16,
    pub transition_ms: Option<u64>,
}

impl Default for MainRegion {
    fn default() -> Self {
        MainRegion {
            opacity: 1.0,
            translate_y: 0,
            transition_ms: None,
        }
    }
}

impl MainRegion {
    /// Hide the region below its resting place, ready for the entrance.
    ///
    pub fn prepare_entrance(&mut self) -> &mut Self {
        self.opacity = 0.0;
        self.translate_y = ENTRANCE_OFFSET;
        self.transition_ms = None;
        self
    }

    /// Fade and slide the region into place.
    ///
    pub fn enter(&mut self) -> &mut Self {
        self.transition_ms = Some(ENTRANCE_MS);
        self.opacity = 1.0;
        self.translate_y = 0;
        self
    }

    /// Fade the region out ahead of a navigation.
    ///
    pub fn fade_out(&mut self) -> &mut Self {
        self.transition_ms = Some(FADE_OUT_MS);
        self.opacity = 0.0;
        self
    }

    pub fn is_faded(&self) -> bool {
        self.opacity < 0.5
    }
}
