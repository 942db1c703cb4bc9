//! Entry animations for scroll reveals.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Distance in pixels that translating animations travel.
const TRANSLATE_PX: f32 = 20.0;

/// Starting scale of `zoom-in*` animations.
const ZOOM_IN_SCALE: f32 = 0.6;

/// Starting scale of `zoom-out`.
const ZOOM_OUT_SCALE: f32 = 1.2;

/// Named entry animation applied when an element is revealed.
///
/// Every animation fades opacity from 0 to 1; most also translate or scale
/// from a starting pose back to the element's resting pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealAnimation {
    Fade,
    #[default]
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    FadeUpRight,
    FadeUpLeft,
    FadeDownRight,
    FadeDownLeft,
    ZoomIn,
    ZoomInUp,
    ZoomInDown,
    ZoomOut,
}

impl RevealAnimation {
    /// All animations in definition order.
    pub const ALL: [RevealAnimation; 13] = [
        Self::Fade,
        Self::FadeUp,
        Self::FadeDown,
        Self::FadeLeft,
        Self::FadeRight,
        Self::FadeUpRight,
        Self::FadeUpLeft,
        Self::FadeDownRight,
        Self::FadeDownLeft,
        Self::ZoomIn,
        Self::ZoomInUp,
        Self::ZoomInDown,
        Self::ZoomOut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::FadeUp => "fade-up",
            Self::FadeDown => "fade-down",
            Self::FadeLeft => "fade-left",
            Self::FadeRight => "fade-right",
            Self::FadeUpRight => "fade-up-right",
            Self::FadeUpLeft => "fade-up-left",
            Self::FadeDownRight => "fade-down-right",
            Self::FadeDownLeft => "fade-down-left",
            Self::ZoomIn => "zoom-in",
            Self::ZoomInUp => "zoom-in-up",
            Self::ZoomInDown => "zoom-in-down",
            Self::ZoomOut => "zoom-out",
        }
    }

    /// Translation at the start of the animation, in screen pixels (y grows down).
    ///
    /// The name describes the direction of travel: `fade-up` starts below its
    /// resting place and moves up, `fade-left` starts to the right and moves left.
    pub fn start_offset(self) -> Vec2 {
        let (x, y) = match self {
            Self::Fade | Self::ZoomIn | Self::ZoomOut => (0.0, 0.0),
            Self::FadeUp | Self::ZoomInUp => (0.0, 1.0),
            Self::FadeDown | Self::ZoomInDown => (0.0, -1.0),
            Self::FadeLeft => (1.0, 0.0),
            Self::FadeRight => (-1.0, 0.0),
            Self::FadeUpRight => (-1.0, 1.0),
            Self::FadeUpLeft => (1.0, 1.0),
            Self::FadeDownRight => (-1.0, -1.0),
            Self::FadeDownLeft => (1.0, -1.0),
        };
        Vec2::new(x, y) * TRANSLATE_PX
    }

    /// Scale at the start of the animation.
    pub fn start_scale(self) -> f32 {
        match self {
            Self::ZoomIn | Self::ZoomInUp | Self::ZoomInDown => ZOOM_IN_SCALE,
            Self::ZoomOut => ZOOM_OUT_SCALE,
            _ => 1.0,
        }
    }
}

impl FromStr for RevealAnimation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_up_starts_below() {
        assert_eq!(RevealAnimation::FadeUp.start_offset(), Vec2::new(0.0, 20.0));
        assert_eq!(RevealAnimation::FadeUp.start_scale(), 1.0);
    }

    #[test]
    fn test_zoom_scales() {
        assert_eq!(RevealAnimation::ZoomIn.start_scale(), 0.6);
        assert_eq!(RevealAnimation::ZoomOut.start_scale(), 1.2);
        assert_eq!(RevealAnimation::ZoomIn.start_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_parse_names() {
        for animation in RevealAnimation::ALL {
            assert_eq!(animation.name().parse::<RevealAnimation>(), Ok(animation));
        }
        assert_eq!("flip-up".parse::<RevealAnimation>(), Err("flip-up".to_string()));
    }
}
