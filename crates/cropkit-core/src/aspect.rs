//! Aspect-ratio presets and the default crop size each one implies.

use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Aspect-ratio preset chosen when a crop session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// 1:1, used for profile pictures.
    #[default]
    Square,
    /// 3:1, used for cover banners.
    Banner,
    /// 4:3.
    Rectangle,
    /// Unconstrained.
    Free,
}

impl AspectRatio {
    pub const ALL: &'static [Self] = &[Self::Square, Self::Banner, Self::Rectangle, Self::Free];

    /// Width/height ratio, or `None` for free-form.
    pub fn ratio(self) -> Option<f64> {
        match self {
            Self::Square => Some(1.0),
            Self::Banner => Some(3.0),
            Self::Rectangle => Some(4.0 / 3.0),
            Self::Free => None,
        }
    }

    /// Default crop size for an image of the given dimensions.
    ///
    /// The result keeps the preset's ratio but is not yet fitted to any
    /// viewport; callers shrink it with [`Size::fit_within`].
    pub fn default_size(self, image: Size) -> Size {
        match self {
            Self::Square | Self::Free => {
                let side = image.width.min(image.height) / 2.0;
                Size::new(side, side)
            }
            Self::Banner => {
                let width = image.width * 0.9;
                Size::new(width, width / 3.0)
            }
            Self::Rectangle => {
                let width = image.width * 0.8;
                Size::new(width, width * 0.75)
            }
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Square => write!(f, "1:1"),
            Self::Banner => write!(f, "3:1"),
            Self::Rectangle => write!(f, "4:3"),
            Self::Free => write!(f, "Free"),
        }
    }
}
