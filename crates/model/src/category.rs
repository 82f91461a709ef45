//! Service tier and parcel content categories.

use serde::{Deserialize, Serialize};

/// Delivery service tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressCategory {
    /// Standard door-to-door delivery.
    Standard,
    /// Oversize/bulky parcel service.
    Bulky,
}

impl ExpressCategory {
    /// Convert from the provider's numeric code.
    pub fn from_flash_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Standard),
            2 => Some(Self::Bulky),
            _ => None,
        }
    }

    /// Convert to the provider's numeric code.
    pub fn as_flash_code(&self) -> u8 {
        match self {
            Self::Standard => 1,
            Self::Bulky => 2,
        }
    }
}

/// Declared parcel contents category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleCategory {
    Document,
    Food,
    Apparel,
    Electronics,
    Cosmetics,
    Fragile,
    Other,
}

impl ArticleCategory {
    /// Convert from the provider's numeric code.
    pub fn from_flash_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Document),
            2 => Some(Self::Food),
            3 => Some(Self::Apparel),
            4 => Some(Self::Electronics),
            5 => Some(Self::Cosmetics),
            6 => Some(Self::Fragile),
            99 => Some(Self::Other),
            _ => None,
        }
    }

    /// Convert to the provider's numeric code.
    pub fn as_flash_code(&self) -> u8 {
        match self {
            Self::Document => 1,
            Self::Food => 2,
            Self::Apparel => 3,
            Self::Electronics => 4,
            Self::Cosmetics => 5,
            Self::Fragile => 6,
            Self::Other => 99,
        }
    }
}
