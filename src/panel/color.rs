use serde::{Deserialize, Serialize};

/// A non-premultiplied color with 16-bit channels.
///
/// This is the precision color references are persisted at; 8-bit colors
/// from a picker are widened with [`Color::from_rgba8`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    /// Fully transparent black. What a malformed color reference decodes to.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Widen 8-bit channels so that `0xff` maps to `0xffff`.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(widen(r), widen(g), widen(b), widen(a))
    }

    /// Parse `#rrggbb` or `#rrggbbaa`. Alpha defaults to opaque.
    #[must_use]
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.strip_prefix('#').unwrap_or(raw);
        if !hex.is_ascii() || !matches!(hex.len(), 6 | 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
        Some(Self::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    #[must_use]
    pub fn channels(&self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS-style `#rrggbbaa`, truncated to 8 bits per channel.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.channels().map(|c| c >> 8);
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

fn widen(channel: u8) -> u16 {
    u16::from(channel) * 0x101
}
