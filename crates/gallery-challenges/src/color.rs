//! Random colours.

use rand::Rng;

/// A random `#RRGGBB` colour with uppercase hex digits.
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let value: u32 = rng.gen_range(0..=0xFF_FFFF);
    format!("#{:06X}", value)
}
