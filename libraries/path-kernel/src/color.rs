use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque sRGB color with gamma-encoded channels in the range `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
	red: f64,
	green: f64,
	blue: f64,
}

impl Color {
	pub const BLACK: Color = Color { red: 0., green: 0., blue: 0. };
	pub const WHITE: Color = Color { red: 1., green: 1., blue: 1. };

	/// Returns `None` if any channel is outside `[0, 1]` or not finite.
	pub fn from_rgbf64(red: f64, green: f64, blue: f64) -> Option<Color> {
		let valid = |channel: f64| (0. ..=1.).contains(&channel);
		(valid(red) && valid(green) && valid(blue)).then_some(Color { red, green, blue })
	}

	/// Channels are clamped into `[0, 1]`, with `NaN` treated as zero.
	pub fn from_rgbf64_clamped(red: f64, green: f64, blue: f64) -> Color {
		let clamp = |channel: f64| if channel.is_nan() { 0. } else { channel.clamp(0., 1.) };
		Color {
			red: clamp(red),
			green: clamp(green),
			blue: clamp(blue),
		}
	}

	pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Color {
		Color {
			red: red as f64 / 255.,
			green: green as f64 / 255.,
			blue: blue as f64 / 255.,
		}
	}

	/// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb` hex notation.
	///
	/// ```
	/// use path_kernel::Color;
	/// assert_eq!(Color::from_hex("#ff8000"), Some(Color::from_rgb8(255, 128, 0)));
	/// assert_eq!(Color::from_hex("f80"), Some(Color::from_rgb8(255, 136, 0)));
	/// assert_eq!(Color::from_hex("#12345"), None);
	/// ```
	pub fn from_hex(color_str: &str) -> Option<Color> {
		let hex = color_str.trim().strip_prefix('#').unwrap_or(color_str.trim());
		if !hex.is_ascii() {
			return None;
		}

		match hex.len() {
			6 => {
				let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
				let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
				let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
				Some(Color::from_rgb8(r, g, b))
			}
			3 => {
				let digit = |index: usize| u8::from_str_radix(&hex[index..index + 1], 16).ok().map(|value| value * 17);
				Some(Color::from_rgb8(digit(0)?, digit(1)?, digit(2)?))
			}
			_ => None,
		}
	}

	/// Formats as lowercase `#rrggbb`.
	pub fn to_hex(&self) -> String {
		let [r, g, b] = self.to_rgb8();
		format!("#{r:02x}{g:02x}{b:02x}")
	}

	pub fn to_rgb8(&self) -> [u8; 3] {
		[self.red, self.green, self.blue].map(|channel| (channel * 255.).round() as u8)
	}

	pub fn r(&self) -> f64 {
		self.red
	}

	pub fn g(&self) -> f64 {
		self.green
	}

	pub fn b(&self) -> f64 {
		self.blue
	}

	pub fn map_rgb(&self, f: impl Fn(f64) -> f64) -> Color {
		Color::from_rgbf64_clamped(f(self.red), f(self.green), f(self.blue))
	}

	pub fn srgb_to_linear(channel: f64) -> f64 {
		if channel <= 0.04045 { channel / 12.92 } else { ((channel + 0.055) / 1.055).powf(2.4) }
	}

	/// Relative luminance as defined by WCAG, computed from the linearized channels.
	pub fn relative_luminance(&self) -> f64 {
		let [r, g, b] = [self.red, self.green, self.blue].map(Self::srgb_to_linear);
		0.2126 * r + 0.7152 * g + 0.0722 * b
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hex_round_trip_preserves_bytes() {
		assert_eq!(Color::from_hex("#7C67FA").map(|color| color.to_hex()), Some("#7c67fa".to_string()));
	}

	#[test]
	fn rejects_malformed_hex() {
		assert_eq!(Color::from_hex(""), None);
		assert_eq!(Color::from_hex("#gg0000"), None);
		assert_eq!(Color::from_hex("#ff00ff00"), None);
		assert_eq!(Color::from_hex("#ÿÿÿ"), None);
	}

	#[test]
	fn luminance_of_extremes() {
		assert_eq!(Color::BLACK.relative_luminance(), 0.);
		assert!((Color::WHITE.relative_luminance() - 1.).abs() < 1e-12);
	}
}
