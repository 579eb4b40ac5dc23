use crate::ornaments::OrnamentCategory;
use bevy::prelude::*;

/// Value description of a surface, turned into a material at the render boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
	pub base_color: Color,
	pub roughness: f32,
	pub metallic: f32,
	pub emissive: Color,
	pub emissive_intensity: f32,
	/// Opacity below 1.0 switches the material to alpha blending.
	pub opacity: f32,
	pub unlit: bool,
}

impl SurfaceStyle {
	pub fn matte(base_color: Color, roughness: f32) -> Self {
		Self {
			base_color,
			roughness,
			metallic: 0.0,
			emissive: Color::BLACK,
			emissive_intensity: 0.0,
			opacity: 1.0,
			unlit: false,
		}
	}

	pub fn with_metallic(mut self, metallic: f32) -> Self {
		self.metallic = metallic;
		self
	}

	pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
		self.emissive = emissive;
		self.emissive_intensity = intensity;
		self
	}

	pub fn with_opacity(mut self, opacity: f32) -> Self {
		self.opacity = opacity;
		self
	}

	pub fn unlit(mut self) -> Self {
		self.unlit = true;
		self
	}

	pub fn emissive_at(&self, intensity: f32) -> LinearRgba {
		let emissive = LinearRgba::from(self.emissive);
		LinearRgba::rgb(emissive.red * intensity, emissive.green * intensity, emissive.blue * intensity)
	}

	pub fn standard_material(&self) -> StandardMaterial {
		let translucent = self.opacity < 1.0;
		StandardMaterial {
			base_color: self.base_color.with_alpha(self.opacity),
			perceptual_roughness: self.roughness,
			metallic: self.metallic,
			emissive: self.emissive_at(self.emissive_intensity),
			alpha_mode: if translucent { AlphaMode::Blend } else { AlphaMode::Opaque },
			unlit: self.unlit,
			..default()
		}
	}
}

/// Every surface of the tree, keyed by role. Built once and shared by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
	pub emerald: SurfaceStyle,
	pub gold: SurfaceStyle,
	pub red: SurfaceStyle,
	pub light: SurfaceStyle,
	pub trunk: SurfaceStyle,
	pub star_glow: SurfaceStyle,
	/// Ambient motes drifting around the tree.
	pub sparkle: SurfaceStyle,
}

impl Palette {
	pub fn ornament(&self, category: OrnamentCategory) -> &SurfaceStyle {
		match category {
			OrnamentCategory::Gold => &self.gold,
			OrnamentCategory::Red => &self.red,
			OrnamentCategory::Light => &self.light,
		}
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self {
			emerald: SurfaceStyle::matte(Color::srgb_u8(0x01, 0x3a, 0x20), 0.35)
				.with_metallic(0.1)
				.with_emissive(Color::srgb_u8(0x00, 0x1a, 0x0d), 0.2),
			// high polish
			gold: SurfaceStyle::matte(Color::srgb_u8(0xff, 0xd7, 0x00), 0.15).with_metallic(1.0),
			red: SurfaceStyle::matte(Color::srgb_u8(0x8a, 0x03, 0x03), 0.1).with_metallic(0.6),
			light: SurfaceStyle::matte(Color::srgb_u8(0xff, 0xfa, 0xe3), 0.5)
				.with_emissive(Color::srgb_u8(0xff, 0xdf, 0x80), LIGHT_EMISSIVE_ON),
			trunk: SurfaceStyle::matte(Color::srgb_u8(0x3d, 0x28, 0x17), 0.8),
			star_glow: SurfaceStyle::matte(Color::srgb_u8(0xff, 0xd7, 0x00), 1.0)
				.with_opacity(0.2)
				.unlit(),
			sparkle: SurfaceStyle::matte(Color::srgb_u8(0xff, 0xd7, 0x00), 1.0)
				.with_opacity(0.4)
				.unlit(),
		}
	}
}

/// Emissive strength of the light bulbs while illuminated; dark bulbs use zero.
pub const LIGHT_EMISSIVE_ON: f32 = 5.0;
