use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use evergreen::{RotationPreset, SceneControls};

pub const MAX_WISH_CHARS: usize = 64;
/// How long a cast wish stays acknowledged before the input clears.
pub const WISH_ACKNOWLEDGE_SECS: f32 = 4.0;

const GOLD: Color = Color::srgb(0.83, 0.69, 0.22);
const PANEL: Color = Color::srgba(0.0, 0.0, 0.0, 0.4);
const IDLE: Color = Color::srgba(1.0, 1.0, 1.0, 0.1);

/// The cosmetic wish field. Wishes are logged and acknowledged, never stored.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct WishInput {
	text: String,
	cast_at: Option<f32>,
}

impl WishInput {
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn is_acknowledging(&self) -> bool {
		self.cast_at.is_some()
	}

	/// Appends a printable character while there is room and no wish is being acknowledged.
	pub fn push(&mut self, c: char) -> bool {
		if c.is_control() || self.is_acknowledging() || self.text.chars().count() >= MAX_WISH_CHARS {
			return false;
		}
		self.text.push(c);
		true
	}

	pub fn backspace(&mut self) {
		if !self.is_acknowledging() {
			self.text.pop();
		}
	}

	/// Casts the trimmed wish at `now`; blank wishes are ignored.
	pub fn submit(&mut self, now: f32) -> Option<String> {
		if self.is_acknowledging() {
			return None;
		}
		let wish = self.text.trim();
		if wish.is_empty() {
			return None;
		}
		let wish = wish.to_string();
		self.cast_at = Some(now);
		Some(wish)
	}

	/// Clears the field once the acknowledgement has been shown long enough.
	pub fn tick(&mut self, now: f32) {
		if let Some(cast_at) = self.cast_at {
			if now - cast_at >= WISH_ACKNOWLEDGE_SECS {
				self.cast_at = None;
				self.text.clear();
			}
		}
	}

	pub fn display(&self) -> String {
		if self.is_acknowledging() {
			"Wish Cast to the Stars".to_string()
		} else if self.text.is_empty() {
			"Make a Holiday Wish: type your wish...".to_string()
		} else {
			format!("Make a Holiday Wish: {}_", self.text)
		}
	}
}

pub fn status_line(controls: &SceneControls) -> String {
	let rotation = controls.preset().map_or("Custom", |preset| preset.label());
	format!(
		"Illumination: {}\nRotation: {} ({:.1})",
		if controls.illumination { "ON" } else { "OFF" },
		rotation,
		controls.rotation_speed()
	)
}

#[derive(Component, Debug, Clone, Copy)]
pub struct IlluminationButton;

#[derive(Component, Debug, Clone, Copy)]
pub struct PresetButton(pub RotationPreset);

#[derive(Component, Debug, Clone, Copy)]
pub struct StatusText;

#[derive(Component, Debug, Clone, Copy)]
pub struct WishText;

fn button_node() -> Node {
	Node {
		padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
		margin: UiRect::all(Val::Px(4.0)),
		border: UiRect::all(Val::Px(1.0)),
		justify_content: JustifyContent::Center,
		..default()
	}
}

pub fn setup_ui(mut commands: Commands, controls: Res<SceneControls>, wish: Res<WishInput>) {
	log::info!("Setting up UI");

	commands
		.spawn((
			Node {
				position_type: PositionType::Absolute,
				bottom: Val::Px(24.0),
				right: Val::Px(24.0),
				padding: UiRect::all(Val::Px(12.0)),
				flex_direction: FlexDirection::Column,
				align_items: AlignItems::FlexEnd,
				..default()
			},
			BackgroundColor(PANEL),
		))
		.with_children(|parent| {
			parent.spawn((
				Text::new(status_line(&controls)),
				TextFont { font_size: 16.0, ..default() },
				TextColor(GOLD),
				StatusText,
			));

			parent
				.spawn((Button, button_node(), BorderColor::all(GOLD), BackgroundColor(IDLE), IlluminationButton))
				.with_children(|button| {
					button.spawn((
						Text::new("Illumination"),
						TextFont { font_size: 14.0, ..default() },
						TextColor(Color::WHITE),
					));
				});

			parent
				.spawn(Node { flex_direction: FlexDirection::Row, ..default() })
				.with_children(|row| {
					for preset in RotationPreset::ALL {
						row.spawn((
							Button,
							button_node(),
							BorderColor::all(GOLD),
							BackgroundColor(IDLE),
							PresetButton(preset),
						))
						.with_children(|button| {
							button.spawn((
								Text::new(preset.label()),
								TextFont { font_size: 14.0, ..default() },
								TextColor(Color::WHITE),
							));
						});
					}
				});
		});

	commands
		.spawn((
			Node {
				position_type: PositionType::Absolute,
				bottom: Val::Px(24.0),
				left: Val::Px(24.0),
				padding: UiRect::all(Val::Px(12.0)),
				..default()
			},
			BackgroundColor(PANEL),
		))
		.with_children(|parent| {
			parent.spawn((
				Text::new(wish.display()),
				TextFont { font_size: 18.0, ..default() },
				TextColor(Color::WHITE),
				WishText,
			));
		});
}

pub fn handle_illumination_button(
	mut controls: ResMut<SceneControls>,
	query: Query<&Interaction, (Changed<Interaction>, With<IlluminationButton>)>,
) {
	for interaction in &query {
		if *interaction == Interaction::Pressed {
			controls.toggle_illumination();
			log::info!("Illumination {}", if controls.illumination { "on" } else { "off" });
		}
	}
}

pub fn handle_preset_buttons(
	mut controls: ResMut<SceneControls>,
	query: Query<(&Interaction, &PresetButton), Changed<Interaction>>,
) {
	for (interaction, preset) in &query {
		if *interaction == Interaction::Pressed {
			controls.set_rotation_speed(preset.0.speed());
			log::info!("Rotation preset {:?}", preset.0);
		}
	}
}

/// Highlights the active controls and refreshes the status line.
pub fn update_controls_display(
	controls: Res<SceneControls>,
	mut status: Query<&mut Text, With<StatusText>>,
	mut illumination: Query<&mut BackgroundColor, (With<IlluminationButton>, Without<PresetButton>)>,
	mut presets: Query<(&PresetButton, &mut BackgroundColor), Without<IlluminationButton>>,
) {
	if !controls.is_changed() {
		return;
	}

	for mut text in &mut status {
		text.0 = status_line(&controls);
	}

	let highlight = GOLD.with_alpha(0.4);
	for mut background in &mut illumination {
		background.0 = if controls.illumination { highlight } else { IDLE };
	}

	let active = controls.preset();
	for (preset, mut background) in &mut presets {
		background.0 = if active == Some(preset.0) { highlight } else { IDLE };
	}
}

pub fn handle_wish_input(
	time: Res<Time>,
	mut keyboard: MessageReader<KeyboardInput>,
	mut wish: ResMut<WishInput>,
) {
	let now = time.elapsed_secs();

	for event in keyboard.read() {
		if event.state != ButtonState::Pressed {
			continue;
		}

		match &event.logical_key {
			Key::Character(characters) => {
				for c in characters.chars() {
					wish.push(c);
				}
			}
			Key::Space => {
				wish.push(' ');
			}
			Key::Backspace => wish.backspace(),
			Key::Enter => {
				if let Some(cast) = wish.submit(now) {
					log::info!("Wish cast to the stars: {}", cast);
				}
			}
			_ => {}
		}
	}

	// only write back when the acknowledgement expires so change detection stays quiet
	if wish.is_acknowledging() {
		let mut expired = wish.clone();
		expired.tick(now);
		if expired != *wish {
			*wish = expired;
		}
	}
}

pub fn update_wish_display(wish: Res<WishInput>, mut query: Query<&mut Text, With<WishText>>) {
	if !wish.is_changed() {
		return;
	}

	for mut text in &mut query {
		text.0 = wish.display();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wish_is_capped() {
		let mut wish = WishInput::default();
		for _ in 0..100 {
			wish.push('*');
		}
		assert_eq!(wish.text().chars().count(), MAX_WISH_CHARS);
		assert!(!wish.push('x'));

		wish.backspace();
		assert!(wish.push('é'));
		assert_eq!(wish.text().chars().count(), MAX_WISH_CHARS);
	}

	#[test]
	fn test_control_characters_are_rejected() {
		let mut wish = WishInput::default();
		assert!(!wish.push('\n'));
		assert!(!wish.push('\u{8}'));
		assert!(wish.text().is_empty());
	}

	#[test]
	fn test_blank_wish_is_not_cast() {
		let mut wish = WishInput::default();
		assert_eq!(wish.submit(0.0), None);
		for c in "   ".chars() {
			wish.push(c);
		}
		assert_eq!(wish.submit(0.0), None);
		assert!(!wish.is_acknowledging());
	}

	#[test]
	fn test_wish_is_trimmed_acknowledged_then_cleared() {
		let mut wish = WishInput::default();
		for c in "  snow  ".chars() {
			wish.push(c);
		}
		assert_eq!(wish.submit(10.0), Some("snow".to_string()));
		assert!(wish.is_acknowledging());
		assert_eq!(wish.display(), "Wish Cast to the Stars");

		// frozen while acknowledged
		assert!(!wish.push('!'));
		assert_eq!(wish.submit(11.0), None);

		wish.tick(13.9);
		assert!(wish.is_acknowledging());
		wish.tick(14.0);
		assert!(!wish.is_acknowledging());
		assert!(wish.text().is_empty());
	}

	#[test]
	fn test_status_line_names_preset() {
		let mut controls = SceneControls::default();
		assert!(status_line(&controls).contains("Slow"));
		assert!(status_line(&controls).contains("ON"));

		controls.set_rotation_speed(1.3);
		controls.toggle_illumination();
		assert!(status_line(&controls).contains("Custom"));
		assert!(status_line(&controls).contains("OFF"));
	}
}
