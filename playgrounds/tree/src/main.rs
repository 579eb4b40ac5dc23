use bevy::prelude::*;
use tree_playground::{PlaygroundConfig, TreePlugin};

fn main() -> anyhow::Result<()> {
	let config = PlaygroundConfig::load_from_env()?;
	let seed = config.resolve_seed(std::env::args().nth(1).as_deref());

	println!("Starting tree playground with seed: {}", seed);

	let exit = App::new()
		.add_plugins(DefaultPlugins.set(WindowPlugin {
			primary_window: Some(Window {
				title: "Evergreen".to_string(),
				resolution: (1280, 720).into(),
				..default()
			}),
			..default()
		}))
		.add_plugins(TreePlugin { config, seed })
		.run();

	match exit {
		AppExit::Success => Ok(()),
		AppExit::Error(code) => Err(anyhow::anyhow!("tree playground exited with code {}", code)),
	}
}
