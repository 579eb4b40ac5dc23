pub mod config;
pub mod controls;
pub mod envelope;
pub mod garland;
pub mod hover;
pub mod layers;
pub mod ornaments;
pub mod sparkles;
pub mod style;
pub mod tree;
pub mod twinkle;

pub use config::TreeConfig;
pub use controls::{RotationPreset, SceneControls};
pub use envelope::ConicEnvelope;
pub use garland::{build_garland, GarlandConfig, GarlandCurve};
pub use hover::{Hover, HoverMotion};
pub use layers::{build_layers, LayerSpec, ShellDescriptor};
pub use ornaments::{scatter_ornaments, DecorationInstance, OrnamentCache, OrnamentCategory};
pub use sparkles::{SparkleConfig, SparkleField};
pub use tree::{ChristmasTree, ChristmasTreeBuilder};
pub use twinkle::{twinkle_scale, TwinkleState};
