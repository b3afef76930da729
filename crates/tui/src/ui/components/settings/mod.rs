//! AI settings pane: the assistant personality slider.

mod settings_component;
mod state;

pub use settings_component::SettingsComponent;
pub use state::{PERSONALITY_MARKS, PersonalitySlider, SettingsState};
