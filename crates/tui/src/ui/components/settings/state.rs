/// Labelled stops of the personality slider, from most casual to most formal.
pub const PERSONALITY_MARKS: [(u8, &str); 5] = [
    (0, "Friendly"),
    (25, "Nice"),
    (50, "Normal"),
    (75, "Serious"),
    (100, "Corporate"),
];

const STEP: u8 = 25;
const MAX: u8 = 100;

/// Assistant tone, from 0 (friendly) to 100 (corporate) in steps of 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalitySlider {
    value: u8,
}

impl PersonalitySlider {
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Move by `steps` stops, clamping at both ends.
    pub fn step_by(&mut self, steps: i8) {
        let target = i16::from(self.value) + i16::from(steps) * i16::from(STEP);
        self.value = target.clamp(0, i16::from(MAX)) as u8;
    }

    /// Label of the stop the slider rests on.
    pub fn label(&self) -> &'static str {
        PERSONALITY_MARKS
            .iter()
            .rev()
            .find(|(value, _)| *value <= self.value)
            .map(|(_, label)| *label)
            .unwrap_or(PERSONALITY_MARKS[0].1)
    }

    /// Position of the stop in `PERSONALITY_MARKS`.
    pub fn mark_index(&self) -> usize {
        usize::from(self.value / STEP)
    }
}

impl Default for PersonalitySlider {
    fn default() -> Self {
        Self { value: 50 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub slider: PersonalitySlider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_normal() {
        let slider = PersonalitySlider::default();
        assert_eq!(slider.value(), 50);
        assert_eq!(slider.label(), "Normal");
    }

    #[test]
    fn steps_clamp_at_both_ends() {
        let mut slider = PersonalitySlider::default();
        slider.step_by(1);
        assert_eq!(slider.label(), "Serious");
        slider.step_by(5);
        assert_eq!(slider.value(), 100);
        assert_eq!(slider.label(), "Corporate");
        slider.step_by(-10);
        assert_eq!(slider.value(), 0);
        assert_eq!(slider.label(), "Friendly");
        assert_eq!(slider.mark_index(), 0);
    }
}
