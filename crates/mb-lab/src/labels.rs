//! Status text for the presentation layer

use crate::config::Preset;
use crate::draw::DisplayState;

impl Preset {
    /// Menu button label
    pub fn menu_label(self) -> String {
        let config = self.config();
        let mode = if config.with_replacement {
            "With Replacement"
        } else {
            "No Replacement"
        };
        format!("{}: {} ({} draws)", self.name(), mode, config.max_draws)
    }
}

impl DisplayState {
    pub fn bag_label(&self) -> String {
        format!("Marbles in bag: {}", self.bag_count)
    }

    /// "Pulled: ---" before the first draw
    pub fn pulled_label(&self) -> String {
        match self.last_drawn {
            None => "Pulled: ---".to_string(),
            Some(color) if self.with_replacement => format!("Pulled: {color} (replaced)"),
            Some(color) => format!("Pulled: {color} (not replaced)"),
        }
    }

    pub fn draws_label(&self) -> String {
        format!("Draws: {} / {}", self.draws_made, self.max_draws)
    }

    pub fn red_label(&self) -> String {
        format!("Red Marbles: {}", self.red_pulled)
    }
}

#[cfg(test)]
mod tests {
    use crate::color::MarbleColor;
    use crate::config::Preset;
    use crate::engine::SamplingEngine;
    use crate::source::ScriptedSource;

    #[test]
    fn test_menu_labels() {
        assert_eq!(
            Preset::NoReplacement.menu_label(),
            "Game 1: No Replacement (5 draws)"
        );
        assert_eq!(
            Preset::WithReplacement.menu_label(),
            "Game 2: With Replacement (10 draws)"
        );
    }

    #[test]
    fn test_labels_follow_the_game() {
        let mut engine = SamplingEngine::with_source(ScriptedSource::new());
        engine.choose_configuration(Preset::WithReplacement);

        let fresh = engine.display_state();
        assert_eq!(fresh.bag_label(), "Marbles in bag: 30");
        assert_eq!(fresh.pulled_label(), "Pulled: ---");
        assert_eq!(fresh.draws_label(), "Draws: 0 / 10");

        engine.source_mut().push(0);
        engine.draw();
        let after = engine.display_state();
        assert_eq!(after.last_drawn, Some(MarbleColor::Red));
        assert_eq!(after.pulled_label(), "Pulled: Red (replaced)");
        assert_eq!(after.red_label(), "Red Marbles: 1");
    }

    #[test]
    fn test_not_replaced_label() {
        let mut engine = SamplingEngine::with_source(ScriptedSource::new());
        engine.choose_configuration(Preset::NoReplacement);
        engine.draw();

        let display = engine.display_state();
        assert_eq!(display.pulled_label(), "Pulled: Blue (not replaced)");
        assert_eq!(display.bag_label(), "Marbles in bag: 24");
    }
}
