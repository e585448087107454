//! The scripted scene sequence
//!
//! One variant per scene, named for the gesture it waits on. The scene is the
//! sole discriminator of behavior: every event handler switches on it, and
//! unmatched (scene, event) pairs are explicit no-ops.

use serde::{Deserialize, Serialize};

use super::state::BallColor;

/// The 28 scripted scenes, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    /// 1: tap the yellow ball to spawn a second
    FirstTap,
    /// 2: tap again to spawn a third
    SecondTap,
    /// 3: rub a yellow ball to turn it red
    RubToRed,
    /// 4: rub a different yellow ball to turn it blue
    RubToBlue,
    /// 5: press the yellow ball five times
    PressYellow,
    /// 6: press the red ball five times
    PressRed,
    /// 7: press the blue ball five times
    PressBlue,
    /// 8: shake nudges every ball a little
    ShakeNudge,
    /// 9: shake scatters the balls across the screen
    ShakeScatter,
    /// 10: tilt left herds the balls to the left edge
    TiltLeft,
    /// 11: tilt right herds them to the right edge
    TiltRight,
    /// 12: shake arranges them on a shuffled grid
    ShakeToGrid,
    /// 13: press every yellow ball to turn the lights out
    LightsOut,
    /// 14: press every yellow ball again to turn them back on
    LightsOn,
    /// 15: two balls swapped positions; find them
    SpotTheSwap,
    /// 16: shake regrids, then the balls bloom into a circle
    ShakeToCircle,
    /// 17: a gentle blow lifts the balls
    GentleBlow,
    /// 18: a strong blow pushes them nearly off-screen
    StrongBlow,
    /// 19: hold the device upright so the balls sink back
    HoldUpright,
    /// 20: first clap grows the balls
    FirstClap,
    /// 21: blow (or clap) grows them further
    GrowBlow,
    /// 22: clap twice
    DoubleClap,
    /// 23: clap three times
    TripleClap,
    /// 24: clap again
    ClapAgain,
    /// 25: applause
    Applause,
    /// 26: more applause; completing it builds the finale pair
    MoreApplause,
    /// 27: press the white ball
    PressWhite,
    /// 28: press the yellow ball to start over
    StartOver,
}

impl Scene {
    /// All scenes in play order
    pub const ALL: [Scene; 28] = [
        Scene::FirstTap,
        Scene::SecondTap,
        Scene::RubToRed,
        Scene::RubToBlue,
        Scene::PressYellow,
        Scene::PressRed,
        Scene::PressBlue,
        Scene::ShakeNudge,
        Scene::ShakeScatter,
        Scene::TiltLeft,
        Scene::TiltRight,
        Scene::ShakeToGrid,
        Scene::LightsOut,
        Scene::LightsOn,
        Scene::SpotTheSwap,
        Scene::ShakeToCircle,
        Scene::GentleBlow,
        Scene::StrongBlow,
        Scene::HoldUpright,
        Scene::FirstClap,
        Scene::GrowBlow,
        Scene::DoubleClap,
        Scene::TripleClap,
        Scene::ClapAgain,
        Scene::Applause,
        Scene::MoreApplause,
        Scene::PressWhite,
        Scene::StartOver,
    ];

    /// Scene number in 1..=28
    pub fn number(self) -> u8 {
        Self::ALL
            .iter()
            .position(|&s| s == self)
            .map(|i| i as u8 + 1)
            .unwrap_or(0)
    }

    /// Scene for a number in 1..=28
    pub fn from_number(n: u8) -> Option<Scene> {
        if (1..=28).contains(&n) {
            Some(Self::ALL[n as usize - 1])
        } else {
            None
        }
    }

    /// The scene after this one in the script, if any
    pub fn next(self) -> Option<Scene> {
        Self::from_number(self.number() + 1)
    }

    /// Required ball color for the five-press scenes
    pub fn press_color(self) -> Option<BallColor> {
        match self {
            Scene::PressYellow => Some(BallColor::Yellow),
            Scene::PressRed => Some(BallColor::Red),
            Scene::PressBlue => Some(BallColor::Blue),
            _ => None,
        }
    }

    /// Scale multiplier applied by a clap or blow in the escalation scenes
    pub fn growth_factor(self) -> Option<f32> {
        match self {
            Scene::FirstClap => Some(1.5),
            Scene::GrowBlow => Some(2.0),
            Scene::DoubleClap => Some(2.0),
            Scene::TripleClap => Some(2.5),
            Scene::ClapAgain => Some(2.5),
            Scene::Applause => Some(3.0),
            Scene::MoreApplause => Some(3.0),
            _ => None,
        }
    }

    /// Player-facing instruction for this scene
    pub fn instruction(self) -> &'static str {
        match self {
            Scene::FirstTap => "Press the yellow ball",
            Scene::SecondTap => "Press the yellow ball again",
            Scene::RubToRed => "Gently rub your finger over the yellow ball",
            Scene::RubToBlue => "Now gently rub your finger over another yellow ball",
            Scene::PressYellow => "Now press 5 times the yellow ball",
            Scene::PressRed => "Now press 5 times the red ball",
            Scene::PressBlue => "Now press 5 times the blue ball",
            Scene::ShakeNudge => "Now shake the phone a bit",
            Scene::ShakeScatter => "Now shake it even more",
            Scene::TiltLeft => "Try to tilt the phone to the left side",
            Scene::TiltRight => "Try to tilt the phone to the right side",
            Scene::ShakeToGrid => "Shake the phone to distribute them again",
            Scene::LightsOut => "Press on all yellow balls",
            Scene::LightsOn => {
                "Funny, turn it on the lights again and by pressing on all yellow balls again"
            }
            Scene::SpotTheSwap => "Two balls are not in the right position. Do you know which?",
            Scene::ShakeToCircle => "Shake it again",
            Scene::GentleBlow => "Blow a bit",
            Scene::StrongBlow => "Blow a bit stronger",
            Scene::HoldUpright => "Hold the phone upright so the balls can sink again",
            Scene::FirstClap => "Clap in your hands",
            Scene::GrowBlow => "Blow a bit",
            Scene::DoubleClap => "Clap twice",
            Scene::TripleClap => "Clap three times",
            Scene::ClapAgain => "Clap again",
            Scene::Applause => "Applause",
            Scene::MoreApplause => "More applause",
            Scene::PressWhite => "Oh no. Too much. Press the white ball",
            Scene::StartOver => "Congratulations! Press the yellow ball to start over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_numbering_round_trip() {
        for (i, &scene) in Scene::ALL.iter().enumerate() {
            let n = i as u8 + 1;
            assert_eq!(scene.number(), n);
            assert_eq!(Scene::from_number(n), Some(scene));
        }
        assert_eq!(Scene::from_number(0), None);
        assert_eq!(Scene::from_number(29), None);
    }

    #[test]
    fn test_scene_order_is_scripted_order() {
        assert_eq!(Scene::FirstTap.next(), Some(Scene::SecondTap));
        assert_eq!(Scene::MoreApplause.next(), Some(Scene::PressWhite));
        assert_eq!(Scene::StartOver.next(), None);
    }

    #[test]
    fn test_every_scene_has_an_instruction() {
        for scene in Scene::ALL {
            assert!(!scene.instruction().is_empty());
        }
    }

    #[test]
    fn test_growth_factors_escalate() {
        let factors: Vec<f32> = (20..=26)
            .map(|n| Scene::from_number(n).unwrap().growth_factor().unwrap())
            .collect();
        assert_eq!(factors, vec![1.5, 2.0, 2.0, 2.5, 2.5, 3.0, 3.0]);
        assert!(Scene::HoldUpright.growth_factor().is_none());
        assert!(Scene::PressWhite.growth_factor().is_none());
    }

    #[test]
    fn test_press_colors_cycle() {
        assert_eq!(Scene::PressYellow.press_color(), Some(BallColor::Yellow));
        assert_eq!(Scene::PressRed.press_color(), Some(BallColor::Red));
        assert_eq!(Scene::PressBlue.press_color(), Some(BallColor::Blue));
        assert_eq!(Scene::FirstTap.press_color(), None);
    }
}
