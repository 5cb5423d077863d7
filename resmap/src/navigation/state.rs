//! Screen and step state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::selection::FeatureSelection;

/// Top-level planning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    HomeScreen,
    ResourceMapping,
    Groundwater,
    SurfaceWater,
    Agriculture,
    Livelihood,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::HomeScreen,
        Screen::ResourceMapping,
        Screen::Groundwater,
        Screen::SurfaceWater,
        Screen::Agriculture,
        Screen::Livelihood,
    ];

    /// Highest valid step on this screen.
    pub fn max_step(&self) -> u8 {
        match self {
            Screen::HomeScreen | Screen::Livelihood => 0,
            Screen::ResourceMapping
            | Screen::Groundwater
            | Screen::SurfaceWater
            | Screen::Agriculture => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Screen::HomeScreen => "HomeScreen",
            Screen::ResourceMapping => "Resource_mapping",
            Screen::Groundwater => "Groundwater",
            Screen::SurfaceWater => "SurfaceWater",
            Screen::Agriculture => "Agriculture",
            Screen::Livelihood => "Livelihood",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '_').collect::<String>().to_lowercase();
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| {
                screen.name().replace('_', "").to_lowercase() == wanted
                    || format!("{:?}", screen).to_lowercase() == wanted
            })
            .ok_or_else(|| NavigationError::UnknownScreen(s.to_string()))
    }
}

/// Navigation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("step {step} out of range for {screen} (max {max})")]
    StepOutOfRange { screen: Screen, step: u8, max: u8 },

    #[error("unknown screen '{0}'")]
    UnknownScreen(String),
}

/// A `(screen, step)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationState {
    pub screen: Screen,
    pub step: u8,
}

impl NavigationState {
    /// Validated constructor.
    pub fn new(screen: Screen, step: u8) -> Result<Self, NavigationError> {
        if step > screen.max_step() {
            return Err(NavigationError::StepOutOfRange {
                screen,
                step,
                max: screen.max_step(),
            });
        }
        Ok(Self { screen, step })
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            screen: Screen::HomeScreen,
            step: 0,
        }
    }
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.screen, self.step)
    }
}

/// Holds the current navigation state and the transient selection.
#[derive(Debug, Default)]
pub struct NavigationStateMachine {
    state: NavigationState,
    selection: Option<FeatureSelection>,
}

impl NavigationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn step(&self) -> u8 {
        self.state.step
    }

    /// Move to `screen` at step zero and drop the selection.
    ///
    /// Re-entering the current screen also resets the step.
    pub fn set_screen(&mut self, screen: Screen) -> NavigationState {
        self.state = NavigationState { screen, step: 0 };
        self.selection = None;
        self.state
    }

    /// Move to `step` within the current screen.
    pub fn set_step(&mut self, step: u8) -> Result<NavigationState, NavigationError> {
        self.state = NavigationState::new(self.state.screen, step)?;
        Ok(self.state)
    }

    /// Advance one step, if not already on the last one.
    pub fn next_step(&mut self) -> Option<NavigationState> {
        let next = self.state.step.checked_add(1)?;
        self.set_step(next).ok()
    }

    /// Go back one step, if not already on the first one.
    pub fn previous_step(&mut self) -> Option<NavigationState> {
        let previous = self.state.step.checked_sub(1)?;
        self.set_step(previous).ok()
    }

    pub fn selection(&self) -> Option<&FeatureSelection> {
        self.selection.as_ref()
    }

    pub fn select(&mut self, selection: FeatureSelection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}
