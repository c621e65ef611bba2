//! Input sampling
//!
//! Browser events arrive between ticks; the sampler folds them into a
//! `TickInput` once per tick. Movement is level-triggered (held means move
//! every tick). Fire, pause, start and restart are edge-triggered latches:
//! one press yields exactly one command no matter how long it is held or how
//! many key-repeat events the browser sends.

use crate::sim::TickInput;

/// A game action bound to keys or on-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    Start,
    Restart,
    Autopilot,
}

impl Action {
    /// Map a `KeyboardEvent.code` to an action
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Action::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Action::MoveRight),
            "Space" | "ArrowUp" | "KeyW" => Some(Action::Fire),
            "Escape" | "KeyP" => Some(Action::Pause),
            "Enter" => Some(Action::Start),
            "KeyR" => Some(Action::Restart),
            "KeyI" => Some(Action::Autopilot),
            _ => None,
        }
    }
}

/// Where a press came from. Each source tracks its own held state so lifting
/// a finger off a touch button does not cancel a key that is still down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Keyboard,
    Pointer,
}

#[derive(Debug, Clone, Copy, Default)]
struct Held {
    keyboard: bool,
    pointer: bool,
}

impl Held {
    fn any(&self) -> bool {
        self.keyboard || self.pointer
    }

    fn set(&mut self, source: Source, down: bool) {
        match source {
            Source::Keyboard => self.keyboard = down,
            Source::Pointer => self.pointer = down,
        }
    }
}

/// Accumulates input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    left: Held,
    right: Held,
    fire: Held,
    fire_latched: bool,
    move_engaged: bool,
    pause_latched: bool,
    suspend_latched: bool,
    start_latched: bool,
    restart_latched: bool,
    autopilot: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns true if the action went from released to held.
    pub fn press(&mut self, action: Action, source: Source) -> bool {
        match action {
            Action::MoveLeft => {
                let engaged = Self::engage(&mut self.left, source);
                self.move_engaged |= engaged;
                engaged
            }
            Action::MoveRight => {
                let engaged = Self::engage(&mut self.right, source);
                self.move_engaged |= engaged;
                engaged
            }
            Action::Fire => {
                let engaged = Self::engage(&mut self.fire, source);
                self.fire_latched |= engaged;
                engaged
            }
            Action::Pause => {
                self.pause_latched = true;
                true
            }
            Action::Start => {
                self.start_latched = true;
                true
            }
            Action::Restart => {
                self.restart_latched = true;
                true
            }
            Action::Autopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
                true
            }
        }
    }

    /// Record a release
    pub fn release(&mut self, action: Action, source: Source) {
        match action {
            Action::MoveLeft => self.left.set(source, false),
            Action::MoveRight => self.right.set(source, false),
            Action::Fire => self.fire.set(source, false),
            Action::Pause | Action::Start | Action::Restart | Action::Autopilot => {}
        }
    }

    /// Drop every held input (focus lost). Pending one-shot latches survive.
    pub fn release_all(&mut self) {
        self.left = Held::default();
        self.right = Held::default();
        self.fire = Held::default();
    }

    /// Request a pause that cannot cancel out a pending pause toggle
    pub fn suspend(&mut self) {
        self.suspend_latched = true;
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Whether any movement is currently held
    pub fn is_moving(&self) -> bool {
        self.left.any() || self.right.any()
    }

    /// Produce the command for the next tick and clear the one-shot latches
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.left.any(),
            move_right: self.right.any(),
            move_engaged: self.move_engaged,
            fire: self.fire_latched,
            pause: self.pause_latched,
            suspend: self.suspend_latched,
            start: self.start_latched,
            restart: self.restart_latched,
            autopilot: self.autopilot,
        };
        self.move_engaged = false;
        self.fire_latched = false;
        self.pause_latched = false;
        self.suspend_latched = false;
        self.start_latched = false;
        self.restart_latched = false;
        input
    }

    fn engage(held: &mut Held, source: Source) -> bool {
        let was_held = held.any();
        held.set(source, true);
        !was_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Action::from_key_code("ArrowLeft"), Some(Action::MoveLeft));
        assert_eq!(Action::from_key_code("KeyD"), Some(Action::MoveRight));
        assert_eq!(Action::from_key_code("Space"), Some(Action::Fire));
        assert_eq!(Action::from_key_code("Escape"), Some(Action::Pause));
        assert_eq!(Action::from_key_code("Enter"), Some(Action::Start));
        assert_eq!(Action::from_key_code("KeyR"), Some(Action::Restart));
        assert_eq!(Action::from_key_code("KeyZ"), None);
    }

    #[test]
    fn test_movement_is_level_triggered() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::MoveLeft, Source::Keyboard);
        for _ in 0..5 {
            assert!(sampler.sample().move_left);
        }
        sampler.release(Action::MoveLeft, Source::Keyboard);
        assert!(!sampler.sample().move_left);
    }

    #[test]
    fn test_held_fire_shoots_once() {
        let mut sampler = InputSampler::new();
        assert!(sampler.press(Action::Fire, Source::Keyboard));
        // Key repeat while held
        assert!(!sampler.press(Action::Fire, Source::Keyboard));
        assert!(sampler.sample().fire);
        assert!(!sampler.press(Action::Fire, Source::Keyboard));
        assert!(!sampler.sample().fire);
        assert!(!sampler.sample().fire);

        sampler.release(Action::Fire, Source::Keyboard);
        sampler.press(Action::Fire, Source::Keyboard);
        assert!(sampler.sample().fire);
    }

    #[test]
    fn test_tap_between_ticks_still_fires() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::Fire, Source::Pointer);
        sampler.release(Action::Fire, Source::Pointer);
        assert!(sampler.sample().fire);
        assert!(!sampler.sample().fire);
    }

    #[test]
    fn test_sources_are_independent() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::MoveRight, Source::Keyboard);
        sampler.press(Action::MoveRight, Source::Pointer);
        sampler.release(Action::MoveRight, Source::Pointer);
        assert!(sampler.sample().move_right);
        sampler.release(Action::MoveRight, Source::Keyboard);
        assert!(!sampler.sample().move_right);
    }

    #[test]
    fn test_move_engaged_on_transition_only() {
        let mut sampler = InputSampler::new();
        assert!(sampler.press(Action::MoveLeft, Source::Keyboard));
        assert!(sampler.sample().move_engaged);
        // Repeat events while held
        assert!(!sampler.press(Action::MoveLeft, Source::Keyboard));
        assert!(!sampler.sample().move_engaged);
        // Second source joining an existing hold is not a new engagement
        assert!(!sampler.press(Action::MoveLeft, Source::Pointer));
        assert!(!sampler.sample().move_engaged);
    }

    #[test]
    fn test_one_shot_latches_clear_after_sample() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::Pause, Source::Keyboard);
        sampler.press(Action::Start, Source::Pointer);
        sampler.press(Action::Restart, Source::Pointer);
        let input = sampler.sample();
        assert!(input.pause && input.start && input.restart);
        let input = sampler.sample();
        assert!(!input.pause && !input.start && !input.restart);
    }

    #[test]
    fn test_release_all_keeps_latches() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::MoveLeft, Source::Keyboard);
        sampler.press(Action::Pause, Source::Keyboard);
        sampler.release_all();
        assert!(!sampler.is_moving());
        let input = sampler.sample();
        assert!(!input.move_left);
        assert!(input.pause);
    }

    #[test]
    fn test_suspend_is_separate_from_pause_toggle() {
        let mut sampler = InputSampler::new();
        sampler.suspend();
        sampler.press(Action::Pause, Source::Keyboard);
        let input = sampler.sample();
        assert!(input.suspend);
        assert!(input.pause);
        assert!(!sampler.sample().suspend);
    }

    #[test]
    fn test_autopilot_toggles() {
        let mut sampler = InputSampler::new();
        sampler.press(Action::Autopilot, Source::Keyboard);
        assert!(sampler.autopilot());
        assert!(sampler.sample().autopilot);
        sampler.press(Action::Autopilot, Source::Keyboard);
        assert!(!sampler.sample().autopilot);
    }
}
