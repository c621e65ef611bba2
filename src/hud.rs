//! HUD overlay
//!
//! `HudView` is a pure projection of the game state into what the DOM
//! overlay should show. On wasm32, `Hud` writes it into the page.

use crate::sim::{GamePhase, GameState, session};

/// Everything the overlay displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    /// Live score
    pub score: String,
    /// Final score (only after game over)
    pub final_score: Option<String>,
    /// Seconds left before play (only during the countdown)
    pub countdown: Option<String>,
    pub show_game_over: bool,
    pub show_pause_menu: bool,
    /// The play button is only offered before the first session
    pub show_play_button: bool,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        let over = state.phase == GamePhase::GameOver;
        let counting = state.phase == GamePhase::Countdown;
        Self {
            score: state.score.to_string(),
            final_score: over.then(|| state.score.to_string()),
            countdown: counting.then(|| session::countdown_seconds(state).to_string()),
            show_game_over: over,
            show_pause_menu: state.phase == GamePhase::Paused,
            show_play_button: state.phase == GamePhase::Idle,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use dom::Hud;

#[cfg(target_arch = "wasm32")]
mod dom {
    use super::HudView;
    use web_sys::Document;

    /// DOM-backed overlay. Elements that are missing from the page are skipped.
    pub struct Hud {
        document: Document,
        last: Option<HudView>,
    }

    impl Hud {
        pub fn new(document: Document) -> Self {
            Self {
                document,
                last: None,
            }
        }

        /// Push `view` into the page; does nothing if it has not changed
        pub fn apply(&mut self, view: HudView) {
            if self.last.as_ref() == Some(&view) {
                return;
            }

            self.set_text("score", &view.score);
            if let Some(ref text) = view.final_score {
                self.set_text("finalScore", text);
            }
            if let Some(ref text) = view.countdown {
                self.set_text("countdown", text);
            }
            self.set_visible("gameOver", view.show_game_over);
            self.set_visible("countdown", view.countdown.is_some());
            self.set_visible("pauseMenu", view.show_pause_menu);
            self.set_visible("playButton", view.show_play_button);

            self.last = Some(view);
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }
}
