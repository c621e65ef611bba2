//! Audio cues
//!
//! The sim never talks to audio directly. The shell maps each drained
//! `GameEvent` to zero or more cues and hands them to a `CueSink`.

use crate::sim::GameEvent;

/// Named audio request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Player started moving
    Move,
    /// Bullet fired
    Shoot,
    /// Enemy destroyed
    Hit,
    GameOver,
    /// Start the background loop from the beginning
    MusicStart,
    MusicPause,
    MusicResume,
    MusicStop,
}

/// Something that can play cues. Playing never fails from the caller's side.
pub trait CueSink {
    fn play(&mut self, cue: Cue);

    /// Play every cue for one event
    fn play_event(&mut self, event: &GameEvent) {
        for &cue in cues_for(event) {
            self.play(cue);
        }
    }
}

/// Cues triggered by a sim event, in playback order
pub fn cues_for(event: &GameEvent) -> &'static [Cue] {
    match event {
        GameEvent::Started | GameEvent::Restarted => &[Cue::MusicStart],
        GameEvent::Paused => &[Cue::MusicPause],
        GameEvent::Resumed => &[Cue::MusicResume],
        GameEvent::Moved => &[Cue::Move],
        GameEvent::Shot => &[Cue::Shoot],
        GameEvent::EnemyDestroyed { .. } => &[Cue::Hit],
        GameEvent::GameOver { .. } => &[Cue::MusicStop, Cue::GameOver],
        GameEvent::CountdownTick { .. } | GameEvent::Running => &[],
    }
}

/// Sink that only logs (headless runs and native builds)
#[derive(Debug, Default)]
pub struct LogSink {
    played: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cues received so far
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl CueSink for LogSink {
    fn play(&mut self, cue: Cue) {
        self.played += 1;
        log::debug!("cue: {cue:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_game_over_stops_music_first() {
        assert_eq!(
            cues_for(&GameEvent::GameOver { score: 10 }),
            &[Cue::MusicStop, Cue::GameOver]
        );
    }

    #[test]
    fn test_restart_restarts_music() {
        assert_eq!(cues_for(&GameEvent::Restarted), &[Cue::MusicStart]);
        assert_eq!(cues_for(&GameEvent::Started), &[Cue::MusicStart]);
    }

    #[test]
    fn test_countdown_is_silent() {
        assert!(cues_for(&GameEvent::CountdownTick { remaining: 2 }).is_empty());
        assert!(cues_for(&GameEvent::Running).is_empty());
    }

    #[test]
    fn test_play_event_forwards_in_order() {
        let mut sink = Recorder::default();
        for event in [
            GameEvent::Shot,
            GameEvent::EnemyDestroyed {
                enemy_id: 1,
                bullet_id: 2,
            },
            GameEvent::Paused,
            GameEvent::Resumed,
        ] {
            sink.play_event(&event);
        }
        assert_eq!(
            sink.0,
            vec![Cue::Shoot, Cue::Hit, Cue::MusicPause, Cue::MusicResume]
        );
    }

    #[test]
    fn test_log_sink_counts() {
        let mut sink = LogSink::new();
        sink.play_event(&GameEvent::GameOver { score: 0 });
        assert_eq!(sink.played(), 2);
    }
}
