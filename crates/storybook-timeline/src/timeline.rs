//! Trigger table and transport state machine.

use storybook_core::audio::AudioPlayer;
use storybook_core::error::StoryError;
use storybook_core::timecode::{TimeRange, Timecode};

/// Transport state. Interval playback transitions to `Stopped` on its own
/// once the position passes the window stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stopped,
    Playing,
    Paused,
}

/// Whether an action still fires when the tick that delivers it has already
/// overshot the playback window's stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirePolicy {
    /// Fire whenever the timestamp is traversed.
    Always,
    /// Skip if the new position has already passed the window stop. Used for
    /// word-enter highlights, whose matching exit may lie outside the window
    /// and would otherwise never revert them.
    OnlyBeforeStop,
}

#[derive(Debug)]
struct TriggerEntry<A> {
    at: Timecode,
    policy: FirePolicy,
    action: A,
}

/// Interval bounds for the current playback. `None` means unbounded on that
/// side.
#[derive(Debug, Clone, Copy, Default)]
struct PlaybackWindow {
    start: Option<Timecode>,
    stop: Option<Timecode>,
}

/// The audio-timeline scheduler.
///
/// Registered actions fire exactly once per monotonic traversal of their
/// timestamp. A backward position jump is a scrub seek: nothing fires on the
/// jump tick, and the re-entered range re-fires on the next forward
/// traversal. Trailing actions whose timestamps lie past the end of the clip
/// fire when the player reports natural completion.
pub struct AudioTimeline<A> {
    player: Box<dyn AudioPlayer>,
    /// Sorted by timestamp; entries sharing a timestamp keep registration
    /// order.
    entries: Vec<TriggerEntry<A>>,
    /// Exclusive lower bound of the next traversal. `None` sits below every
    /// real timestamp so a fresh play fires from the beginning.
    last_position: Option<Timecode>,
    window: PlaybackWindow,
    transport: Transport,
}

impl<A> AudioTimeline<A> {
    #[must_use]
    pub fn new(player: Box<dyn AudioPlayer>) -> Self {
        Self {
            player,
            entries: Vec::new(),
            last_position: None,
            window: PlaybackWindow::default(),
            transport: Transport::Stopped,
        }
    }

    /// Loads the narration clip for the current page.
    ///
    /// # Errors
    ///
    /// Propagates [`StoryError::AssetMissing`] from the player.
    pub fn load_clip(&mut self, asset: &str) -> Result<(), StoryError> {
        self.player.load(asset)
    }

    /// Registers `action` to fire when playback crosses `at`. Actions
    /// accumulate: registering at an occupied timestamp appends after the
    /// existing entries rather than overwriting them.
    pub fn register(&mut self, at: Timecode, policy: FirePolicy, action: A) {
        let index = self.entries.partition_point(|entry| entry.at <= at);
        self.entries.insert(index, TriggerEntry { at, policy, action });
    }

    /// Empties the trigger table and resets transport, position, and window.
    /// Called on every page teardown; safe mid-playback.
    pub fn clear_and_reset(&mut self) {
        self.entries.clear();
        self.halt();
    }

    /// Starts unbounded playback from the beginning of the clip.
    pub fn play_full(&mut self) {
        self.player.seek_to(Timecode::ZERO);
        self.player.play();
        self.last_position = None;
        self.window = PlaybackWindow::default();
        self.transport = Transport::Playing;
    }

    /// Replays exactly `range`: stops current playback, seeks to the range
    /// start, and plays until the position passes the range end. Actions at
    /// or before the start do not refire; actions up to and including the end
    /// do.
    pub fn play_interval(&mut self, range: TimeRange) {
        self.player.stop();
        self.player.seek_to(range.start);
        self.player.play();
        self.last_position = Some(range.start);
        self.window = PlaybackWindow {
            start: Some(range.start),
            stop: Some(range.end),
        };
        self.transport = Transport::Playing;
    }

    pub fn pause(&mut self) {
        if self.transport == Transport::Playing {
            self.player.pause();
            self.transport = Transport::Paused;
        }
    }

    /// Resumes paused playback; from `Stopped`, starts a fresh full play.
    pub fn resume(&mut self) {
        match self.transport {
            Transport::Paused => {
                self.player.play();
                self.transport = Transport::Playing;
            }
            Transport::Stopped => self.play_full(),
            Transport::Playing => {}
        }
    }

    /// Stops playback and drops the traversal cursor below every timestamp,
    /// so the next play re-fires from the beginning.
    pub fn stop(&mut self) {
        self.halt();
    }

    pub fn toggle(&mut self) {
        if self.transport == Transport::Playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    #[must_use]
    pub fn transport(&self) -> Transport {
        self.transport
    }

    #[must_use]
    pub fn position(&self) -> Timecode {
        self.player.position()
    }

    #[must_use]
    pub fn trigger_count(&self) -> usize {
        self.entries.len()
    }

    fn halt(&mut self) {
        self.player.stop();
        self.last_position = None;
        self.window = PlaybackWindow::default();
        self.transport = Transport::Stopped;
    }
}

impl<A: Clone> AudioTimeline<A> {
    /// Samples the player position and returns every action due in the newly
    /// traversed range, in ascending timestamp order and registration order
    /// within a timestamp. Call once per tick.
    ///
    /// The traversed range is `(lower, min(upper, stop)]` with
    /// `lower = max(last_position, window_start)`. Three discontinuities are
    /// handled:
    ///
    /// - backward jump: a scrub seek — nothing fires, the cursor drops to the
    ///   new position;
    /// - natural clip end (unbounded play, player no longer playing): every
    ///   remaining action fires, so trailing timestamps past the clip length
    ///   are not lost;
    /// - interval stop overshoot: actions inside the window fire (minus
    ///   [`FirePolicy::OnlyBeforeStop`] entries), then the transport stops.
    pub fn advance(&mut self) -> Vec<A> {
        if self.transport != Transport::Playing {
            return Vec::new();
        }

        let position = self.player.position();
        let clip_ended = self.window.stop.is_none() && !self.player.is_playing();

        if !clip_ended {
            if let Some(last) = self.last_position {
                if position < last {
                    self.last_position = Some(position);
                    return Vec::new();
                }
            }
        }

        let lower = match (self.last_position, self.window.start) {
            (Some(last), Some(start)) => Some(last.max(start)),
            (Some(last), None) => Some(last),
            (None, start) => start,
        };
        let cap = if clip_ended {
            None
        } else {
            match self.window.stop {
                Some(stop) => Some(position.min(stop)),
                None => Some(position),
            }
        };
        let past_stop = self.window.stop.is_some_and(|stop| position > stop);

        let start_index = match lower {
            Some(lower) => self.entries.partition_point(|entry| entry.at <= lower),
            None => 0,
        };

        let mut fired = Vec::new();
        for entry in &self.entries[start_index..] {
            if cap.is_some_and(|cap| entry.at > cap) {
                break;
            }
            if past_stop && entry.policy == FirePolicy::OnlyBeforeStop {
                continue;
            }
            fired.push(entry.action.clone());
        }

        self.last_position = Some(position);

        if past_stop {
            tracing::debug!(%position, "interval playback passed its stop");
            self.halt();
        } else if clip_ended {
            tracing::debug!("narration clip finished");
            self.halt();
        }

        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storybook_test_support::{AudioCall, ScriptedAudioPlayer};

    fn timeline_with_triggers() -> (AudioTimeline<&'static str>, storybook_test_support::AudioControl)
    {
        let (player, control) = ScriptedAudioPlayer::new();
        let mut timeline = AudioTimeline::new(Box::new(player));
        timeline.register(Timecode::from_millis(500), FirePolicy::Always, "a");
        timeline.register(Timecode::from_millis(1000), FirePolicy::Always, "b");
        timeline.register(Timecode::from_millis(1500), FirePolicy::Always, "c");
        (timeline, control)
    }

    #[test]
    fn test_advance_fires_due_actions_in_timestamp_order() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();

        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), vec!["a", "b"]);
    }

    #[test]
    fn test_actions_fire_exactly_once_during_monotonic_playback() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();

        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), vec!["a", "b"]);
        assert_eq!(timeline.advance(), Vec::<&str>::new());

        control.set_position(Timecode::from_millis(1250));
        assert_eq!(timeline.advance(), Vec::<&str>::new());
    }

    #[test]
    fn test_backward_jump_then_forward_refires_reentered_range() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();

        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), vec!["a", "b"]);

        // Scrub backward: nothing fires on the jump tick.
        control.set_position(Timecode::from_millis(800));
        assert_eq!(timeline.advance(), Vec::<&str>::new());

        // Forward again: the re-entered range re-fires.
        control.set_position(Timecode::from_millis(2000));
        assert_eq!(timeline.advance(), vec!["b", "c"]);
    }

    #[test]
    fn test_shared_timestamp_accumulates_in_registration_order() {
        let (player, control) = ScriptedAudioPlayer::new();
        let mut timeline = AudioTimeline::new(Box::new(player));
        timeline.register(Timecode::from_millis(700), FirePolicy::Always, "first");
        timeline.register(Timecode::from_millis(700), FirePolicy::Always, "second");
        timeline.register(Timecode::from_millis(700), FirePolicy::Always, "third");
        timeline.play_full();

        control.set_position(Timecode::from_millis(700));
        assert_eq!(timeline.advance(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_trigger_at_exactly_zero_fires_on_fresh_play() {
        let (player, control) = ScriptedAudioPlayer::new();
        let mut timeline = AudioTimeline::new(Box::new(player));
        timeline.register(Timecode::ZERO, FirePolicy::Always, "opening");
        timeline.play_full();

        control.set_position(Timecode::from_millis(10));
        assert_eq!(timeline.advance(), vec!["opening"]);
    }

    #[test]
    fn test_interval_does_not_refire_at_or_before_start() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_interval(TimeRange::new(
            Timecode::from_millis(500),
            Timecode::from_millis(1500),
        ));

        control.set_position(Timecode::from_millis(1200));
        // 500 is at the interval start: excluded. 1000 is inside: fires.
        assert_eq!(timeline.advance(), vec!["b"]);
    }

    #[test]
    fn test_interval_fires_action_at_exactly_its_stop() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_interval(TimeRange::new(
            Timecode::from_millis(500),
            Timecode::from_millis(1500),
        ));

        control.set_position(Timecode::from_millis(1500));
        assert_eq!(timeline.advance(), vec!["b", "c"]);
        assert_eq!(timeline.transport(), Transport::Playing);
    }

    #[test]
    fn test_interval_overshoot_stops_and_skips_actions_past_stop() {
        let (player, control) = ScriptedAudioPlayer::new();
        let mut timeline = AudioTimeline::new(Box::new(player));
        timeline.register(Timecode::from_millis(3000), FirePolicy::Always, "inside");
        timeline.register(Timecode::from_millis(4500), FirePolicy::Always, "outside");
        timeline.play_interval(TimeRange::new(
            Timecode::from_millis(2000),
            Timecode::from_millis(4000),
        ));

        control.set_position(Timecode::from_millis(5000));
        assert_eq!(timeline.advance(), vec!["inside"]);
        assert_eq!(timeline.transport(), Transport::Stopped);
        assert!(control.calls().contains(&AudioCall::Stop));
    }

    #[test]
    fn test_only_before_stop_actions_skip_on_overshoot() {
        let (player, control) = ScriptedAudioPlayer::new();
        let mut timeline = AudioTimeline::new(Box::new(player));
        timeline.register(
            Timecode::from_millis(3900),
            FirePolicy::OnlyBeforeStop,
            "enter",
        );
        timeline.register(Timecode::from_millis(3950), FirePolicy::Always, "exit");
        timeline.play_interval(TimeRange::new(
            Timecode::from_millis(2000),
            Timecode::from_millis(4000),
        ));

        control.set_position(Timecode::from_millis(5000));
        // The enter would have no matching exit inside the window; only the
        // unconditional action fires.
        assert_eq!(timeline.advance(), vec!["exit"]);
    }

    #[test]
    fn test_only_before_stop_actions_fire_within_the_window() {
        let (player, control) = ScriptedAudioPlayer::new();
        let mut timeline = AudioTimeline::new(Box::new(player));
        timeline.register(
            Timecode::from_millis(3900),
            FirePolicy::OnlyBeforeStop,
            "enter",
        );
        timeline.play_interval(TimeRange::new(
            Timecode::from_millis(2000),
            Timecode::from_millis(4000),
        ));

        control.set_position(Timecode::from_millis(4000));
        assert_eq!(timeline.advance(), vec!["enter"]);
    }

    #[test]
    fn test_natural_clip_end_fires_trailing_actions() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();

        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), vec!["a", "b"]);

        // The player finished on its own and rewound; the trailing trigger
        // past the traversed range still fires.
        control.set_position(Timecode::ZERO);
        control.set_playing(false);
        assert_eq!(timeline.advance(), vec!["c"]);
        assert_eq!(timeline.transport(), Transport::Stopped);
    }

    #[test]
    fn test_stop_then_replay_fires_from_the_beginning() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();

        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), vec!["a", "b"]);

        timeline.stop();
        assert_eq!(timeline.transport(), Transport::Stopped);

        timeline.play_full();
        control.set_position(Timecode::from_millis(600));
        assert_eq!(timeline.advance(), vec!["a"]);
    }

    #[test]
    fn test_pause_suppresses_firing_and_resume_continues() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();

        control.set_position(Timecode::from_millis(600));
        assert_eq!(timeline.advance(), vec!["a"]);

        timeline.pause();
        assert_eq!(timeline.transport(), Transport::Paused);
        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), Vec::<&str>::new());

        timeline.resume();
        assert_eq!(timeline.advance(), vec!["b"]);
    }

    #[test]
    fn test_toggle_pauses_playing_and_resumes_paused() {
        let (mut timeline, _control) = timeline_with_triggers();
        timeline.play_full();

        timeline.toggle();
        assert_eq!(timeline.transport(), Transport::Paused);

        timeline.toggle();
        assert_eq!(timeline.transport(), Transport::Playing);
    }

    #[test]
    fn test_toggle_from_stopped_starts_playback() {
        let (mut timeline, _control) = timeline_with_triggers();
        timeline.toggle();
        assert_eq!(timeline.transport(), Transport::Playing);
    }

    #[test]
    fn test_clear_and_reset_empties_table_and_stops_player() {
        let (mut timeline, control) = timeline_with_triggers();
        timeline.play_full();
        control.set_position(Timecode::from_millis(600));
        timeline.advance();

        timeline.clear_and_reset();
        assert_eq!(timeline.trigger_count(), 0);
        assert_eq!(timeline.transport(), Transport::Stopped);
        assert!(control.calls().contains(&AudioCall::Stop));

        // Safe to call again on an already-clean timeline.
        timeline.clear_and_reset();
        assert_eq!(timeline.trigger_count(), 0);
    }

    #[test]
    fn test_advance_when_stopped_fires_nothing() {
        let (mut timeline, control) = timeline_with_triggers();
        control.set_position(Timecode::from_millis(1200));
        assert_eq!(timeline.advance(), Vec::<&str>::new());
    }
}
