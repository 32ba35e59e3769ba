use tracing::debug;

use crate::{
    config::PlaybackSettings,
    sequencing::{
        looper::Sequencer,
        state::{Action, Inputs, SequencerState},
    },
};

/// A [`Sequencer`] driven by record/play gates, once per frame.
///
/// Set the gates, then call [`StatefulSequencer::update`] every frame with
/// the live value. While idle or recording the live value comes straight
/// back; while playing the loop's value is returned instead.
pub struct StatefulSequencer<T> {
    sequencer: Sequencer<T>,
    state: SequencerState,
    recording: bool,
    playing: bool,
    settings: PlaybackSettings,
}

impl<T: Clone> StatefulSequencer<T> {
    pub fn new(sequencer: Sequencer<T>) -> Self {
        Self::with_settings(sequencer, PlaybackSettings::default())
    }

    pub fn with_settings(sequencer: Sequencer<T>, settings: PlaybackSettings) -> Self {
        Self {
            sequencer,
            state: SequencerState::Idle,
            recording: false,
            playing: false,
            settings,
        }
    }

    /// Advance one frame at absolute `time`.
    pub fn update(&mut self, input: T, time: f64) -> T {
        let step = self.state.step(Inputs {
            recording: self.recording,
            playing: self.playing,
            auto_start: self.settings.auto_start,
        });

        if step.next != self.state {
            debug!(from = ?self.state, to = ?step.next, time, "sequencer state changed");
        }
        self.state = step.next;
        self.playing = step.next.is_playing();

        match step.action {
            Action::PassThrough => input,
            Action::Record { start } => {
                self.sequencer
                    .record(input.clone(), time, start, self.settings.round_duration);
                input
            }
            Action::Play { start } => self.sequencer.play(
                time,
                self.settings.phase,
                start,
                self.settings.overlap,
                self.settings.ping_pong,
            ),
        }
    }

    /// Drop the recording and return to idle with both gates low.
    pub fn reset(&mut self) {
        self.sequencer.reset();
        self.state = SequencerState::Idle;
        self.recording = false;
        self.playing = false;
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Record gate as set by the caller.
    pub fn recording(&self) -> bool {
        self.recording
    }

    /// Play gate; also raised by auto-start and lowered by recording.
    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PlaybackSettings {
        &mut self.settings
    }

    pub fn sequencer(&self) -> &Sequencer<T> {
        &self.sequencer
    }

    pub fn duration(&self) -> f64 {
        self.sequencer.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::BlendRegistry;

    const FRAME: f64 = 0.25;

    fn looper() -> StatefulSequencer<f32> {
        let registry = BlendRegistry::with_defaults();
        StatefulSequencer::new(Sequencer::from_registry(8.0, 4, &registry).unwrap())
    }

    /// Run frames `from..to`, feeding the frame index as the live value.
    fn run(looper: &mut StatefulSequencer<f32>, from: u32, to: u32) -> Vec<f32> {
        (from..to)
            .map(|frame| looper.update(frame as f32, frame as f64 * FRAME))
            .collect()
    }

    #[test]
    fn idle_passes_input_through() {
        let mut looper = looper();
        assert_eq!(run(&mut looper, 0, 4), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(looper.state(), SequencerState::Idle);
    }

    #[test]
    fn records_then_auto_starts_playback() {
        let mut looper = looper();
        looper.settings_mut().auto_start = true;

        looper.set_recording(true);
        let recorded = run(&mut looper, 0, 9);
        assert_eq!(recorded, (0..9).map(|f| f as f32).collect::<Vec<_>>());
        assert_eq!(looper.duration(), 2.0);

        looper.set_recording(false);
        let played = run(&mut looper, 9, 17);
        assert!(looper.playing());
        assert_eq!(looper.state(), SequencerState::Playing);

        // loop of 2.0 time units = 8 frames, started at frame 0
        assert_eq!(played, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 0.0]);
    }

    #[test]
    fn stopping_without_auto_start_goes_idle() {
        let mut looper = looper();
        looper.set_recording(true);
        run(&mut looper, 0, 5);

        looper.set_recording(false);
        assert_eq!(run(&mut looper, 5, 7), vec![5.0, 6.0]);
        assert_eq!(looper.state(), SequencerState::Idle);

        looper.set_playing(true);
        assert_eq!(run(&mut looper, 7, 8), vec![3.0]);
    }

    #[test]
    fn recording_forces_playback_off() {
        let mut looper = looper();
        looper.set_playing(true);
        looper.set_recording(true);
        run(&mut looper, 0, 2);
        assert!(!looper.playing());
        assert_eq!(looper.state(), SequencerState::Recording);
    }

    #[test]
    fn new_take_replaces_old_one() {
        let mut looper = looper();
        looper.set_recording(true);
        run(&mut looper, 0, 9);
        looper.set_recording(false);
        run(&mut looper, 9, 10);

        looper.set_recording(true);
        run(&mut looper, 20, 25);
        assert_eq!(looper.duration(), 1.0);
        assert_eq!(looper.sequencer().record_started_at(), 5.0);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut looper = looper();
        looper.settings_mut().auto_start = true;
        looper.set_recording(true);
        run(&mut looper, 0, 4);
        looper.set_recording(false);
        run(&mut looper, 4, 5);

        looper.reset();
        assert_eq!(looper.state(), SequencerState::Idle);
        assert!(!looper.recording() && !looper.playing());
        assert!(looper.sequencer().is_empty());
        assert_eq!(run(&mut looper, 5, 6), vec![5.0]);
    }
}
