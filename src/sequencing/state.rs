/*
Looper State Machine
====================

A stateful sequencer is driven once per frame with two gate inputs,
`recording` and `playing`. Edges on those gates (not their levels) decide
when a take starts and when playback restarts, so the machine has to know
where it was on the previous frame. That is the whole state:

    ┌──────┐  recording   ┌───────────┐
    │ Idle │ ───────────→ │ Recording │ ←─────────────┐
    └──────┘              └───────────┘               │
      ↑  │                      │                     │
      │  │ playing              │ !recording          │ recording
      │  ↓                      │ && auto_start       │
      │ ┌─────────┐             │                     │
      └─│ Playing │ ←───────────┘                     │
 !playing└─────────┘ ─────────────────────────────────┘

Recording wins when both gates are high, and entering Recording forces the
playing gate low. Entering a state from a different one is a rising edge:
Recording restarts the take, Playing restarts playback.
*/

/// Where the looper was on the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    #[default]
    Idle,
    Recording,
    Playing,
}

/// Gate levels for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inputs {
    pub recording: bool,
    pub playing: bool,
    pub auto_start: bool,
}

/// What the frame should do with its input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Return the input untouched.
    PassThrough,
    /// Record the input; `start` begins a new take.
    Record { start: bool },
    /// Return the loop's value; `start` marks a playback restart.
    Play { start: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: SequencerState,
    pub action: Action,
}

impl SequencerState {
    /// Advance one frame. Pure: same state and inputs, same step.
    pub fn step(self, inputs: Inputs) -> Step {
        if inputs.recording {
            return Step {
                next: SequencerState::Recording,
                action: Action::Record {
                    start: self != SequencerState::Recording,
                },
            };
        }

        let auto_started = self == SequencerState::Recording && inputs.auto_start;
        if inputs.playing || auto_started {
            return Step {
                next: SequencerState::Playing,
                action: Action::Play {
                    start: self != SequencerState::Playing,
                },
            };
        }

        Step {
            next: SequencerState::Idle,
            action: Action::PassThrough,
        }
    }

    pub fn is_recording(self) -> bool {
        self == SequencerState::Recording
    }

    pub fn is_playing(self) -> bool {
        self == SequencerState::Playing
    }
}
