#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};
#[cfg(feature = "rtrb")]
use tracing::trace;

use crate::sequencing::{
    message::{MessageReceiver, SequencerMessage},
    stateful::StatefulSequencer,
};

pub const SEQUENCER_QUEUE_SIZE: usize = 64;

/// A [`StatefulSequencer`] whose gates and settings are changed through a
/// message queue, so a UI or control thread can drive the frame loop.
pub struct SharedSequencer<T, R: MessageReceiver> {
    sequencer: StatefulSequencer<T>,
    rx: R,
}

impl<T: Clone, R: MessageReceiver> SharedSequencer<T, R> {
    pub fn with_receiver(sequencer: StatefulSequencer<T>, rx: R) -> Self {
        Self { sequencer, rx }
    }

    /// Apply pending messages, then advance one frame.
    pub fn update(&mut self, input: T, time: f64) -> T {
        while let Some(msg) = self.rx.pop() {
            self.apply(msg);
        }

        self.sequencer.update(input, time)
    }

    pub fn sequencer(&self) -> &StatefulSequencer<T> {
        &self.sequencer
    }

    pub fn into_inner(self) -> StatefulSequencer<T> {
        self.sequencer
    }

    fn apply(&mut self, msg: SequencerMessage) {
        let seq = &mut self.sequencer;
        match msg {
            SequencerMessage::StartRecording => seq.set_recording(true),
            SequencerMessage::StopRecording => seq.set_recording(false),
            SequencerMessage::StartPlayback => seq.set_playing(true),
            SequencerMessage::StopPlayback => seq.set_playing(false),
            SequencerMessage::SetPhase(phase) => seq.settings_mut().phase = phase,
            SequencerMessage::SetOverlap(overlap) => seq.settings_mut().overlap = overlap,
            SequencerMessage::SetPingPong(on) => seq.settings_mut().ping_pong = on,
            SequencerMessage::SetAutoStart(on) => seq.settings_mut().auto_start = on,
            SequencerMessage::Reset => seq.reset(),
        }
    }
}

#[cfg(feature = "rtrb")]
impl<T: Clone> SharedSequencer<T, Consumer<SequencerMessage>> {
    /// Split into the frame-loop side and a handle for the control thread.
    pub fn new(sequencer: StatefulSequencer<T>, queue_size: usize) -> (Self, SequencerHandle) {
        let (tx, rx) = RingBuffer::<SequencerMessage>::new(queue_size);
        (Self::with_receiver(sequencer, rx), SequencerHandle { tx })
    }
}

/// Control-thread side of a [`SharedSequencer`].
#[cfg(feature = "rtrb")]
pub struct SequencerHandle {
    tx: Producer<SequencerMessage>,
}

#[cfg(feature = "rtrb")]
impl SequencerHandle {
    /// Queue `msg`. Returns false if the queue is full and it was dropped.
    pub fn send(&mut self, msg: SequencerMessage) -> bool {
        match self.tx.push(msg) {
            Ok(()) => true,
            Err(_) => {
                trace!(?msg, "sequencer queue full, message dropped");
                false
            }
        }
    }

    pub fn start_recording(&mut self) -> bool {
        self.send(SequencerMessage::StartRecording)
    }

    pub fn stop_recording(&mut self) -> bool {
        self.send(SequencerMessage::StopRecording)
    }

    pub fn start_playback(&mut self) -> bool {
        self.send(SequencerMessage::StartPlayback)
    }

    pub fn stop_playback(&mut self) -> bool {
        self.send(SequencerMessage::StopPlayback)
    }

    pub fn reset(&mut self) -> bool {
        self.send(SequencerMessage::Reset)
    }
}
