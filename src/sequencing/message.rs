#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control changes for a sequencer running on another thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SequencerMessage {
    StartRecording,
    StopRecording,
    StartPlayback,
    StopPlayback,
    SetPhase(f64),
    SetOverlap(f64),
    SetPingPong(bool),
    SetAutoStart(bool),
    Reset,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SequencerMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SequencerMessage> {
    fn pop(&mut self) -> Option<SequencerMessage> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for std::collections::VecDeque<SequencerMessage> {
    fn pop(&mut self) -> Option<SequencerMessage> {
        self.pop_front()
    }
}
