pub mod looper;
pub mod message;
pub mod shared;
pub mod state;
pub mod stateful;

pub use looper::Sequencer;
pub use message::{MessageReceiver, SequencerMessage};
#[cfg(feature = "rtrb")]
pub use shared::SequencerHandle;
pub use shared::{SharedSequencer, SEQUENCER_QUEUE_SIZE};
pub use state::{Action, Inputs, SequencerState, Step};
pub use stateful::StatefulSequencer;
