//! RLC unacknowledged-mode (UM) link layer.
//!
//! One [`RlcUmEntity`] exists per UE, logical channel and direction. The
//! transmit side segments queued upper-layer SDUs into MAC-sized PDUs; the
//! receive side maintains a sliding reordering window over 10-bit sequence
//! numbers and reassembles complete SDUs for in-order delivery upward.
//!
//! The entity is driven by an external discrete-event loop: every call takes
//! the current simulation time, outputs accumulate in internal queues drained
//! with the `take_*` methods, and timers fire from [`RlcUmEntity::advance_time`].

pub mod config;
pub mod header;
pub mod sap;
pub mod sequence_number;
pub mod um;

pub use config::RlcUmConfig;
pub use header::{FramingInfo, RlcCodecError, UmHeader};
pub use sap::{
    BufferStatusReport, ReceivePduParams, RlcEntity, TransmitPduParams, TxOpportunityParams,
};
pub use sequence_number::SequenceNumber10;
pub use um::RlcUmEntity;
