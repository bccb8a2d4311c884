//! Parameter types crossing the MAC and PDCP service boundaries.
//!
//! These mirror the fire-and-forget service-access-point calls between the
//! RLC entity and its neighbours: the MAC layer offers transmit
//! opportunities and delivers PDUs, the entity emits framed PDUs and
//! buffer-status reports in return. Outputs are queued inside the entity
//! and drained by the surrounding device model.

use bytes::Bytes;
use nrlink_common::{ComponentCarrierId, HarqProcessId, Lcid, Rnti, SimTime};

/// A transmit opportunity granted by the MAC scheduler.
#[derive(Debug, Clone, Copy)]
pub struct TxOpportunityParams {
    /// Bytes available for the whole PDU, header included.
    pub bytes: u32,
    /// MIMO transmission layer.
    pub layer: u8,
    pub harq_id: HarqProcessId,
    pub component_carrier_id: ComponentCarrierId,
}

/// A framed PDU handed down to the MAC layer.
#[derive(Debug, Clone)]
pub struct TransmitPduParams {
    pub pdu: Bytes,
    pub rnti: Rnti,
    pub lcid: Lcid,
    pub layer: u8,
    pub harq_process_id: HarqProcessId,
    pub component_carrier_id: ComponentCarrierId,
    /// Sender timestamp side channel, used for delay accounting on receipt.
    pub sent_at: SimTime,
}

/// A PDU arriving from the MAC layer.
#[derive(Debug, Clone)]
pub struct ReceivePduParams {
    pub pdu: Bytes,
    /// Sender timestamp side channel carried alongside the PDU.
    pub sent_at: SimTime,
}

/// The service boundary an RLC entity offers its neighbours, independent
/// of mode. The device model owning the entity drives the calls and
/// drains the output queues; neither the MAC nor the PDCP side owns the
/// entity.
pub trait RlcEntity {
    /// PDCP hands down an SDU for transmission.
    fn submit_sdu(&mut self, now: SimTime, sdu: Bytes);
    /// MAC grants a transmit opportunity.
    fn on_tx_opportunity(&mut self, now: SimTime, params: TxOpportunityParams);
    /// MAC reports a HARQ delivery failure.
    fn on_harq_delivery_failure(&self);
    /// MAC delivers a received PDU.
    fn on_pdu_received(&mut self, now: SimTime, params: ReceivePduParams);
    /// Fires any timer whose deadline has passed.
    fn advance_time(&mut self, now: SimTime);
    /// Drains PDUs framed for the MAC layer.
    fn take_transmitted_pdus(&mut self) -> Vec<TransmitPduParams>;
    /// Drains buffer-status reports for the MAC scheduler.
    fn take_buffer_status_reports(&mut self) -> Vec<BufferStatusReport>;
    /// Drains SDUs reassembled for the upper layer.
    fn take_delivered_sdus(&mut self) -> Vec<Bytes>;
}

/// Buffer status reported to the MAC scheduler.
///
/// UM has no retransmission or status PDUs, so those fields are always
/// zero; they are kept so the report matches what the scheduler consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferStatusReport {
    pub rnti: Rnti,
    pub lcid: Lcid,
    /// Queued data bytes plus an estimated 2-byte header per queued SDU.
    pub tx_queue_size: u32,
    /// Head-of-line delay of the oldest queued SDU, in milliseconds.
    pub tx_queue_hol_delay_ms: u64,
    pub retx_queue_size: u32,
    pub retx_queue_hol_delay_ms: u64,
    pub status_pdu_size: u32,
    /// True when the report was triggered by the periodic report timer.
    pub exp_bsr_timer: bool,
}
