//! The UM entity: transmit segmentation, receive reordering and reassembly.
//!
//! Receive-side state variables follow 3GPP TS 36.322 §7.1: VR(UR) is the
//! lower edge of delivered SNs, VR(UH) the highest received SN plus one,
//! VR(UX) the SN that triggered the running reordering timer. A SN is
//! inside the reordering window when `VR(UH) - windowSize <= SN < VR(UH)`,
//! with all comparisons anchored to `VR(UH) - windowSize`.

use std::collections::{BTreeMap, VecDeque};

use bytes::{Bytes, BytesMut};
use nrlink_common::{Lcid, Rnti, SimTime, SimTimer};
use tracing::{debug, info, trace, warn};

use crate::config::RlcUmConfig;
use crate::header::{FramingInfo, UmHeader, FIXED_HEADER_SIZE, MAX_LENGTH_INDICATOR};
use crate::sap::{
    BufferStatusReport, ReceivePduParams, RlcEntity, TransmitPduParams, TxOpportunityParams,
};
use crate::sequence_number::SequenceNumber10;

/// Period of the buffer-status-report timer while data is queued.
const BSR_PERIOD_MS: u64 = 10;

/// Segmentation status of a queued SDU or of a data-field fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SduStatus {
    FullSdu,
    FirstSegment,
    MiddleSegment,
    LastSegment,
}

/// Receiver reassembly state: either no partial SDU is held, or the first
/// part of a split SDU is held awaiting its continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReassemblingState {
    WaitingS0Full,
    WaitingSiSf,
}

#[derive(Debug)]
struct TxSdu {
    payload: Bytes,
    status: SduStatus,
    waiting_since: SimTime,
}

/// One unacknowledged-mode RLC entity.
#[derive(Debug)]
pub struct RlcUmEntity {
    rnti: Rnti,
    lcid: Lcid,
    config: RlcUmConfig,

    // Transmit side
    tx_buffer: VecDeque<TxSdu>,
    tx_buffer_size: usize,
    vt_us: SequenceNumber10,
    bsr_timer: SimTimer,
    exp_bsr_timer: bool,

    // Receive side
    rx_buffer: BTreeMap<u16, Bytes>,
    vr_ur: SequenceNumber10,
    vr_ux: SequenceNumber10,
    vr_uh: SequenceNumber10,
    reordering_timer: SimTimer,
    reassembling_state: ReassemblingState,
    keep_s0: Option<BytesMut>,
    expected_seq_number: SequenceNumber10,

    // Output queues drained by the surrounding device model
    tx_pdus: Vec<TransmitPduParams>,
    bsr_reports: Vec<BufferStatusReport>,
    delivered_sdus: Vec<Bytes>,
    dropped_sdus: Vec<Bytes>,
}

impl RlcUmEntity {
    pub fn new(rnti: Rnti, lcid: Lcid, config: RlcUmConfig) -> Self {
        Self {
            rnti,
            lcid,
            config,
            tx_buffer: VecDeque::new(),
            tx_buffer_size: 0,
            vt_us: SequenceNumber10::new(0),
            bsr_timer: SimTimer::new(),
            exp_bsr_timer: false,
            rx_buffer: BTreeMap::new(),
            vr_ur: SequenceNumber10::new(0),
            vr_ux: SequenceNumber10::new(0),
            vr_uh: SequenceNumber10::new(0),
            reordering_timer: SimTimer::new(),
            reassembling_state: ReassemblingState::WaitingS0Full,
            keep_s0: None,
            expected_seq_number: SequenceNumber10::new(0),
            tx_pdus: Vec::new(),
            bsr_reports: Vec::new(),
            delivered_sdus: Vec::new(),
            dropped_sdus: Vec::new(),
        }
    }

    /// Accepts an SDU from the upper layer for transmission.
    ///
    /// When PDCP discarding is enabled and the head-of-line SDU has been
    /// queued longer than the discard timer, the stale head is dropped to
    /// make room for fresher traffic. A buffer-status report is emitted
    /// regardless of the outcome.
    pub fn submit_sdu(&mut self, now: SimTime, sdu: Bytes) {
        debug!(rnti = %self.rnti, lcid = %self.lcid, size = sdu.len(), "sdu from upper layer");

        if self.tx_buffer_size + sdu.len() <= self.config.max_tx_buffer_size {
            if self.config.enable_pdcp_discarding {
                let discard_timer_ms = self.config.effective_discard_timer_ms();
                let hol_delay_ms = self
                    .tx_buffer
                    .front()
                    .map(|front| now.elapsed_since(front.waiting_since))
                    .unwrap_or(0);
                if hol_delay_ms > discard_timer_ms {
                    if let Some(front) = self.tx_buffer.pop_front() {
                        info!(
                            rnti = %self.rnti,
                            lcid = %self.lcid,
                            hol_delay_ms,
                            discard_timer_ms,
                            size = front.payload.len(),
                            "head-of-line delay exceeded, sdu discarded"
                        );
                        self.tx_buffer_size -= front.payload.len();
                        self.dropped_sdus.push(front.payload);
                    }
                }
            }
            self.tx_buffer_size += sdu.len();
            self.tx_buffer.push_back(TxSdu {
                payload: sdu,
                status: SduStatus::FullSdu,
                waiting_since: now,
            });
            trace!(
                buffers = self.tx_buffer.len(),
                bytes = self.tx_buffer_size,
                "sdu queued"
            );
        } else {
            info!(
                rnti = %self.rnti,
                lcid = %self.lcid,
                buffered = self.tx_buffer_size,
                size = sdu.len(),
                "tx buffer full, sdu discarded"
            );
            self.dropped_sdus.push(sdu);
        }

        self.send_buffer_status_report(now);
        self.bsr_timer.cancel();
    }

    /// Packs queued SDUs into one PDU for a MAC transmit opportunity.
    pub fn on_tx_opportunity(&mut self, now: SimTime, params: TxOpportunityParams) {
        info!(
            rnti = %self.rnti,
            lcid = %self.lcid,
            bytes = params.bytes,
            "tx opportunity"
        );
        if params.bytes as usize <= FIXED_HEADER_SIZE {
            info!(bytes = params.bytes, "tx opportunity too small");
            return;
        }
        let Some(front) = self.tx_buffer.pop_front() else {
            debug!("no data pending");
            return;
        };
        self.tx_buffer_size -= front.payload.len();
        let mut segment = front.payload;
        let mut segment_status = front.status;
        let mut segment_time = front.waiting_since;

        let mut next_segment_size = params.bytes as usize - FIXED_HEADER_SIZE;
        let mut next_segment_id = 1usize;
        let mut data_field: Vec<(Bytes, SduStatus)> = Vec::new();
        let mut length_indicators: Vec<u16> = Vec::new();

        loop {
            if segment.len() > next_segment_size || segment.len() > MAX_LENGTH_INDICATOR as usize {
                // Carve the front of the segment. Anything longer than a
                // length indicator can express must end the data field.
                let take = segment.len().min(next_segment_size);
                let mut fragment_status = match segment_status {
                    SduStatus::FullSdu => SduStatus::FirstSegment,
                    SduStatus::LastSegment => SduStatus::MiddleSegment,
                    other => other,
                };
                let remainder_status = match segment_status {
                    SduStatus::FullSdu => SduStatus::LastSegment,
                    other => other,
                };
                let fragment = segment.split_to(take);
                if segment.is_empty() {
                    // Whole remainder consumed after all.
                    fragment_status = match fragment_status {
                        SduStatus::FirstSegment => SduStatus::FullSdu,
                        SduStatus::MiddleSegment => SduStatus::LastSegment,
                        other => other,
                    };
                } else {
                    self.tx_buffer_size += segment.len();
                    self.tx_buffer.push_front(TxSdu {
                        payload: segment,
                        status: remainder_status,
                        waiting_since: segment_time,
                    });
                }
                // Final data field, no length indicator.
                data_field.push((fragment, fragment_status));
                break;
            } else if next_segment_size - segment.len() <= 2 || self.tx_buffer.is_empty() {
                // Whole SDU fits and nothing useful can follow it.
                data_field.push((segment, segment_status));
                break;
            } else {
                // Whole SDU plus a length indicator, then keep packing.
                let size = segment.len();
                length_indicators.push(size as u16);
                data_field.push((segment, segment_status));
                // Length indicators pack two per three bytes; odd-indexed
                // ones open a new group and cost an extra byte.
                let li_overhead = if next_segment_id % 2 == 1 { 2 } else { 1 };
                next_segment_size -= li_overhead + size;
                next_segment_id += 1;
                let Some(next) = self.tx_buffer.pop_front() else {
                    break;
                };
                self.tx_buffer_size -= next.payload.len();
                segment = next.payload;
                segment_status = next.status;
                segment_time = next.waiting_since;
            }
        }

        let sn = self.vt_us;
        self.vt_us += 1;

        let first_status = match data_field.first() {
            Some(&(_, status)) => status,
            None => return,
        };
        let last_status = match data_field.last() {
            Some(&(_, status)) => status,
            None => return,
        };
        let framing_info = FramingInfo::new(
            matches!(first_status, SduStatus::FullSdu | SduStatus::FirstSegment),
            matches!(last_status, SduStatus::FullSdu | SduStatus::LastSegment),
        );

        let header = UmHeader {
            framing_info,
            sequence_number: sn,
            length_indicators,
        };
        let payload_size: usize = data_field.iter().map(|(f, _)| f.len()).sum();
        let mut pdu = BytesMut::with_capacity(header.serialized_size() + payload_size);
        header.encode(&mut pdu);
        for (fragment, _) in &data_field {
            pdu.extend_from_slice(fragment);
        }

        debug!(
            sn = %sn,
            fields = data_field.len(),
            size = pdu.len(),
            "pdu to mac"
        );
        self.tx_pdus.push(TransmitPduParams {
            pdu: pdu.freeze(),
            rnti: self.rnti,
            lcid: self.lcid,
            layer: params.layer,
            harq_process_id: params.harq_id,
            component_carrier_id: params.component_carrier_id,
            sent_at: now,
        });

        if !self.tx_buffer.is_empty() {
            self.bsr_timer.schedule(now + BSR_PERIOD_MS);
        }
    }

    /// UM provides no HARQ recovery; failures are only logged.
    pub fn on_harq_delivery_failure(&self) {
        debug!(rnti = %self.rnti, lcid = %self.lcid, "harq delivery failure");
    }

    /// Processes a PDU arriving from the MAC layer (TS 36.322 §5.1.2.2).
    pub fn on_pdu_received(&mut self, now: SimTime, params: ReceivePduParams) {
        let delay_ms = now.elapsed_since(params.sent_at);
        debug!(
            rnti = %self.rnti,
            lcid = %self.lcid,
            size = params.pdu.len(),
            delay_ms,
            "pdu from mac"
        );

        let header = match UmHeader::decode(&params.pdu) {
            Ok((header, _)) => header,
            Err(err) => {
                warn!(%err, "malformed pdu ignored");
                return;
            }
        };
        let mut sn = header.sequence_number;
        trace!(
            vr_ur = %self.vr_ur,
            vr_ux = %self.vr_ux,
            vr_uh = %self.vr_uh,
            sn = %sn,
            "receive state"
        );

        let base = self.vr_uh - self.config.window_size;
        self.vr_ur.set_modulus_base(base);
        self.vr_uh.set_modulus_base(base);
        sn.set_modulus_base(base);
        let mut lower_edge = base;
        lower_edge.set_modulus_base(base);

        let duplicate_inside = self.vr_ur < sn
            && sn < self.vr_uh
            && self.rx_buffer.contains_key(&sn.value());
        let below_window = lower_edge <= sn && sn < self.vr_ur;
        if duplicate_inside || below_window {
            debug!(sn = %sn, "pdu discarded");
            return;
        }
        self.rx_buffer.insert(sn.value(), params.pdu);

        if self.config.out_of_order_delivery {
            self.reassemble_outside_window();
        }

        if !self.is_inside_reordering_window(sn) {
            self.vr_uh = sn + 1;
            debug!(vr_uh = %self.vr_uh, "sn outside reordering window");

            self.reassemble_outside_window();

            if !self.is_inside_reordering_window(self.vr_ur) {
                self.vr_ur = self.vr_uh - self.config.window_size;
                debug!(vr_ur = %self.vr_ur, "vr(ur) snapped to window edge");
            }
        }

        if self.rx_buffer.contains_key(&self.vr_ur.value()) {
            let old_vr_ur = self.vr_ur;
            let mut new_vr_ur = self.vr_ur + 1;
            while self.rx_buffer.contains_key(&new_vr_ur.value()) {
                new_vr_ur += 1;
            }
            self.vr_ur = new_vr_ur;
            debug!(vr_ur = %self.vr_ur, "vr(ur) advanced");

            self.reassemble_sn_interval(old_vr_ur, new_vr_ur);
        }

        // VR(UH) may have moved; re-anchor before the timer conditions.
        let base = self.vr_uh - self.config.window_size;
        self.vr_ur.set_modulus_base(base);
        self.vr_ux.set_modulus_base(base);
        self.vr_uh.set_modulus_base(base);

        if self.reordering_timer.is_running()
            && (self.vr_ux <= self.vr_ur
                || (!self.is_inside_reordering_window(self.vr_ux) && self.vr_ux != self.vr_uh))
        {
            debug!("stop reordering timer");
            self.reordering_timer.cancel();
        }

        if !self.reordering_timer.is_running() && self.vr_uh > self.vr_ur {
            debug!(vr_ux = %self.vr_uh, "start reordering timer");
            self.reordering_timer
                .schedule(now + self.config.reordering_timer_ms);
            self.vr_ux = self.vr_uh;
        }
    }

    /// Fires any timer whose deadline has passed. Call whenever the
    /// simulation clock advances.
    pub fn advance_time(&mut self, now: SimTime) {
        if self.reordering_timer.take_expired(now) {
            self.on_reordering_timer_expiry(now);
        }
        if self.bsr_timer.take_expired(now) {
            self.on_bsr_timer_expiry(now);
        }
    }

    /// Drains PDUs produced for the MAC layer.
    pub fn take_transmitted_pdus(&mut self) -> Vec<TransmitPduParams> {
        std::mem::take(&mut self.tx_pdus)
    }

    /// Drains buffer-status reports produced for the MAC scheduler.
    pub fn take_buffer_status_reports(&mut self) -> Vec<BufferStatusReport> {
        std::mem::take(&mut self.bsr_reports)
    }

    /// Drains SDUs reassembled for the upper layer, in delivery order.
    pub fn take_delivered_sdus(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.delivered_sdus)
    }

    /// Drains SDUs dropped on the transmit side.
    pub fn take_dropped_sdus(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.dropped_sdus)
    }

    pub fn tx_queue_len(&self) -> usize {
        self.tx_buffer.len()
    }

    pub fn tx_buffered_bytes(&self) -> usize {
        self.tx_buffer_size
    }

    pub fn vr_ur(&self) -> u16 {
        self.vr_ur.value()
    }

    pub fn vr_uh(&self) -> u16 {
        self.vr_uh.value()
    }

    pub fn is_reordering_timer_running(&self) -> bool {
        self.reordering_timer.is_running()
    }

    fn is_inside_reordering_window(&self, sn: SequenceNumber10) -> bool {
        let mut base = self.vr_uh - self.config.window_size;
        base.set_modulus_base(base);
        let mut vr_uh = self.vr_uh;
        vr_uh.set_modulus_base(base);
        let mut sn = sn;
        sn.set_modulus_base(base);
        base <= sn && sn < vr_uh
    }

    /// Delivers every buffered PDU below the reordering window, in
    /// ascending SN order, stopping at the first in-window entry.
    fn reassemble_outside_window(&mut self) {
        loop {
            let Some(&sn) = self.rx_buffer.keys().next() else {
                return;
            };
            if self.is_inside_reordering_window(SequenceNumber10::new(sn)) {
                return;
            }
            trace!(sn, "reassembling outside window");
            if let Some(pdu) = self.rx_buffer.remove(&sn) {
                self.reassemble_and_deliver(pdu);
            }
        }
    }

    /// Delivers every buffered PDU in `[low, high)` in ascending SN order.
    fn reassemble_sn_interval(&mut self, low: SequenceNumber10, high: SequenceNumber10) {
        trace!(low = %low, high = %high, "reassembling sn interval");
        let mut sn = low;
        while sn < high {
            if let Some(pdu) = self.rx_buffer.remove(&sn.value()) {
                self.reassemble_and_deliver(pdu);
            }
            sn += 1;
        }
    }

    /// Splits one buffered PDU into its data fields and drives the
    /// reassembly state machine, delivering completed SDUs upward.
    fn reassemble_and_deliver(&mut self, pdu: Bytes) {
        let (header, header_size) = match UmHeader::decode(&pdu) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(%err, "malformed buffered pdu ignored");
                return;
            }
        };
        let sn = header.sequence_number;

        // A gap before this PDU means any held first part can never be
        // completed; the loss arms below discard stranded fragments.
        let expected_sn_lost = sn != self.expected_seq_number;
        if expected_sn_lost {
            debug!(expected = %self.expected_seq_number, sn = %sn, "sequence gap detected");
            self.expected_seq_number = sn + 1;
        } else {
            self.expected_seq_number += 1;
        }

        // Split the payload along the length-indicator chain; the final
        // field runs to the end of the PDU.
        let mut rest = pdu.slice(header_size..);
        let mut fragments: VecDeque<Bytes> = VecDeque::new();
        for &li in &header.length_indicators {
            let li = li as usize;
            if li >= rest.len() {
                warn!(li, remaining = rest.len(), "length indicator exceeds remaining payload");
                break;
            }
            fragments.push_back(rest.split_to(li));
        }
        fragments.push_back(rest);

        let fi = (
            header.framing_info.first_byte_starts_sdu,
            header.framing_info.last_byte_ends_sdu,
        );
        use ReassemblingState::{WaitingS0Full, WaitingSiSf};
        match (expected_sn_lost, self.reassembling_state, fi) {
            // No partial SDU held: the held-state arms are identical with
            // and without a preceding gap.
            (_, WaitingS0Full, (true, true)) => {
                self.reassembling_state = WaitingS0Full;
                for fragment in fragments.drain(..) {
                    self.deliver(fragment);
                }
            }
            (_, WaitingS0Full, (true, false)) => {
                self.reassembling_state = WaitingSiSf;
                while fragments.len() > 1 {
                    if let Some(fragment) = fragments.pop_front() {
                        self.deliver(fragment);
                    }
                }
                self.keep_s0 = fragments.pop_front().map(|f| BytesMut::from(&f[..]));
            }
            (_, WaitingS0Full, (false, true)) => {
                self.reassembling_state = WaitingS0Full;
                // Stray continuation of an SDU whose start was never held.
                fragments.pop_front();
                while let Some(fragment) = fragments.pop_front() {
                    self.deliver(fragment);
                }
            }
            (_, WaitingS0Full, (false, false)) => {
                self.reassembling_state = if fragments.len() == 1 {
                    WaitingS0Full
                } else {
                    WaitingSiSf
                };
                fragments.pop_front();
                if !fragments.is_empty() {
                    while fragments.len() > 1 {
                        if let Some(fragment) = fragments.pop_front() {
                            self.deliver(fragment);
                        }
                    }
                    self.keep_s0 = fragments.pop_front().map(|f| BytesMut::from(&f[..]));
                }
            }

            // A held first part and a contiguous continuation.
            (false, WaitingSiSf, (false, true)) => {
                self.reassembling_state = WaitingS0Full;
                self.deliver_held_with(fragments.pop_front());
                while let Some(fragment) = fragments.pop_front() {
                    self.deliver(fragment);
                }
            }
            (false, WaitingSiSf, (false, false)) => {
                self.reassembling_state = WaitingSiSf;
                if fragments.len() == 1 {
                    // The held SDU keeps growing.
                    match (self.keep_s0.as_mut(), fragments.pop_front()) {
                        (Some(held), Some(fragment)) => held.extend_from_slice(&fragment),
                        _ => warn!("reassembly hold buffer empty in waiting-si-sf"),
                    }
                } else {
                    self.deliver_held_with(fragments.pop_front());
                    while fragments.len() > 1 {
                        if let Some(fragment) = fragments.pop_front() {
                            self.deliver(fragment);
                        }
                    }
                    self.keep_s0 = fragments.pop_front().map(|f| BytesMut::from(&f[..]));
                }
            }
            (false, WaitingSiSf, _) => {
                warn!(
                    first = fi.0,
                    last = fi.1,
                    "framing info transition not possible, data fields dropped"
                );
            }

            // A held first part stranded by a gap: discard it.
            (true, WaitingSiSf, (true, true)) => {
                self.reassembling_state = WaitingS0Full;
                self.keep_s0 = None;
                while let Some(fragment) = fragments.pop_front() {
                    self.deliver(fragment);
                }
            }
            (true, WaitingSiSf, (true, false)) => {
                self.reassembling_state = WaitingSiSf;
                self.keep_s0 = None;
                while fragments.len() > 1 {
                    if let Some(fragment) = fragments.pop_front() {
                        self.deliver(fragment);
                    }
                }
                self.keep_s0 = fragments.pop_front().map(|f| BytesMut::from(&f[..]));
            }
            (true, WaitingSiSf, (false, true)) => {
                self.reassembling_state = WaitingS0Full;
                self.keep_s0 = None;
                fragments.pop_front();
                while let Some(fragment) = fragments.pop_front() {
                    self.deliver(fragment);
                }
            }
            (true, WaitingSiSf, (false, false)) => {
                self.reassembling_state = if fragments.len() == 1 {
                    WaitingS0Full
                } else {
                    WaitingSiSf
                };
                self.keep_s0 = None;
                fragments.pop_front();
                if !fragments.is_empty() {
                    while fragments.len() > 1 {
                        if let Some(fragment) = fragments.pop_front() {
                            self.deliver(fragment);
                        }
                    }
                    self.keep_s0 = fragments.pop_front().map(|f| BytesMut::from(&f[..]));
                }
            }
        }
    }

    /// Concatenates the held first part with its continuation and delivers
    /// the completed SDU.
    fn deliver_held_with(&mut self, continuation: Option<Bytes>) {
        match (self.keep_s0.take(), continuation) {
            (Some(mut held), Some(fragment)) => {
                held.extend_from_slice(&fragment);
                self.deliver(held.freeze());
            }
            _ => warn!("reassembly hold buffer empty in waiting-si-sf"),
        }
    }

    fn deliver(&mut self, sdu: Bytes) {
        trace!(size = sdu.len(), "sdu to upper layer");
        self.delivered_sdus.push(sdu);
    }

    fn send_buffer_status_report(&mut self, now: SimTime) {
        let (tx_queue_size, tx_queue_hol_delay_ms) = match self.tx_buffer.front() {
            // Queued data plus an estimated 2-byte header per queued SDU.
            Some(front) => (
                (self.tx_buffer_size + 2 * self.tx_buffer.len()) as u32,
                now.elapsed_since(front.waiting_since),
            ),
            None => (0, 0),
        };
        debug!(tx_queue_size, tx_queue_hol_delay_ms, "buffer status report");
        self.bsr_reports.push(BufferStatusReport {
            rnti: self.rnti,
            lcid: self.lcid,
            tx_queue_size,
            tx_queue_hol_delay_ms,
            retx_queue_size: 0,
            retx_queue_hol_delay_ms: 0,
            status_pdu_size: 0,
            exp_bsr_timer: self.exp_bsr_timer,
        });
        self.exp_bsr_timer = false;
    }

    /// TS 36.322 §5.1.2.2.4: actions when t-Reordering expires.
    fn on_reordering_timer_expiry(&mut self, now: SimTime) {
        debug!(rnti = %self.rnti, lcid = %self.lcid, "reordering timer expired");

        let mut new_vr_ur = self.vr_ux;
        while self.rx_buffer.contains_key(&new_vr_ur.value()) {
            new_vr_ur += 1;
        }
        let old_vr_ur = self.vr_ur;
        self.vr_ur = new_vr_ur;
        debug!(vr_ur = %self.vr_ur, "vr(ur) advanced on expiry");

        self.reassemble_sn_interval(old_vr_ur, new_vr_ur);

        if self.vr_uh > self.vr_ur {
            debug!("restart reordering timer");
            self.reordering_timer
                .schedule(now + self.config.reordering_timer_ms);
            self.vr_ux = self.vr_uh;
        }
    }

    fn on_bsr_timer_expiry(&mut self, now: SimTime) {
        if !self.tx_buffer.is_empty() {
            self.exp_bsr_timer = true;
            self.send_buffer_status_report(now);
            self.bsr_timer.schedule(now + BSR_PERIOD_MS);
        }
    }
}

impl RlcEntity for RlcUmEntity {
    fn submit_sdu(&mut self, now: SimTime, sdu: Bytes) {
        RlcUmEntity::submit_sdu(self, now, sdu);
    }

    fn on_tx_opportunity(&mut self, now: SimTime, params: TxOpportunityParams) {
        RlcUmEntity::on_tx_opportunity(self, now, params);
    }

    fn on_harq_delivery_failure(&self) {
        RlcUmEntity::on_harq_delivery_failure(self);
    }

    fn on_pdu_received(&mut self, now: SimTime, params: ReceivePduParams) {
        RlcUmEntity::on_pdu_received(self, now, params);
    }

    fn advance_time(&mut self, now: SimTime) {
        RlcUmEntity::advance_time(self, now);
    }

    fn take_transmitted_pdus(&mut self) -> Vec<TransmitPduParams> {
        RlcUmEntity::take_transmitted_pdus(self)
    }

    fn take_buffer_status_reports(&mut self) -> Vec<BufferStatusReport> {
        RlcUmEntity::take_buffer_status_reports(self)
    }

    fn take_delivered_sdus(&mut self) -> Vec<Bytes> {
        RlcUmEntity::take_delivered_sdus(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sap::TxOpportunityParams;
    use nrlink_common::{ComponentCarrierId, HarqProcessId};
    use rand::{Rng, SeedableRng};

    fn entity() -> RlcUmEntity {
        entity_with(RlcUmConfig::default())
    }

    fn entity_with(config: RlcUmConfig) -> RlcUmEntity {
        RlcUmEntity::new(Rnti(1), Lcid(3), config)
    }

    fn opportunity(bytes: u32) -> TxOpportunityParams {
        TxOpportunityParams {
            bytes,
            layer: 0,
            harq_id: HarqProcessId(0),
            component_carrier_id: ComponentCarrierId(0),
        }
    }

    fn full_pdu(sn: u16, payload: &[u8]) -> Bytes {
        let header = UmHeader {
            framing_info: FramingInfo::new(true, true),
            sequence_number: SequenceNumber10::new(sn),
            length_indicators: vec![],
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        buf.extend_from_slice(payload);
        buf.freeze()
    }

    fn receive(entity: &mut RlcUmEntity, now: SimTime, pdu: Bytes) {
        entity.on_pdu_received(
            now,
            ReceivePduParams {
                pdu,
                sent_at: now,
            },
        );
    }

    #[test]
    fn test_single_sdu_roundtrip() {
        let mut tx = entity();
        let mut rx = entity();
        let now = SimTime::ZERO;
        let sdu = Bytes::from(vec![7u8; 40]);

        tx.submit_sdu(now, sdu.clone());
        tx.on_tx_opportunity(now, opportunity(100));
        let pdus = tx.take_transmitted_pdus();
        assert_eq!(pdus.len(), 1);
        assert_eq!(pdus[0].pdu.len(), 42);

        receive(&mut rx, now, pdus[0].pdu.clone());
        assert_eq!(rx.take_delivered_sdus(), vec![sdu]);
    }

    #[test]
    fn test_opportunity_too_small_produces_nothing() {
        let mut tx = entity();
        tx.submit_sdu(SimTime::ZERO, Bytes::from(vec![1u8; 10]));
        tx.on_tx_opportunity(SimTime::ZERO, opportunity(2));
        assert!(tx.take_transmitted_pdus().is_empty());
        assert_eq!(tx.tx_queue_len(), 1);
    }

    #[test]
    fn test_segmentation_scenario_three_sdus() {
        let mut tx = entity();
        let mut rx = entity();
        let now = SimTime::ZERO;

        let sdus: Vec<Bytes> = [100usize, 50, 30]
            .iter()
            .enumerate()
            .map(|(i, &n)| Bytes::from(vec![i as u8 + 1; n]))
            .collect();
        for sdu in &sdus {
            tx.submit_sdu(now, sdu.clone());
        }

        for bytes in [60u32, 60, 60, 20] {
            tx.on_tx_opportunity(now, opportunity(bytes));
        }
        let pdus = tx.take_transmitted_pdus();
        assert_eq!(pdus.len(), 4);
        assert_eq!(tx.tx_queue_len(), 0);
        assert_eq!(tx.tx_buffered_bytes(), 0);

        // No payload byte created or lost across the four PDUs.
        let headers: Vec<UmHeader> = pdus
            .iter()
            .map(|p| UmHeader::decode(&p.pdu).unwrap().0)
            .collect();
        let payload_total: usize = pdus
            .iter()
            .zip(&headers)
            .map(|(p, h)| p.pdu.len() - h.serialized_size())
            .sum();
        assert_eq!(payload_total, 180);

        // Boundary framing: the stream starts and ends on SDU boundaries.
        assert!(headers[0].framing_info.first_byte_starts_sdu);
        assert!(!headers[0].framing_info.last_byte_ends_sdu);
        assert!(!headers[3].framing_info.first_byte_starts_sdu);
        assert!(headers[3].framing_info.last_byte_ends_sdu);

        for pdu in &pdus {
            receive(&mut rx, now, pdu.pdu.clone());
        }
        assert_eq!(rx.take_delivered_sdus(), sdus);
    }

    #[test]
    fn test_random_drain_conservation() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0xb5);
        for _ in 0..20 {
            let mut tx = entity();
            let mut rx = entity();
            let now = SimTime::ZERO;

            let sdus: Vec<Bytes> = (0..rng.gen_range(1..8))
                .map(|i| {
                    let size = rng.gen_range(1..400);
                    Bytes::from(vec![i as u8; size])
                })
                .collect();
            for sdu in &sdus {
                tx.submit_sdu(now, sdu.clone());
            }

            let mut guard = 0;
            while tx.tx_queue_len() > 0 {
                tx.on_tx_opportunity(now, opportunity(rng.gen_range(4..120)));
                guard += 1;
                assert!(guard < 10_000, "transmit queue failed to drain");
            }
            for pdu in tx.take_transmitted_pdus() {
                receive(&mut rx, now, pdu.pdu.clone());
            }
            assert_eq!(rx.take_delivered_sdus(), sdus);
        }
    }

    #[test]
    fn test_oversized_sdu_segments_at_li_limit() {
        let mut tx = entity();
        let mut rx = entity();
        let now = SimTime::ZERO;

        // Larger than one LI can express; must drain over several PDUs.
        let sdu = Bytes::from((0..5000u32).map(|i| i as u8).collect::<Vec<u8>>());
        tx.submit_sdu(now, sdu.clone());
        while tx.tx_queue_len() > 0 {
            tx.on_tx_opportunity(now, opportunity(600));
        }
        for pdu in tx.take_transmitted_pdus() {
            receive(&mut rx, now, pdu.pdu.clone());
        }
        assert_eq!(rx.take_delivered_sdus(), vec![sdu]);
    }

    #[test]
    fn test_window_acceptance_and_advance() {
        let mut rx = entity();
        let now = SimTime::ZERO;

        for sn in 0u16..512 {
            receive(&mut rx, now, full_pdu(sn, &[sn as u8]));
        }
        // Every in-order PDU inside the initial window is delivered at once.
        assert_eq!(rx.take_delivered_sdus().len(), 512);
        assert_eq!(rx.vr_uh(), 512);
        assert_eq!(rx.vr_ur(), 512);

        receive(&mut rx, now, full_pdu(512, &[0xaa]));
        assert_eq!(rx.take_delivered_sdus().len(), 1);
        assert_eq!(rx.vr_uh(), 513);
    }

    #[test]
    fn test_stale_duplicate_discarded() {
        let mut rx = entity();
        let now = SimTime::ZERO;

        receive(&mut rx, now, full_pdu(0, b"one"));
        assert_eq!(rx.take_delivered_sdus().len(), 1);

        // Same SN again is below the delivered boundary.
        receive(&mut rx, now, full_pdu(0, b"one"));
        assert!(rx.take_delivered_sdus().is_empty());
    }

    #[test]
    fn test_loss_recovered_by_late_arrival() {
        let mut rx = entity();
        let now = SimTime::ZERO;

        receive(&mut rx, now, full_pdu(0, b"a"));
        assert_eq!(rx.take_delivered_sdus(), vec![Bytes::from_static(b"a")]);

        receive(&mut rx, now, full_pdu(2, b"c"));
        assert!(rx.take_delivered_sdus().is_empty());
        assert!(rx.is_reordering_timer_running());

        receive(&mut rx, now, full_pdu(1, b"b"));
        assert_eq!(
            rx.take_delivered_sdus(),
            vec![Bytes::from_static(b"b"), Bytes::from_static(b"c")]
        );
        assert!(!rx.is_reordering_timer_running());
    }

    #[test]
    fn test_loss_recovered_by_reordering_timer() {
        let mut rx = entity();
        let now = SimTime::ZERO;

        receive(&mut rx, now, full_pdu(0, b"a"));
        rx.take_delivered_sdus();

        receive(&mut rx, now, full_pdu(2, b"c"));
        assert!(rx.take_delivered_sdus().is_empty());

        rx.advance_time(SimTime::from_ms(99));
        assert!(rx.take_delivered_sdus().is_empty());

        rx.advance_time(SimTime::from_ms(100));
        assert_eq!(rx.take_delivered_sdus(), vec![Bytes::from_static(b"c")]);
        assert_eq!(rx.vr_ur(), 3);
        assert!(!rx.is_reordering_timer_running());
    }

    #[test]
    fn test_gap_discards_stranded_partial_sdu() {
        let mut tx = entity();
        let mut rx = entity();
        let now = SimTime::ZERO;

        // One 100-byte SDU split across two PDUs; lose the second and let
        // a later full SDU arrive after the gap.
        tx.submit_sdu(now, Bytes::from(vec![1u8; 100]));
        tx.on_tx_opportunity(now, opportunity(60));
        tx.on_tx_opportunity(now, opportunity(60));
        let pdus = tx.take_transmitted_pdus();
        assert_eq!(pdus.len(), 2);

        receive(&mut rx, now, pdus[0].pdu.clone());
        assert!(rx.take_delivered_sdus().is_empty());

        let late = full_pdu(2, b"next");
        receive(&mut rx, now, late);
        assert!(rx.take_delivered_sdus().is_empty());
        rx.advance_time(SimTime::from_ms(100));

        // The stranded first half is discarded; only the full SDU survives.
        assert_eq!(rx.take_delivered_sdus(), vec![Bytes::from_static(b"next")]);
    }

    #[test]
    fn test_discard_timer_drops_stale_head() {
        let config = RlcUmConfig {
            discard_timer_ms: 50,
            ..RlcUmConfig::default()
        };
        let mut tx = entity_with(config);

        let a = Bytes::from(vec![0xaa; 20]);
        let b = Bytes::from(vec![0xbb; 20]);
        tx.submit_sdu(SimTime::ZERO, a.clone());
        assert!(tx.take_dropped_sdus().is_empty());

        tx.submit_sdu(SimTime::from_ms(60), b);
        assert_eq!(tx.take_dropped_sdus(), vec![a]);
        assert_eq!(tx.tx_queue_len(), 1);
        assert_eq!(tx.tx_buffered_bytes(), 20);
    }

    #[test]
    fn test_buffer_full_drops_new_sdu() {
        let config = RlcUmConfig {
            max_tx_buffer_size: 30,
            ..RlcUmConfig::default()
        };
        let mut tx = entity_with(config);

        tx.submit_sdu(SimTime::ZERO, Bytes::from(vec![1u8; 25]));
        let overflow = Bytes::from(vec![2u8; 10]);
        tx.submit_sdu(SimTime::ZERO, overflow.clone());

        assert_eq!(tx.take_dropped_sdus(), vec![overflow]);
        assert_eq!(tx.tx_queue_len(), 1);
    }

    #[test]
    fn test_bsr_on_submit_and_periodic_rearm() {
        let mut tx = entity();
        let now = SimTime::ZERO;

        tx.submit_sdu(now, Bytes::from(vec![1u8; 50]));
        let reports = tx.take_buffer_status_reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].tx_queue_size, 52);
        assert_eq!(reports[0].tx_queue_hol_delay_ms, 0);
        assert!(!reports[0].exp_bsr_timer);

        // A partial drain leaves data queued and arms the periodic timer.
        tx.on_tx_opportunity(now, opportunity(22));
        assert_eq!(tx.tx_queue_len(), 1);

        tx.advance_time(SimTime::from_ms(10));
        let reports = tx.take_buffer_status_reports();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].exp_bsr_timer);
        assert_eq!(reports[0].tx_queue_hol_delay_ms, 10);

        // Re-armed while data remains.
        tx.advance_time(SimTime::from_ms(20));
        assert_eq!(tx.take_buffer_status_reports().len(), 1);
    }

    #[test]
    fn test_bsr_silent_when_drained() {
        let mut tx = entity();
        let now = SimTime::ZERO;

        tx.submit_sdu(now, Bytes::from(vec![1u8; 20]));
        tx.take_buffer_status_reports();
        tx.on_tx_opportunity(now, opportunity(100));
        assert_eq!(tx.tx_queue_len(), 0);

        tx.advance_time(SimTime::from_ms(50));
        assert!(tx.take_buffer_status_reports().is_empty());
    }

    #[test]
    fn test_malformed_pdu_ignored() {
        let mut rx = entity();
        receive(&mut rx, SimTime::ZERO, Bytes::from_static(&[0x04]));
        assert!(rx.take_delivered_sdus().is_empty());
        assert_eq!(rx.vr_uh(), 0);
    }

    #[test]
    fn test_entity_behind_trait_object() {
        let mut rlc: Box<dyn RlcEntity> = Box::new(entity());
        let now = SimTime::ZERO;

        rlc.submit_sdu(now, Bytes::from_static(b"hello"));
        assert_eq!(rlc.take_buffer_status_reports().len(), 1);
        rlc.on_tx_opportunity(now, opportunity(20));
        let pdus = rlc.take_transmitted_pdus();
        assert_eq!(pdus.len(), 1);
        rlc.on_pdu_received(
            now,
            ReceivePduParams {
                pdu: pdus[0].pdu.clone(),
                sent_at: now,
            },
        );
        assert_eq!(rlc.take_delivered_sdus(), vec![Bytes::from_static(b"hello")]);
    }

    #[test]
    fn test_sn_wraparound_in_order_delivery() {
        let mut tx = entity();
        let mut rx = entity();
        let now = SimTime::ZERO;

        // Enough single-SDU PDUs to wrap the 10-bit sequence space.
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..1100u32 {
            let sdu = Bytes::from(vec![rng.gen::<u8>(); 5]);
            tx.submit_sdu(now, sdu.clone());
            tx.on_tx_opportunity(now, opportunity(10));
            let pdus = tx.take_transmitted_pdus();
            assert_eq!(pdus.len(), 1);
            receive(&mut rx, now, pdus[0].pdu.clone());
            assert_eq!(rx.take_delivered_sdus(), vec![sdu]);
        }
        assert_eq!(rx.vr_uh(), 1100 % 1024);
    }
}
