//! Trace hook for harvest progress. The default sink forwards to the log
//! facade; callers can capture events through a channel instead.

use std::sync::mpsc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_core::{Endpoint, GridPoint, StopReason};

#[derive(Debug, Clone, PartialEq)]
pub enum HarvestEvent {
    RequestSent {
        domain: &'static str,
        endpoint: Endpoint,
        continuation: bool,
    },
    PageDecoded {
        domain: &'static str,
        page: usize,
        items: usize,
        total: usize,
    },
    Finished {
        domain: &'static str,
        reason: StopReason,
        total: usize,
    },
    CellFailed {
        point: GridPoint,
        error: String,
    },
}

pub trait TraceSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Sends every event to the `engine_*` log macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTraceSink;

impl TraceSink for LogTraceSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::RequestSent {
                domain,
                endpoint,
                continuation,
            } => engine_debug!(
                "{domain}: POST {} ({})",
                endpoint.path(),
                if continuation { "continuation" } else { "seed" }
            ),
            HarvestEvent::PageDecoded {
                domain,
                page,
                items,
                total,
            } => engine_debug!("{domain}: page {page} gave {items} items ({total} total)"),
            HarvestEvent::Finished {
                domain,
                reason,
                total,
            } => engine_info!("{domain}: done with {total} items ({reason})"),
            HarvestEvent::CellFailed { point, error } => {
                engine_warn!("grid cell {} failed: {error}", point.location())
            }
        }
    }
}

pub struct ChannelTraceSink {
    tx: mpsc::Sender<HarvestEvent>,
}

impl ChannelTraceSink {
    pub fn new(tx: mpsc::Sender<HarvestEvent>) -> Self {
        Self { tx }
    }
}

impl TraceSink for ChannelTraceSink {
    fn emit(&self, event: HarvestEvent) {
        let _ = self.tx.send(event);
    }
}
