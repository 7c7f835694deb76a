use crossbeam_channel::Sender;

use crate::{direction::Direction, grid::Position};

/// One observable step of a survey pass. Events are emitted synchronously in
/// the order the tracer makes decisions; a slow sink stalls the trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    CellVisited {
        position: Position,
        label: char,
    },
    SideAdded {
        position: Position,
        direction: Direction,
    },
    RegionClosed {
        label: char,
        area: usize,
        sides: usize,
    },
}

/// Receives trace events during a survey pass.
pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

/// Sink for callers that don't observe the trace.
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

/// Recording sink; handy in tests.
impl TraceSink for Vec<TraceEvent> {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Forwards events over a channel so a consumer on another thread can drain
/// them at its own pace. A disconnected receiver is ignored; the survey never
/// blocks on its observer.
pub struct ChannelSink {
    tx: Sender<TraceEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<TraceEvent>) -> Self {
        Self { tx }
    }
}

impl TraceSink for ChannelSink {
    fn emit(&mut self, event: TraceEvent) {
        let _ = self.tx.send(event);
    }
}
