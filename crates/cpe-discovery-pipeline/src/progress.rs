// Copyright (c) Contributors to the cpe-discovery project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/example/cpe-discovery

//! The §4.J / §3 `ProgressEvent` model: a tagged record streamed to a
//! single consumer in strict phase order.

use cpe_discovery_parser::ParsedAsset;
use cpe_discovery_score::CpeCandidate;

/// §3 `ProgressEvent.kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Progress,
    Completed,
    Error,
}

/// §3 `ProgressEvent.phase`; the ordered set `{parsing, searching,
/// scoring, ranking, completed, error}`. Events within one pipeline run
/// are strictly monotonic in this order (§5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Parsing,
    Searching,
    Scoring,
    Ranking,
    Completed,
    Error,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Parsing => "parsing",
            Phase::Searching => "searching",
            Phase::Scoring => "scoring",
            Phase::Ranking => "ranking",
            Phase::Completed => "completed",
            Phase::Error => "error",
        };
        f.write_str(label)
    }
}

/// The `completed` event's payload (§6 `findCpe`): the parsed asset, the
/// final ranked candidates, how many were returned, and how many the
/// search actually found before truncation.
#[derive(Debug, Clone)]
pub struct CompletedPayload {
    pub parsed: ParsedAsset,
    pub candidates: Vec<CpeCandidate>,
    pub count: usize,
    pub total_found: u64,
}

/// One event on the `findCpe` progress stream.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub kind: EventKind,
    pub phase: Phase,
    pub message: String,
    pub payload: Option<CompletedPayload>,
}

impl ProgressEvent {
    pub fn progress(phase: Phase, message: impl Into<String>) -> Self {
        ProgressEvent {
            kind: EventKind::Progress,
            phase,
            message: message.into(),
            payload: None,
        }
    }

    /// §4.J step 6 emits the terminal success event as `{completed,
    /// ranking, ...}` — the `kind` is `Completed`, but the documented
    /// `phase` is `Ranking`, the stage that produced the payload.
    pub fn completed(message: impl Into<String>, payload: CompletedPayload) -> Self {
        ProgressEvent {
            kind: EventKind::Completed,
            phase: Phase::Ranking,
            message: message.into(),
            payload: Some(payload),
        }
    }

    /// A terminal failure event. `phase` is the stage that was running
    /// when the failure occurred (§4.J: "a fatal failure at any stage
    /// emits a terminal `{error, <phase>, message}`"), not necessarily
    /// `Phase::Error` itself.
    pub fn error(phase: Phase, message: impl Into<String>) -> Self {
        ProgressEvent {
            kind: EventKind::Error,
            phase,
            message: message.into(),
            payload: None,
        }
    }
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/{}: {}", self.kind, self.phase, self.message)
    }
}
