//! Background request workers for the TUI.
//!
//! The event loop must never block on the network, so each request runs on
//! its own thread and delivers an [`Update`] tagged with the issuing
//! [`RequestSeq`] over an mpsc channel. The loop drains the channel every
//! tick and routes completions through the panels' stale-suppression check;
//! a superseded request's update is simply discarded on arrival.

use std::sync::mpsc::Sender;

use crate::api::{DocHit, Overview, PortalClient, SearchMode};
use crate::point::MemoryPoint;
use crate::view::RequestSeq;

/// A completed background request.
pub enum Update {
    Spiral {
        seq: RequestSeq,
        result: Result<Vec<MemoryPoint>, String>,
    },
    Overview {
        seq: RequestSeq,
        result: Result<Overview, String>,
    },
    Docs {
        seq: RequestSeq,
        result: Result<Vec<DocHit>, String>,
    },
    Answer {
        seq: RequestSeq,
        result: Result<String, String>,
    },
}

pub fn spawn_spiral(
    client: PortalClient,
    tx: Sender<Update>,
    seq: RequestSeq,
    well_id: String,
    stage: String,
) {
    std::thread::spawn(move || {
        let result = client
            .fetch_spiral(&well_id, &stage)
            .map_err(|e| e.to_string());
        // The loop may have exited; a dead receiver is fine.
        let _ = tx.send(Update::Spiral { seq, result });
    });
}

pub fn spawn_overview(client: PortalClient, tx: Sender<Update>, seq: RequestSeq, well_id: String) {
    std::thread::spawn(move || {
        let result = client.fetch_overview(&well_id).map_err(|e| e.to_string());
        let _ = tx.send(Update::Overview { seq, result });
    });
}

pub fn spawn_docs(
    client: PortalClient,
    tx: Sender<Update>,
    seq: RequestSeq,
    well_id: String,
    query: String,
    mode: SearchMode,
) {
    std::thread::spawn(move || {
        let result = client
            .search_docs(&well_id, &query, mode)
            .map_err(|e| e.to_string());
        let _ = tx.send(Update::Docs { seq, result });
    });
}

pub fn spawn_query(
    client: PortalClient,
    tx: Sender<Update>,
    seq: RequestSeq,
    well_id: String,
    question: String,
) {
    std::thread::spawn(move || {
        let result = client
            .query_well(&well_id, &question)
            .map_err(|e| e.to_string());
        let _ = tx.send(Update::Answer { seq, result });
    });
}
