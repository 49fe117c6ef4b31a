//! Pre-interpretation hooks
//!
//! Events whose band groups are missing, or do not line up with their
//! chromosomes, are flagged `uncertain`. The interpreter then records a note
//! for them instead of loss/gain/fusion counts.

use log::debug;

use super::{Event, EventKind, RowClones};

/// Flag structural events with missing or mismatched band groups.
pub fn process_missing_breakpoints(clones: &mut RowClones) {
    for event in clones.iter_mut().flat_map(|c| c.events.iter_mut()) {
        if event.kind.is_structural()
            && event.kind != EventKind::Derivative
            && !breakpoints_well_formed(event)
        {
            debug!("flagging '{}': breakpoints missing or mismatched", event.text);
            event.uncertain = true;
        }
    }
}

/// Flag derivatives that have neither breakpoints nor nested events, or
/// whose nested events are themselves missing breakpoints.
pub fn mark_uncertain_der_event(clones: &mut RowClones) {
    for event in clones.iter_mut().flat_map(|c| c.events.iter_mut()) {
        if event.kind != EventKind::Derivative {
            continue;
        }
        let bare = !event.has_breakpoints() && event.nested.is_empty();
        let own_groups_bad = event.has_breakpoints() && !groups_match_chromosomes(event);
        let nested_bad = event.nested.iter().any(|n| !breakpoints_well_formed(n));
        if bare || own_groups_bad || nested_bad {
            debug!("flagging derivative '{}' as uncertain", event.text);
            event.uncertain = true;
        }
    }
}

/// True if an event's band groups match what its kind requires.
pub fn breakpoints_well_formed(event: &Event) -> bool {
    let groups = &event.breakpoints;
    if groups.is_empty() || groups.iter().any(Vec::is_empty) {
        return false;
    }
    let bands = |i: usize| groups.get(i).map_or(0, Vec::len);

    match event.kind {
        EventKind::Numerical | EventKind::Marker => true,
        EventKind::Deletion
        | EventKind::Duplication
        | EventKind::Triplication
        | EventKind::Quadruplication => groups.len() == 1 && (1..=2).contains(&bands(0)),
        EventKind::Addition | EventKind::Isochromosome | EventKind::Isodicentric => {
            groups.len() == 1 && bands(0) == 1
        }
        EventKind::Inversion | EventKind::Ring => groups.len() == 1 && bands(0) == 2,
        EventKind::Translocation | EventKind::Dicentric => {
            groups_match_chromosomes(event) && groups.iter().all(|g| g.len() == 1)
        }
        EventKind::Insertion => match event.chromosomes.len() {
            1 => groups.len() == 1 && bands(0) == 3,
            2 => groups.len() == 2 && bands(0) == 1 && bands(1) == 2,
            _ => false,
        },
        EventKind::Derivative => groups_match_chromosomes(event),
    }
}

fn groups_match_chromosomes(event: &Event) -> bool {
    event.breakpoints.len() == event.chromosomes.len()
}
