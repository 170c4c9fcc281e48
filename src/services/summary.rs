//! Summary reducer - per-gate IN/OUT tallies by vehicle type
//!
//! Scans raw log lines with the same positional split rule the writer
//! uses. Lines that do not match the expected shape are skipped silently;
//! malformed-line tolerance, not an error.

use crate::domain::entry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// IN/OUT counts for one vehicle type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTally {
    pub in_count: u32,
    pub out_count: u32,
}

/// Tallies for one gate, keyed by the vehicle type text as it appears in
/// the log. Unknown type strings tally under their own key rather than
/// being dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GateSummary {
    counts: BTreeMap<String, TypeTally>,
}

impl GateSummary {
    pub fn counts(&self) -> &BTreeMap<String, TypeTally> {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Plain-text rendering, one numbered line per vehicle type
    pub fn render(&self) -> String {
        if self.counts.is_empty() {
            return "No entries recorded.".to_string();
        }

        let mut out = String::new();
        for (index, (vehicle_type, tally)) in self.counts.iter().enumerate() {
            let _ = writeln!(
                out,
                "No.{} {}: {} IN, {} OUT",
                index + 1,
                vehicle_type,
                tally.in_count,
                tally.out_count
            );
        }
        out
    }
}

/// Reduce raw log lines into per-type tallies
pub fn summarize_lines<'a, I>(lines: I) -> GateSummary
where
    I: IntoIterator<Item = &'a str>,
{
    let mut summary = GateSummary::default();

    for line in lines {
        let Some(fields) = entry::parse_line(line) else {
            continue;
        };

        let tally = summary.counts.entry(fields.vehicle_type).or_default();
        match fields.action.as_str() {
            "IN" => tally.in_count += 1,
            "OUT" => tally.out_count += 1,
            _ => {}
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::LogEntry;
    use crate::domain::types::{Action, GateId, VehicleType};

    fn line(seq: u64, vehicle_type: VehicleType, action: Action) -> String {
        LogEntry {
            sequence_no: seq,
            gate: GateId(1),
            actor: None,
            vehicle_type,
            vehicle_id: "MH01A01234".to_string(),
            flat_id: "F101".to_string(),
            action,
            timestamp: "09:00:00 AM".to_string(),
        }
        .format_line()
    }

    #[test]
    fn test_three_in_one_out() {
        let lines = vec![
            line(1, VehicleType::Car, Action::In),
            line(2, VehicleType::Car, Action::In),
            line(3, VehicleType::Car, Action::In),
            line(4, VehicleType::Car, Action::Out),
        ];
        let summary = summarize_lines(lines.iter().map(String::as_str));

        let tally = summary.counts()["Car"];
        assert_eq!(tally, TypeTally { in_count: 3, out_count: 1 });
    }

    #[test]
    fn test_types_tallied_separately() {
        let lines = vec![
            line(1, VehicleType::Car, Action::In),
            line(2, VehicleType::Bike, Action::Out),
            line(3, VehicleType::Ev, Action::In),
        ];
        let summary = summarize_lines(lines.iter().map(String::as_str));

        assert_eq!(summary.counts().len(), 3);
        assert_eq!(summary.counts()["Car"].in_count, 1);
        assert_eq!(summary.counts()["Bike"].out_count, 1);
        assert_eq!(summary.counts()["EV"].in_count, 1);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let lines = vec![
            line(1, VehicleType::Car, Action::In),
            "not a log line".to_string(),
            "a | b | c".to_string(),
            String::new(),
        ];
        let summary = summarize_lines(lines.iter().map(String::as_str));

        assert_eq!(summary.counts().len(), 1);
        assert_eq!(summary.counts()["Car"].in_count, 1);
    }

    #[test]
    fn test_unknown_action_ignored() {
        let raw =
            "Entry No.1 | Gate 1 | User: - | Vehicle: Car | Number: A | Flat: B | Action: HOVER | Time: T";
        let summary = summarize_lines([raw]);

        assert_eq!(summary.counts()["Car"], TypeTally::default());
    }

    #[test]
    fn test_empty_log() {
        let summary = summarize_lines(std::iter::empty());
        assert!(summary.is_empty());
        assert_eq!(summary.render(), "No entries recorded.");
    }

    #[test]
    fn test_render_numbered_lines() {
        let lines = vec![
            line(1, VehicleType::Bike, Action::In),
            line(2, VehicleType::Car, Action::In),
            line(3, VehicleType::Car, Action::Out),
        ];
        let summary = summarize_lines(lines.iter().map(String::as_str));
        let text = summary.render();

        assert!(text.contains("No.1 Bike: 1 IN, 0 OUT"));
        assert!(text.contains("No.2 Car: 1 IN, 1 OUT"));
    }

    #[test]
    fn test_serializes_to_json() {
        let lines = vec![line(1, VehicleType::Car, Action::In)];
        let summary = summarize_lines(lines.iter().map(String::as_str));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["counts"]["Car"]["in_count"], 1);
        assert_eq!(json["counts"]["Car"]["out_count"], 0);
    }
}
