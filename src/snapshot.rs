//! Data shared with the home-screen widget.
//!
//! The app persists the selected station and a snapshot of its departures as
//! JSON strings; the widget renders them without talking to the API. Storage
//! itself is up to the platform, these types only fix the JSON shapes.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::Identifier;

/// Storage key of the selected station.
pub const SELECTED_STATION_KEY: &str = "selectedStation";

/// Storage key of the departures snapshot.
pub const DEPARTURES_KEY: &str = "departures";

/// Number of departures the widget shows.
pub const WIDGET_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    Station,
    Stop,
    Location,
}

/// The station the user picked, as persisted for the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedStation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StationKind,
}

impl SelectedStation {
    /// Builds a selection from one entry of a locations search.
    ///
    /// Only stops and stations that carry both an id and a name qualify;
    /// addresses and points of interest yield `None`.
    ///
    /// ```
    /// use hafas_rest_client::snapshot::SelectedStation;
    /// use serde_json::json;
    ///
    /// let stop = json!({"type": "stop", "id": "900058101", "name": "S Südkreuz"});
    /// assert!(SelectedStation::from_location(&stop).is_some());
    ///
    /// let poi = json!({
    ///     "type": "location",
    ///     "id": "900980720",
    ///     "name": "Berlin, Tempelhofer Feld",
    /// });
    /// assert!(SelectedStation::from_location(&poi).is_none());
    /// ```
    pub fn from_location(location: &Value) -> Option<Self> {
        let kind = match location.get("type")?.as_str()? {
            "stop" => StationKind::Stop,
            "station" => StationKind::Station,
            _ => return None,
        };
        let id = match location.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let name = location.get("name")?.as_str()?.to_string();
        if id.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { id, name, kind })
    }
}

impl From<&SelectedStation> for Identifier {
    fn from(station: &SelectedStation) -> Self {
        Identifier::Plain(station.id.clone())
    }
}

impl From<SelectedStation> for Identifier {
    fn from(station: SelectedStation) -> Self {
        Identifier::Plain(station.id)
    }
}

/// One departure as the widget sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRow {
    pub line: String,
    pub direction: String,
    /// Realtime departure time (ISO 8601), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// Scheduled departure time (ISO 8601), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned_when: Option<String>,
}

impl DepartureRow {
    /// The realtime time, falling back to the planned one.
    pub fn effective_time(&self) -> Option<&str> {
        self.when.as_deref().or(self.planned_when.as_deref())
    }

    /// `HH:MM` of the realtime or planned time, in the offset it was given
    /// in, or `?` if neither parses.
    pub fn display_time(&self) -> String {
        [self.when.as_deref(), self.planned_when.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// The departures list persisted for the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeparturesSnapshot {
    pub departures: Vec<DepartureRow>,
}

impl DeparturesSnapshot {
    /// Condenses a departures payload (`{"departures": [...]}`) into rows,
    /// sorted by realtime time, falling back to planned time. Rows with
    /// neither come last.
    pub fn from_departures(payload: &Value) -> Self {
        let mut departures: Vec<DepartureRow> = payload
            .get("departures")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(row_from_departure).collect())
            .unwrap_or_default();

        departures.sort_by(|a, b| compare_times(a.effective_time(), b.effective_time()));
        Self { departures }
    }

    /// The rows the widget displays.
    pub fn widget_rows(&self) -> &[DepartureRow] {
        &self.departures[..self.departures.len().min(WIDGET_ROWS)]
    }

    /// Serializes the snapshot for storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reads a stored snapshot.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn row_from_departure(departure: &Value) -> DepartureRow {
    let text = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    DepartureRow {
        line: text(departure.get("line").and_then(|l| l.get("name")))
            .unwrap_or_else(|| "?".to_string()),
        direction: text(departure.get("direction")).unwrap_or_else(|| "Unknown".to_string()),
        when: text(departure.get("when")),
        planned_when: text(departure.get("plannedWhen")),
    }
}

fn compare_times(a: Option<&str>, b: Option<&str>) -> Ordering {
    let parse = |t: Option<&str>| t.and_then(|t| DateTime::parse_from_rfc3339(t).ok());
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "departures": [
                {
                    "tripId": "1",
                    "line": {"name": "S41"},
                    "direction": "Ringbahn S 41",
                    "when": "2026-10-17T08:12:00+02:00",
                    "plannedWhen": "2026-10-17T08:10:00+02:00"
                },
                {
                    "tripId": "2",
                    "line": {"name": "S2"},
                    "direction": "S Blankenburg",
                    "when": null,
                    "plannedWhen": "2026-10-17T08:05:00+02:00"
                },
                {
                    "tripId": "3",
                    "direction": null,
                    "when": null,
                    "plannedWhen": null,
                    "cancelled": true
                },
                {
                    "tripId": "4",
                    "line": {"name": "M46"},
                    "direction": "U Britz-Süd",
                    "when": "2026-10-17T06:07:00Z"
                }
            ]
        })
    }

    #[test]
    fn sorts_by_realtime_then_planned_time() {
        let snapshot = DeparturesSnapshot::from_departures(&payload());
        let lines: Vec<&str> = snapshot.departures.iter().map(|d| d.line.as_str()).collect();
        assert_eq!(lines, vec!["S2", "M46", "S41", "?"]);
        assert_eq!(snapshot.departures[3].direction, "Unknown");
    }

    #[test]
    fn display_time_prefers_realtime() {
        let snapshot = DeparturesSnapshot::from_departures(&payload());
        let times: Vec<String> = snapshot.departures.iter().map(|d| d.display_time()).collect();
        assert_eq!(times, vec!["08:05", "06:07", "08:12", "?"]);
    }

    #[test]
    fn persisted_shape_uses_planned_when() {
        let snapshot = DeparturesSnapshot {
            departures: vec![DepartureRow {
                line: "U6".to_string(),
                direction: "Alt-Mariendorf".to_string(),
                when: None,
                planned_when: Some("2026-10-17T08:00:00+02:00".to_string()),
            }],
        };

        let stored = snapshot.to_json().unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&stored).unwrap(),
            json!({"departures": [{
                "line": "U6",
                "direction": "Alt-Mariendorf",
                "plannedWhen": "2026-10-17T08:00:00+02:00"
            }]})
        );
        assert_eq!(DeparturesSnapshot::from_json(&stored).unwrap(), snapshot);
    }

    #[test]
    fn widget_shows_at_most_five_rows() {
        let row = DepartureRow {
            line: "U7".to_string(),
            direction: "Rudow".to_string(),
            when: None,
            planned_when: None,
        };
        let snapshot = DeparturesSnapshot {
            departures: vec![row; 8],
        };
        assert_eq!(snapshot.widget_rows().len(), WIDGET_ROWS);
        assert!(DeparturesSnapshot::default().widget_rows().is_empty());
    }

    #[test]
    fn selected_station_round_trips_through_storage_shape() {
        let station = SelectedStation::from_location(&json!({
            "type": "station",
            "id": 900058101,
            "name": "S Südkreuz Bhf (Berlin)"
        }))
        .unwrap();

        assert_eq!(station.id, "900058101");
        assert_eq!(
            serde_json::to_value(&station).unwrap(),
            json!({"id": "900058101", "name": "S Südkreuz Bhf (Berlin)", "type": "station"})
        );
        assert_eq!(Identifier::from(&station).id(), Some("900058101"));
    }
}
