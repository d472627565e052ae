//! DataPoint response bodies, reduced to the fields the source reads.
//!
//! DataPoint collapses single-element lists into plain objects and sends
//! numbers as strings, so both shapes are accepted.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct Capabilities {
    #[serde(rename = "Resource")]
    pub resource: Resource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Resource {
    #[serde(rename = "TimeSteps")]
    pub time_steps: TimeSteps,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimeSteps {
    #[serde(rename = "TS")]
    pub steps: OneOrMany<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SiteReport {
    #[serde(rename = "SiteRep")]
    site_rep: SiteRep,
}

#[derive(Debug, Deserialize)]
struct SiteRep {
    #[serde(rename = "DV")]
    data: DataValues,
}

#[derive(Debug, Deserialize)]
struct DataValues {
    #[serde(rename = "Location")]
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    #[serde(rename = "Period")]
    period: OneOrMany<Period>,
}

#[derive(Debug, Deserialize)]
struct Period {
    #[serde(rename = "Rep")]
    rep: OneOrMany<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(rename = "T")]
    temperature: Option<Number>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_last(self) -> Option<T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(mut values) => values.pop(),
        }
    }
}

impl SiteReport {
    /// Temperature of the latest observation in the latest period.
    pub fn temperature(self) -> Option<f64> {
        self.site_rep
            .data
            .location
            .period
            .into_last()?
            .rep
            .into_last()?
            .temperature?
            .value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_single_object_report() {
        let report: SiteReport = serde_json::from_str(
            r#"{"SiteRep":{"DV":{"Location":{"Period":{"Rep":{"T":"4.7"}}}}}}"#,
        )
        .unwrap();
        assert_eq!(report.temperature(), Some(4.7));
    }

    #[test]
    fn should_ignore_unparseable_temperature() {
        let report: SiteReport = serde_json::from_str(
            r#"{"SiteRep":{"DV":{"Location":{"Period":{"Rep":{"T":"n/a"}}}}}}"#,
        )
        .unwrap();
        assert_eq!(report.temperature(), None);
    }

    #[test]
    fn should_read_time_step_list() {
        let capabilities: Capabilities = serde_json::from_str(
            r#"{"Resource":{"TimeSteps":{"TS":["2024-03-20T10:00:00Z","2024-03-20T11:00:00Z"]}}}"#,
        )
        .unwrap();
        assert_eq!(
            capabilities.resource.time_steps.steps.into_last().as_deref(),
            Some("2024-03-20T11:00:00Z")
        );
    }
}
