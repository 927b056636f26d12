use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Data block the server embeds in the dashboard page.
///
/// Every field is optional on the wire; readers substitute a display
/// fallback at render time instead of rejecting the block.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DashboardPayload {
    pub kpis: Kpis,
    #[serde(alias = "byRep")]
    pub by_rep: Vec<RepCount>,
    pub trend: Trend,
    pub recent: Vec<RecentVisit>,
    pub upcoming: Vec<UpcomingVisit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Kpis {
    #[serde(deserialize_with = "lenient_number")]
    pub total: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub approved: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub deals: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub reps: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub conversion: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub clients: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub upcoming: Option<f64>,
    #[serde(alias = "byRepTotal", deserialize_with = "lenient_number")]
    pub by_rep_total: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RepCount {
    #[serde(deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub count: Option<u64>,
}

impl RepCount {
    pub fn count(&self) -> u64 {
        self.count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Trend {
    #[serde(deserialize_with = "lenient_labels")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient_series")]
    pub visits: Vec<Option<f64>>,
    #[serde(deserialize_with = "lenient_series")]
    pub deals: Vec<Option<f64>>,
}

impl Trend {
    /// Number of plotted samples: the longest of the three sequences.
    pub fn len(&self) -> usize {
        self.labels.len().max(self.visits.len()).max(self.deals.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `visits` padded with zeros to [`Trend::len`].
    pub fn visits_series(&self) -> Vec<f64> {
        pad_series(&self.visits, self.len())
    }

    /// `deals` padded with zeros to [`Trend::len`].
    pub fn deals_series(&self) -> Vec<f64> {
        pad_series(&self.deals, self.len())
    }
}

fn pad_series(values: &[Option<f64>], len: usize) -> Vec<f64> {
    (0..len)
        .map(|index| values.get(index).copied().flatten().unwrap_or(0.0))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RecentVisit {
    #[serde(alias = "datetime")]
    pub dt: Option<Value>,
    pub rep: Option<Value>,
    pub account: Option<Value>,
    pub doctor: Option<Value>,
    pub outcome: Option<Value>,
}

impl RecentVisit {
    pub const COLUMNS: [&'static str; 5] = ["dt", "rep", "account", "doctor", "outcome"];

    pub fn cells(&self) -> Vec<String> {
        [&self.dt, &self.rep, &self.account, &self.doctor, &self.outcome]
            .into_iter()
            .map(|value| display_cell(value.as_ref()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct UpcomingVisit {
    pub date: Option<Value>,
    pub rep: Option<Value>,
    pub plan: Option<Value>,
    #[serde(alias = "obj")]
    pub objective: Option<Value>,
}

impl UpcomingVisit {
    pub const COLUMNS: [&'static str; 4] = ["date", "rep", "plan", "objective"];

    pub fn cells(&self) -> Vec<String> {
        let date = self.date.as_ref().map(|value| {
            let text = scalar_text(value);
            Value::String(text.chars().take(10).collect())
        });
        [&date, &self.rep, &self.plan, &self.objective]
            .into_iter()
            .map(|value| display_cell(value.as_ref()))
            .collect()
    }
}

// Off-type values degrade to "absent" for that one field instead of
// rejecting the whole block.

fn number_of(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_of))
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_of)
        .filter(|count| *count >= 0.0)
        .map(|count| count.round() as u64))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(scalar_text))
}

fn lenient_labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        _ => Vec::new(),
    })
}

fn lenient_series<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<f64>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().map(number_of).collect(),
        _ => Vec::new(),
    })
}

/// Placeholder shown for null, missing or empty values.
pub const PLACEHOLDER: &str = "\u{2014}";

/// Text for one table cell; null, absent and empty values show [`PLACEHOLDER`].
pub fn display_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(value) => {
            let text = scalar_text(value);
            if text.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                text
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Formats a KPI number the way it is shown on the page: whole values
/// without a fractional part.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
