//! Demo roles and their simulated agents
//!
//! A role is the persona the demo is playing (investment analyst, legal
//! expert, ...). It owns the roster of simulated agents, the sample queries the
//! automatic demo cycles through, and the canned metrics shown once a run is
//! delivered. All of it is immutable after the catalog is loaded.

use serde::{Deserialize, Serialize};

/// Display grouping that also staggers phase timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Orchestrating agents that start first
    Core,
    /// Domain specialists
    Professional,
    /// Simulated data feeds
    DataSource,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Core, Layer::Professional, Layer::DataSource];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Core => "core",
            Layer::Professional => "professional",
            Layer::DataSource => "data_source",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated agent in a role's roster
///
/// `tasks` lists the task labels the agent may be shown working on. The first
/// entry is its canonical task; each run picks one uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique within the owning role
    pub id: String,
    pub label: String,
    pub tasks: Vec<String>,
    pub layer: Layer,
}

impl AgentDefinition {
    pub fn new(id: &str, label: &str, layer: Layer, tasks: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
            layer,
        }
    }

    /// Canonical task label
    pub fn task(&self) -> Option<&str> {
        self.tasks.first().map(String::as_str)
    }
}

/// A single labelled figure in the delivery summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricItem {
    pub label: String,
    pub value: String,
}

/// Static summary exposed when a run reaches the delivered phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryMetrics {
    pub headline: String,
    pub items: Vec<MetricItem>,
}

impl DeliveryMetrics {
    pub fn new(headline: &str, items: &[(&str, &str)]) -> Self {
        Self {
            headline: headline.to_string(),
            items: items
                .iter()
                .map(|(label, value)| MetricItem {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

/// A demo persona
///
/// # Example
/// ```
/// use agent_demo_core_rs::models::{AgentDefinition, DeliveryMetrics, Layer, Role};
///
/// let role = Role {
///     id: "legal".to_string(),
///     name: "法律专家".to_string(),
///     agents: vec![
///         AgentDefinition::new("contract_reviewer", "合同审查员", Layer::Core, &["合同审查"]),
///         AgentDefinition::new("case_law", "判例数据库", Layer::DataSource, &["判例检索"]),
///     ],
///     sample_queries: vec!["审查这份供应商合同的潜在风险".to_string()],
///     delivery: DeliveryMetrics::default(),
/// };
///
/// assert_eq!(role.agents_in(Layer::Core).count(), 1);
/// assert_eq!(role.agents_in(Layer::Professional).count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    /// Roster in display order
    pub agents: Vec<AgentDefinition>,
    pub sample_queries: Vec<String>,
    #[serde(default)]
    pub delivery: DeliveryMetrics,
}

impl Role {
    /// Agents tagged with `layer`, in roster order
    pub fn agents_in(&self, layer: Layer) -> impl Iterator<Item = &AgentDefinition> {
        self.agents.iter().filter(move |agent| agent.layer == layer)
    }

    pub fn agent(&self, id: &str) -> Option<&AgentDefinition> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// Sample query at `index`, wrapping around the list
    pub fn sample_query(&self, index: usize) -> Option<&str> {
        if self.sample_queries.is_empty() {
            return None;
        }
        self.sample_queries
            .get(index % self.sample_queries.len())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_query_wraps() {
        let role = Role {
            id: "r".to_string(),
            name: "R".to_string(),
            agents: vec![],
            sample_queries: vec!["a".to_string(), "b".to_string()],
            delivery: DeliveryMetrics::default(),
        };

        assert_eq!(role.sample_query(0), Some("a"));
        assert_eq!(role.sample_query(3), Some("b"));
    }

    #[test]
    fn test_layer_serializes_snake_case() {
        let json = serde_json::to_string(&Layer::DataSource).unwrap();
        assert_eq!(json, "\"data_source\"");
    }
}
