//! Product metric registry.
//!
//! Metrics are kept in insertion order. The board view groups them by [`Priority`] in the fixed
//! order North Star, P0, P1, P2.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Metric priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    NorthStar,
    P0,
    P1,
    P2,
}

impl Priority {
    /// All tiers in board order.
    pub const ALL: [Priority; 4] = [Priority::NorthStar, Priority::P0, Priority::P1, Priority::P2];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::NorthStar => "North Star",
            Priority::P0 => "P0",
            Priority::P1 => "P1",
            Priority::P2 => "P2",
        };
        f.write_str(s)
    }
}

/// Error returned when a priority label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}' (expected North Star, P0, P1, or P2)")]
pub struct UnknownPriority(pub String);

impl FromStr for Priority {
    type Err = UnknownPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "northstar" => Ok(Priority::NorthStar),
            "p0" => Ok(Priority::P0),
            "p1" => Ok(Priority::P1),
            "p2" => Ok(Priority::P2),
            _ => Err(UnknownPriority(s.to_string())),
        }
    }
}

/// A tracked product metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub name: String,
    pub priority: Priority,
    /// How the metric is evaluated (e.g. "Online eval", "Hybrid").
    pub eval: String,
    pub definition: String,
    /// Known trade-offs, if documented.
    pub tradeoffs: Option<String>,
}

impl Metric {
    /// Plain-text card for the metric board.
    pub fn card(&self) -> String {
        format!(
            "{} [{}]\n  {}\n  Trade-offs: {}\n  Eval: {}",
            self.name,
            self.priority,
            self.definition,
            self.tradeoffs
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or("Not documented"),
            self.eval
        )
    }
}

/// Ordered collection of metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricRegistry {
    metrics: Vec<Metric>,
}

impl MetricRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the starter metrics for a search/AI product.
    pub fn with_samples() -> Self {
        let mut registry = Self::new();
        for metric in sample_metrics() {
            registry.add(metric);
        }
        registry
    }

    /// Append a metric.
    pub fn add(&mut self, metric: Metric) {
        log::debug!("adding metric '{}' ({})", metric.name, metric.priority);
        self.metrics.push(metric);
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// All metrics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    /// Metric names in insertion order (choices for an experiment's primary metric).
    pub fn names(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.name.as_str()).collect()
    }

    /// Metrics grouped by priority, every tier present (possibly empty), in board order.
    pub fn board(&self) -> Vec<(Priority, Vec<&Metric>)> {
        Priority::ALL
            .iter()
            .map(|&p| (p, self.metrics.iter().filter(|m| m.priority == p).collect()))
            .collect()
    }

    /// The first North Star metric, or the first metric if there is none.
    pub fn headline(&self) -> Option<&Metric> {
        self.metrics
            .iter()
            .find(|m| m.priority == Priority::NorthStar)
            .or_else(|| self.metrics.first())
    }
}

fn sample_metrics() -> Vec<Metric> {
    vec![
        Metric {
            name: "Search Relevance".to_string(),
            priority: Priority::NorthStar,
            eval: "Hybrid".to_string(),
            definition: "Quality of top results and answer cards for core intents".to_string(),
            tradeoffs: Some("Balance relevance gains with latency, hallucination, and abuse risk".to_string()),
        },
        Metric {
            name: "AI Adoption".to_string(),
            priority: Priority::NorthStar,
            eval: "Online eval".to_string(),
            definition: "Share of search sessions that engage with AI-generated answers or chat".to_string(),
            tradeoffs: Some("Higher adoption must protect precision, safety, and cost".to_string()),
        },
        Metric {
            name: "Latency p95".to_string(),
            priority: Priority::P0,
            eval: "Online eval".to_string(),
            definition: "End-to-end ranking + generation latency at p95".to_string(),
            tradeoffs: Some("Lower latency may reduce model size and quality".to_string()),
        },
    ]
}
