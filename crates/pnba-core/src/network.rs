//! Weighted networks loaded from JSON or TOML files

use crate::error::{Error, Result};
use crate::graph::{Distance, Graph};
use crate::limits::{validate_edge_count, validate_node_count, validate_node_id};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path as FilePath;
use std::str::FromStr;

/// Heuristic used to estimate distances between network nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    /// 0 for the same node, 1 otherwise
    #[default]
    Unit,
    /// Manhattan distance between node coordinates
    Manhattan,
    /// Euclidean distance between node coordinates, rounded down
    Euclidean,
}

impl HeuristicKind {
    pub fn all() -> &'static [&'static str] {
        &["unit", "manhattan", "euclidean"]
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Manhattan => write!(f, "manhattan"),
            Self::Euclidean => write!(f, "euclidean"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "unit" => Ok(Self::Unit),
            "manhattan" => Ok(Self::Manhattan),
            "euclidean" => Ok(Self::Euclidean),
            other => Err(Error::invalid(format!(
                "unknown heuristic '{}' (expected one of: {})",
                other,
                Self::all().join(", ")
            ))),
        }
    }
}

/// Node as written in a network file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
}

/// Undirected edge as written in a network file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,

    #[serde(default = "default_weight")]
    pub weight: Distance,
}

fn default_weight() -> Distance {
    1
}

/// Contents of a network file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl NetworkSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.nodes.push(NodeSpec {
            id: id.into(),
            x: None,
            y: None,
        });
        self
    }

    pub fn with_located_node(mut self, id: impl Into<String>, x: i64, y: i64) -> Self {
        self.nodes.push(NodeSpec {
            id: id.into(),
            x: Some(x),
            y: Some(y),
        });
        self
    }

    pub fn with_edge(mut self, from: impl Into<String>, to: impl Into<String>, weight: Distance) -> Self {
        self.edges.push(EdgeSpec {
            from: from.into(),
            to: to.into(),
            weight,
        });
        self
    }
}

/// Validated, indexed network implementing [`Graph`] over node ids
#[derive(Debug, Clone)]
pub struct Network {
    coordinates: HashMap<String, Option<(i64, i64)>>,
    adjacency: HashMap<String, Vec<(String, Distance)>>,
    edge_count: usize,
    heuristic: HeuristicKind,
}

impl Network {
    /// Validate and index a network description
    pub fn from_spec(spec: NetworkSpec, heuristic: HeuristicKind) -> Result<Self> {
        validate_node_count(spec.nodes.len())?;
        validate_edge_count(spec.edges.len())?;

        let mut coordinates = HashMap::with_capacity(spec.nodes.len());
        for node in spec.nodes {
            validate_node_id(&node.id)?;
            let location = match (node.x, node.y) {
                (Some(x), Some(y)) => Some((x, y)),
                (None, None) => None,
                _ => {
                    return Err(Error::invalid(format!(
                        "node '{}' must have both x and y or neither",
                        node.id
                    )))
                }
            };
            if coordinates.insert(node.id.clone(), location).is_some() {
                return Err(Error::invalid(format!("duplicate node '{}'", node.id)));
            }
        }

        let mut adjacency: HashMap<String, Vec<(String, Distance)>> = HashMap::new();
        let mut edge_count = 0;
        for edge in spec.edges {
            for end in [&edge.from, &edge.to] {
                if !coordinates.contains_key(end) {
                    return Err(Error::invalid(format!("edge references unknown node '{}'", end)));
                }
            }
            if edge.from == edge.to {
                return Err(Error::invalid(format!("self loop on node '{}'", edge.from)));
            }
            if edge.weight == 0 {
                return Err(Error::invalid(format!(
                    "edge {} - {} has zero weight",
                    edge.from, edge.to
                )));
            }
            if Self::connect(&mut adjacency, &edge.from, &edge.to, edge.weight) {
                edge_count += 1;
            }
            Self::connect(&mut adjacency, &edge.to, &edge.from, edge.weight);
        }

        tracing::debug!(
            "Indexed network: {} nodes, {} edges, heuristic={}",
            coordinates.len(),
            edge_count,
            heuristic
        );

        Ok(Self {
            coordinates,
            adjacency,
            edge_count,
            heuristic,
        })
    }

    /// Record `from -> to`, keeping the lighter weight for parallel edges;
    /// returns true for a new edge
    fn connect(
        adjacency: &mut HashMap<String, Vec<(String, Distance)>>,
        from: &str,
        to: &str,
        weight: Distance,
    ) -> bool {
        let neighbors = adjacency.entry(from.to_string()).or_default();
        match neighbors.iter_mut().find(|(node, _)| node == to) {
            Some((_, existing)) => {
                *existing = (*existing).min(weight);
                false
            }
            None => {
                neighbors.push((to.to_string(), weight));
                true
            }
        }
    }

    pub fn from_json_str(input: &str, heuristic: HeuristicKind) -> Result<Self> {
        Self::from_spec(serde_json::from_str(input)?, heuristic)
    }

    pub fn from_toml_str(input: &str, heuristic: HeuristicKind) -> Result<Self> {
        Self::from_spec(toml::from_str(input)?, heuristic)
    }

    /// Load a `.json` or `.toml` network file
    pub fn load(path: impl AsRef<FilePath>, heuristic: HeuristicKind) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&input, heuristic),
            Some("toml") => Self::from_toml_str(&input, heuristic),
            _ => Err(Error::invalid(format!(
                "unsupported network file '{}' (expected .json or .toml)",
                path.display()
            ))),
        }
    }

    pub fn node_count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic
    }

    pub fn contains(&self, node: &str) -> bool {
        self.coordinates.contains_key(node)
    }

    /// Sum of edge weights along `nodes`, or None if two consecutive nodes are not adjacent
    pub fn path_weight(&self, nodes: &[String]) -> Option<Distance> {
        nodes.windows(2).try_fold(0 as Distance, |total, pair| {
            let weight = self.edge_weight(&pair[0], &pair[1])?;
            total.checked_add(weight)
        })
    }

    fn edge_weight(&self, from: &str, to: &str) -> Option<Distance> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|(node, _)| node == to)
            .map(|(_, weight)| *weight)
    }

    fn location(&self, node: &str) -> Result<Option<(i64, i64)>> {
        self.coordinates
            .get(node)
            .copied()
            .ok_or_else(|| Error::invalid(format!("unknown node '{}'", node)))
    }
}

impl Graph for Network {
    type Node = String;

    fn neighbors(&self, node: &String) -> Result<Vec<String>> {
        self.validate_node(node)?;
        Ok(self
            .adjacency
            .get(node)
            .map(|neighbors| neighbors.iter().map(|(id, _)| id.clone()).collect())
            .unwrap_or_default())
    }

    fn known_distance(&self, from: &String, to: &String) -> Result<Distance> {
        if from == to {
            return Ok(0);
        }
        self.edge_weight(from, to)
            .ok_or_else(|| Error::invalid(format!("'{}' and '{}' are not adjacent", from, to)))
    }

    fn estimated_distance(&self, from: &String, to: &String) -> Result<Distance> {
        let (a, b) = (self.location(from)?, self.location(to)?);
        if from == to {
            return Ok(0);
        }
        let estimate = match (self.heuristic, a, b) {
            (HeuristicKind::Manhattan, Some((x1, y1)), Some((x2, y2))) => {
                clamp(x1.abs_diff(x2).saturating_add(y1.abs_diff(y2)))
            }
            (HeuristicKind::Euclidean, Some((x1, y1)), Some((x2, y2))) => {
                let dx = x1.abs_diff(x2) as f64;
                let dy = y1.abs_diff(y2) as f64;
                clamp(dx.hypot(dy).floor() as u64)
            }
            _ => 1,
        };
        // Distinct nodes never estimate to zero; zero means "same node".
        Ok(estimate.max(1))
    }

    fn validate_node(&self, node: &String) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::invalid(format!("unknown node '{}'", node)))
        }
    }
}

fn clamp(distance: u64) -> Distance {
    Distance::try_from(distance).unwrap_or(Distance::MAX)
}
