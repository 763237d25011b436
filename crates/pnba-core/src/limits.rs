//! Input validation limits for network files

/// Maximum length for node ids (256 chars)
pub const MAX_NODE_ID_LEN: usize = 256;

/// Maximum nodes in a network (1,000,000)
pub const MAX_NODES: usize = 1_000_000;

/// Maximum edges in a network (10,000,000)
pub const MAX_EDGES: usize = 10_000_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NodeIdTooLong { len: usize, max: usize },
    TooManyNodes { count: usize, max: usize },
    TooManyEdges { count: usize, max: usize },
    EmptyNodeId,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeIdTooLong { len, max } => {
                write!(f, "Node id too long: {} chars (max {})", len, max)
            }
            Self::TooManyNodes { count, max } => {
                write!(f, "Too many nodes: {} (max {})", count, max)
            }
            Self::TooManyEdges { count, max } => {
                write!(f, "Too many edges: {} (max {})", count, max)
            }
            Self::EmptyNodeId => write!(f, "Node id cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate node id
pub fn validate_node_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyNodeId);
    }
    if id.len() > MAX_NODE_ID_LEN {
        return Err(ValidationError::NodeIdTooLong {
            len: id.len(),
            max: MAX_NODE_ID_LEN,
        });
    }
    Ok(())
}

/// Validate node count
pub fn validate_node_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_NODES {
        return Err(ValidationError::TooManyNodes {
            count,
            max: MAX_NODES,
        });
    }
    Ok(())
}

/// Validate edge count
pub fn validate_edge_count(count: usize) -> Result<(), ValidationError> {
    if count > MAX_EDGES {
        return Err(ValidationError::TooManyEdges {
            count,
            max: MAX_EDGES,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_node_id() {
        assert!(validate_node_id("valid_node").is_ok());
        assert_eq!(validate_node_id(""), Err(ValidationError::EmptyNodeId));
        assert!(validate_node_id(&"x".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_counts() {
        assert!(validate_node_count(10).is_ok());
        assert!(validate_node_count(MAX_NODES + 1).is_err());
        assert!(validate_edge_count(MAX_EDGES).is_ok());
        assert!(validate_edge_count(MAX_EDGES + 1).is_err());
    }
}
