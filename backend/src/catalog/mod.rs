//! Role catalog
//!
//! Static registry of demo roles. Loaded once (built in, or deserialized from
//! JSON), validated, and then only ever read.

mod builtin;

use crate::models::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Problems found while validating a catalog
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog has no roles")]
    Empty,

    #[error("Duplicate role ID: {0}")]
    DuplicateRole(String),

    #[error("Role {role} has no agents")]
    NoAgents { role: String },

    #[error("Duplicate agent ID {agent} in role {role}")]
    DuplicateAgent { role: String, agent: String },

    #[error("Agent {agent} in role {role} has no task labels")]
    NoTasks { role: String, agent: String },

    #[error("Role {role} has no sample queries")]
    NoSampleQueries { role: String },

    #[error("Sample query {index} of role {role} is blank")]
    BlankSampleQuery { role: String, index: usize },
}

/// Ordered collection of roles
///
/// # Example
/// ```
/// use agent_demo_core_rs::RoleCatalog;
///
/// let catalog = RoleCatalog::builtin();
/// assert!(catalog.validate().is_ok());
/// assert_eq!(catalog.first().map(|r| r.id.as_str()), Some("investor"));
/// assert!(catalog.get("legal").is_some());
/// assert!(catalog.get("astronaut").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

impl RoleCatalog {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Four-role catalog with layered rosters and delivery metrics
    pub fn builtin() -> Self {
        Self::new(builtin::layered_roles())
    }

    /// Single role with three core-layer agents
    pub fn classic() -> Self {
        Self::new(vec![builtin::classic_team()])
    }

    /// Parse a catalog from its JSON form (an array of roles)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn first(&self) -> Option<&Role> {
        self.roles.first()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|role| role.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Check structural rules every consumer relies on
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.roles.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut role_ids = HashSet::new();
        for role in &self.roles {
            if !role_ids.insert(role.id.as_str()) {
                return Err(CatalogError::DuplicateRole(role.id.clone()));
            }
            if role.agents.is_empty() {
                return Err(CatalogError::NoAgents {
                    role: role.id.clone(),
                });
            }
            if role.sample_queries.is_empty() {
                return Err(CatalogError::NoSampleQueries {
                    role: role.id.clone(),
                });
            }
            if let Some(index) = role.sample_queries.iter().position(|q| q.trim().is_empty()) {
                return Err(CatalogError::BlankSampleQuery {
                    role: role.id.clone(),
                    index,
                });
            }

            let mut agent_ids = HashSet::new();
            for agent in &role.agents {
                if !agent_ids.insert(agent.id.as_str()) {
                    return Err(CatalogError::DuplicateAgent {
                        role: role.id.clone(),
                        agent: agent.id.clone(),
                    });
                }
                if agent.tasks.is_empty() {
                    return Err(CatalogError::NoTasks {
                        role: role.id.clone(),
                        agent: agent.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
