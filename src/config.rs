//! Definition-time configuration.

use crate::error::DefinitionError;

/// Configuration applied while sealing a protocol.
///
/// The reserved names describe the host object model: a provided instance
/// member may not shadow the construction hook, and a provided static member
/// may not shadow the link to the shared instance template.
#[derive(Debug, Clone)]
pub struct DefineConfig {
    /// Name reserved for provided instance members.
    pub construction_hook: String,
    /// Name reserved for provided static members.
    pub template_link: String,
    /// Maximum number of members one protocol may declare.
    pub max_members: usize,
    /// Maximum number of protocols one protocol may directly extend.
    pub max_parents: usize,
}

impl Default for DefineConfig {
    fn default() -> Self {
        Self {
            construction_hook: "constructor".to_string(),
            template_link: "prototype".to_string(),
            max_members: 1024,
            max_parents: 256,
        }
    }
}

impl DefineConfig {
    pub fn validate(self) -> Result<Self, DefinitionError> {
        if self.construction_hook.trim().is_empty() {
            return Err(DefinitionError::InvalidConfig {
                reason: "construction_hook must not be empty".to_string(),
            });
        }
        if self.template_link.trim().is_empty() {
            return Err(DefinitionError::InvalidConfig {
                reason: "template_link must not be empty".to_string(),
            });
        }
        if self.max_members == 0 || self.max_parents == 0 {
            return Err(DefinitionError::InvalidConfig {
                reason: format!(
                    "limits must be non-zero (max_members={}, max_parents={})",
                    self.max_members, self.max_parents
                ),
            });
        }
        Ok(self)
    }
}
