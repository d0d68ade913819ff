//! Section DTOs

use serde::Serialize;
use serde_json::Value;

use domain_case::{SectionDefinition, SectionId};

/// A registry entry, in display order
#[derive(Debug, Serialize)]
pub struct SectionDefinitionResponse {
    pub id: SectionId,
    pub name: &'static str,
    pub icon: &'static str,
    pub position: usize,
}

impl SectionDefinitionResponse {
    pub fn new(position: usize, definition: &SectionDefinition) -> Self {
        Self {
            id: definition.id,
            name: definition.name,
            icon: definition.icon,
            position,
        }
    }
}

/// One section of one case
#[derive(Debug, Serialize)]
pub struct SectionResponse {
    pub id: SectionId,
    pub name: &'static str,
    pub complete: bool,
    /// The stored sub-object, `null` when not yet recorded
    pub data: Option<Value>,
}
