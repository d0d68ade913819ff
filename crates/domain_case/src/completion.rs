//! Completion calculator
//!
//! percentage = complete sections / registered sections × 100, rounded to the
//! nearest integer (half up). Each section counts fully or not at all.

use serde::Serialize;

use crate::case::Case;
use crate::registry::{self, SectionDefinition};
use crate::sections::SectionId;

/// Progress of a single section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgress {
    pub id: SectionId,
    pub name: &'static str,
    pub icon: &'static str,
    pub complete: bool,
}

/// Completion state of a whole case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub percentage: u8,
    pub completed_sections: usize,
    pub total_sections: usize,
    pub sections: Vec<SectionProgress>,
}

/// Rounds `complete / total` to a whole percentage
pub fn percentage(complete: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let complete = complete.min(total);
    ((complete * 100 + total / 2) / total) as u8
}

/// Number of sections whose predicate holds
pub fn completed_sections(case: &Case) -> usize {
    registry::sections()
        .iter()
        .filter(|definition| (definition.is_complete)(case))
        .count()
}

/// Completion percentage of a case (0-100)
pub fn calculate(case: &Case) -> u8 {
    percentage(completed_sections(case), registry::sections().len())
}

/// Per-section progress plus the overall percentage
pub fn progress(case: &Case) -> CompletionReport {
    let sections: Vec<SectionProgress> = registry::sections()
        .iter()
        .map(|definition: &SectionDefinition| SectionProgress {
            id: definition.id,
            name: definition.name,
            icon: definition.icon,
            complete: (definition.is_complete)(case),
        })
        .collect();

    let completed_sections = sections.iter().filter(|s| s.complete).count();
    let total_sections = sections.len();

    CompletionReport {
        percentage: percentage(completed_sections, total_sections),
        completed_sections,
        total_sections,
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 10), 0);
        assert_eq!(percentage(1, 10), 10);
        assert_eq!(percentage(10, 10), 100);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn test_percentage_edge_cases() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(12, 10), 100);
    }
}
