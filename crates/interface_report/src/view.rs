//! Template view model
//!
//! Flattens a case into label/value rows so the template needs no
//! knowledge of individual section shapes. Labels come from the camelCase
//! field names; enum values are shown in sentence case.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use domain_case::sections::{sentence_case, PhysicalInjury};
use domain_case::{
    completion, registry, suggestions, Case, CompletionReport, SectionPayload, Suggestion,
    SuggestionSummary,
};

/// Everything the report template renders
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub case_number: String,
    pub status: String,
    pub completion: CompletionReport,
    pub created_at: String,
    pub updated_at: String,
    pub generated_at: String,
    pub sections: Vec<SectionView>,
    pub suggestions: Vec<SuggestionView>,
    pub summary: SuggestionSummary,
}

/// One registry section
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub id: String,
    pub name: &'static str,
    pub complete: bool,
    pub recorded: bool,
    pub fields: Vec<FieldView>,
}

/// A suggestion labelled with its section's display name
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    pub section: &'static str,
    pub severity: String,
    pub message: &'static str,
}

impl From<&Suggestion> for SuggestionView {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            section: registry::definition(suggestion.section).name,
            severity: suggestion.severity.to_string(),
            message: suggestion.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub label: String,
    pub value: String,
}

impl ReportView {
    /// Builds the view for `case` as of `generated_at`
    pub fn build(case: &Case, generated_at: DateTime<Utc>) -> Self {
        let sections = registry::sections()
            .iter()
            .map(|definition| {
                let fields = case
                    .sections
                    .get(definition.id)
                    .map(|payload| section_fields(&payload))
                    .unwrap_or_default();

                SectionView {
                    id: definition.id.as_str().to_string(),
                    name: definition.name,
                    complete: (definition.is_complete)(case),
                    recorded: case.sections.is_recorded(definition.id),
                    fields,
                }
            })
            .collect();

        let suggestions = suggestions::analyze(case);
        let summary = SuggestionSummary::from_suggestions(&suggestions);

        Self {
            case_number: case.case_number.clone(),
            status: sentence_case(case.status.as_str()),
            completion: completion::progress(case),
            created_at: format_timestamp(case.created_at),
            updated_at: format_timestamp(case.updated_at),
            generated_at: format_timestamp(generated_at),
            sections,
            suggestions: suggestions.iter().map(SuggestionView::from).collect(),
            summary,
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%d %B %Y %H:%M UTC").to_string()
}

fn section_fields(payload: &SectionPayload) -> Vec<FieldView> {
    match payload {
        SectionPayload::PhysicalInjury(physical) => physical_fields(physical),
        other => other
            .to_json()
            .map(|document| fields_of(&document))
            .unwrap_or_default(),
    }
}

/// Injury rows are headed by the injured region
fn physical_fields(physical: &PhysicalInjury) -> Vec<FieldView> {
    let mut fields: Vec<FieldView> = physical
        .injuries
        .iter()
        .enumerate()
        .filter_map(|(index, injury)| {
            let value = serde_json::to_value(injury).ok().map(|v| display_value(&v))?;
            (!value.is_empty()).then(|| FieldView {
                label: format!("Injury {} ({})", index + 1, injury.region_label()),
                value,
            })
        })
        .collect();

    if let Ok(Value::Object(mut document)) = serde_json::to_value(physical) {
        document.remove("injuries");
        fields.extend(fields_of(&Value::Object(document)));
    }
    fields
}

/// Rows for one section document in field order, skipping empty values
pub fn fields_of(document: &Value) -> Vec<FieldView> {
    let Value::Object(map) = document else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    for (key, value) in map {
        let label = label_for(key);
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let rendered = display_value(item);
                    if !rendered.is_empty() {
                        fields.push(FieldView {
                            label: format!("{} {}", singular(&label), index + 1),
                            value: rendered,
                        });
                    }
                }
            }
            other => {
                let rendered = display_value(other);
                if !rendered.is_empty() {
                    fields.push(FieldView { label, value: rendered });
                }
            }
        }
    }
    fields
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if is_enum_value(s) => sentence_case(s),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| {
                let rendered = display_value(value);
                (!rendered.is_empty()).then(|| format!("{}: {}", label_for(key), rendered))
            })
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// snake_case identifiers such as `rear_end_collision`
fn is_enum_value(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_lowercase() || c == '_')
        && s.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

/// `dateOfBirth` -> `Date of birth`
pub fn label_for(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                words.push(' ');
            }
            words.push(c.to_ascii_lowercase());
        } else {
            words.push(c);
        }
    }
    sentence_case(&words)
}

fn singular(label: &str) -> String {
    label
        .strip_suffix("ies")
        .map(|stem| format!("{}y", stem))
        .or_else(|| label.strip_suffix('s').map(str::to_string))
        .unwrap_or_else(|| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_case::sections::{BodyRegion, ClaimantDetails, Injury};
    use serde_json::json;

    #[test]
    fn test_label_for() {
        assert_eq!(label_for("dateOfBirth"), "Date of birth");
        assert_eq!(label_for("fullName"), "Full name");
        assert_eq!(label_for("outlook"), "Outlook");
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("Injuries"), "Injury");
        assert_eq!(singular("Treatments"), "Treatment");
        assert_eq!(singular("Affected activities"), "Affected activity");
    }

    #[test]
    fn test_fields_of_flattens_documents() {
        let fields = fields_of(&json!({
            "fullName": "Jane Doe",
            "identityVerified": true,
            "gender": "prefer_not_to_say",
            "email": null,
        }));

        assert!(fields.contains(&FieldView {
            label: "Full name".to_string(),
            value: "Jane Doe".to_string()
        }));
        assert!(fields.contains(&FieldView {
            label: "Identity verified".to_string(),
            value: "Yes".to_string()
        }));
        assert!(fields.contains(&FieldView {
            label: "Gender".to_string(),
            value: "Prefer not to say".to_string()
        }));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_fields_of_numbers_list_items() {
        let fields = fields_of(&json!({
            "injuries": [
                { "bodyRegion": "lower_back", "painScale": 4 },
                { "bodyRegion": "neck" }
            ]
        }));

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].label, "Injury 1");
        assert_eq!(fields[0].value, "Body region: Lower back; Pain scale: 4");
        assert_eq!(fields[1].label, "Injury 2");
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let document = SectionPayload::ClaimantDetails(ClaimantDetails {
            full_name: Some("Jane Doe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 15),
            address: Some("1 High Street".to_string()),
            occupation: Some("Teacher".to_string()),
            contact_number: Some("07700 900123".to_string()),
            ..Default::default()
        })
        .to_json()
        .unwrap();

        let labels: Vec<String> = fields_of(&document).into_iter().map(|f| f.label).collect();
        assert_eq!(
            labels,
            vec!["Full name", "Date of birth", "Address", "Occupation", "Contact number"]
        );
    }

    #[test]
    fn test_injury_rows_are_headed_by_region() {
        let fields = section_fields(&SectionPayload::PhysicalInjury(PhysicalInjury {
            injuries: vec![
                Injury {
                    body_region: Some(BodyRegion::UpperBack),
                    pain_scale: Some(5),
                    ..Default::default()
                },
                Injury {
                    body_region: Some(BodyRegion::Other),
                    body_region_other: Some("Jaw".to_string()),
                    ..Default::default()
                },
            ],
            additional_notes: Some("Soft tissue injuries".to_string()),
        }));

        assert_eq!(fields[0].label, "Injury 1 (Upper back)");
        assert_eq!(fields[0].value, "Body region: Upper back; Pain scale: 5");
        assert_eq!(fields[1].label, "Injury 2 (Jaw)");
        assert_eq!(fields[2].label, "Additional notes");
    }

    #[test]
    fn test_enum_values_are_sentence_cased() {
        assert_eq!(display_value(&json!("rear_end_collision")), "Rear end collision");
        assert_eq!(display_value(&json!("Neck pain, left side")), "Neck pain, left side");
    }
}
