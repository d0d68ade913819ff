use chrono::{DateTime, Utc};
use tera::{Context, Tera};
use tracing::debug;

use domain_case::Case;

use crate::error::ExportError;
use crate::view::ReportView;

/// Template name; the `.html` suffix turns on Tera's auto-escaping
pub const REPORT_TEMPLATE_NAME: &str = "report.html";

const REPORT_TEMPLATE: &str = include_str!("../templates/report.html.tera");

/// Renders case reports with a parsed template
///
/// Parsing happens once in [`ReportRenderer::new`]; rendering is then
/// cheap and can be shared across requests.
#[derive(Debug)]
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    /// Loads the built-in report template
    pub fn new() -> Result<Self, ExportError> {
        Self::with_template(REPORT_TEMPLATE)
    }

    /// Uses a caller-supplied template instead of the built-in one
    pub fn with_template(template_content: &str) -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.add_raw_template(REPORT_TEMPLATE_NAME, template_content)
            .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    /// Renders the report for `case`, stamped with the current time
    pub fn render(&self, case: &Case) -> Result<String, ExportError> {
        self.render_at(case, Utc::now())
    }

    /// Renders the report for `case`, stamped with `generated_at`
    pub fn render_at(&self, case: &Case, generated_at: DateTime<Utc>) -> Result<String, ExportError> {
        let view = ReportView::build(case, generated_at);
        let context = Context::from_serialize(&view)
            .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

        let html = self.tera.render(REPORT_TEMPLATE_NAME, &context)?;
        debug!(case_number = %case.case_number, bytes = html.len(), "Rendered report preview");
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_parses() {
        assert!(ReportRenderer::new().is_ok());
    }

    #[test]
    fn test_invalid_template_is_parse_error() {
        let err = ReportRenderer::with_template("{% for x in %}").unwrap_err();
        assert!(matches!(err, ExportError::TemplateParse(_)));
    }
}
