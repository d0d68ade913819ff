//! interface_report
//!
//! Printable HTML preview of a medical-legal report. The document is
//! self-contained (inline styles) and meant to be printed to PDF from a
//! browser.

pub mod error;
pub mod render;
pub mod view;

pub use error::ExportError;
pub use render::{ReportRenderer, REPORT_TEMPLATE_NAME};
pub use view::{FieldView, ReportView, SectionView, SuggestionView};
