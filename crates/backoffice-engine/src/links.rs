//! Presentation-link generation for resolved reports.
//!
//! The link generator is a collaborator contract: given a report view it may
//! return a display URL, or none. It never fails across this boundary; a
//! report the generator cannot link is simply rendered without one.

use crate::packages::ReportView;

/// Produces display URLs for resolved reports.
pub trait LinkGenerator: Send + Sync {
    /// Return the presentation URL for `report`, if one can be built.
    fn presentation_link(&self, report: &ReportView) -> Option<String>;
}

/// Link generator for the VTS report viewer.
///
/// Links are built from the report's token; tokenless reports get no link.
#[derive(Debug, Clone)]
pub struct VtsLinkGenerator {
    base_url: String,
}

impl VtsLinkGenerator {
    /// Create a generator pointing at the viewer's base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }
}

impl LinkGenerator for VtsLinkGenerator {
    fn presentation_link(&self, report: &ReportView) -> Option<String> {
        let token = report.token.as_ref()?;
        Some(format!("{}/report/{}", self.base_url, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::{ReportId, ReportToken, ReportTypeId};

    fn view_with_token(token: Option<ReportToken>) -> ReportView {
        ReportView {
            id: ReportId::new(10),
            report_type: ReportTypeId::new("VHR_SE_SV_HTML"),
            report_ref: "YV1MS384X42123456".into(),
            query: "YV1MS384X42123456".into(),
            active: true,
            token,
            link: None,
        }
    }

    #[test]
    fn link_built_from_token() {
        let links = VtsLinkGenerator::new("https://vts.example.com/");
        let view = view_with_token(Some(ReportToken::new("deadbeef")));
        assert_eq!(
            links.presentation_link(&view).as_deref(),
            Some("https://vts.example.com/report/deadbeef")
        );
    }

    #[test]
    fn tokenless_report_gets_no_link() {
        let links = VtsLinkGenerator::new("https://vts.example.com");
        let view = view_with_token(None);
        assert!(links.presentation_link(&view).is_none());
    }
}
