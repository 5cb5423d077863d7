//! Form deep links.

use reqwest::Url;

use crate::coord::LonLat;
use crate::layer::ResourceType;
use crate::source::{PlanContext, SourceError};

/// Which form of a resource type to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Record a new asset.
    Survey,
    /// Report an existing asset as needing repair.
    Maintenance,
}

/// Path of the form for `resource_type`, relative to the form base URL.
///
/// Maintenance forms exist only for built structures.
pub fn form_path(resource_type: ResourceType, kind: FormKind) -> Option<&'static str> {
    match (kind, resource_type) {
        (FormKind::Survey, ResourceType::Settlement) => Some("forms/settlement"),
        (FormKind::Survey, ResourceType::Well) => Some("forms/well"),
        (FormKind::Survey, ResourceType::Waterbody) => Some("forms/waterbody"),
        (FormKind::Survey, ResourceType::Cropping) => Some("forms/cropping_pattern"),
        (FormKind::Survey, ResourceType::RechargeWork) => Some("forms/groundwater_work"),
        (FormKind::Survey, ResourceType::IrrigationWork) => Some("forms/agriculture_work"),
        (FormKind::Survey, ResourceType::LivelihoodWork) => Some("forms/livelihood"),
        (FormKind::Maintenance, ResourceType::Well) => Some("forms/well_maintenance"),
        (FormKind::Maintenance, ResourceType::Waterbody) => Some("forms/waterbody_maintenance"),
        (FormKind::Maintenance, ResourceType::RechargeWork) => Some("forms/groundwater_maintenance"),
        (FormKind::Maintenance, ResourceType::IrrigationWork) => {
            Some("forms/agriculture_maintenance")
        }
        (FormKind::Maintenance, _) => None,
    }
}

/// Builder for a form deep link.
#[derive(Debug, Clone)]
pub struct FormLink {
    base_url: String,
    resource_type: ResourceType,
    kind: FormKind,
    plan: PlanContext,
    at: LonLat,
    settlement_id: Option<String>,
}

impl FormLink {
    pub fn new(base_url: &str, resource_type: ResourceType, plan: &PlanContext, at: LonLat) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            resource_type,
            kind: FormKind::Survey,
            plan: plan.clone(),
            at,
            settlement_id: None,
        }
    }

    pub fn with_kind(mut self, kind: FormKind) -> Self {
        self.kind = kind;
        self
    }

    /// Tie the record to a settlement.
    pub fn with_settlement(mut self, settlement_id: &str) -> Self {
        self.settlement_id = Some(settlement_id.to_string());
        self
    }

    pub fn url(&self) -> Result<String, SourceError> {
        let path = form_path(self.resource_type, self.kind).ok_or_else(|| {
            SourceError::InvalidUrl {
                url: self.base_url.clone(),
                reason: format!("no {:?} form for {}", self.kind, self.resource_type),
            }
        })?;
        let base = format!("{}/{}", self.base_url, path);

        let mut url = Url::parse(&base).map_err(|e| SourceError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("latitude", &self.at.lat.to_string())
                .append_pair("longitude", &self.at.lon.to_string())
                .append_pair("plan_id", &self.plan.plan_id)
                .append_pair("plan_name", &self.plan.plan_name)
                .append_pair("district_name", &self.plan.district)
                .append_pair("block_name", &self.plan.block);
            if let Some(id) = &self.settlement_id {
                query.append_pair("settlement_id", id);
            }
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> PlanContext {
        PlanContext::new("7", "Check dam plan", "Bhilwara", "Mandalgarh")
    }

    fn params(url: &str) -> Vec<(String, String)> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_link_carries_position_and_plan() {
        let url = FormLink::new(
            "https://forms.example.org/",
            ResourceType::Well,
            &plan(),
            LonLat::new(75.25, 25.5),
        )
        .url()
        .unwrap();

        assert!(url.starts_with("https://forms.example.org/forms/well?"));
        let params = params(&url);
        assert!(params.contains(&("latitude".into(), "25.5".into())));
        assert!(params.contains(&("longitude".into(), "75.25".into())));
        assert!(params.contains(&("plan_name".into(), "Check dam plan".into())));
        assert!(params.contains(&("block_name".into(), "Mandalgarh".into())));
        assert!(!params.iter().any(|(k, _)| k == "settlement_id"));
    }

    #[test]
    fn test_settlement_id_added() {
        let url = FormLink::new(
            "https://forms.example.org",
            ResourceType::Cropping,
            &plan(),
            LonLat::new(75.0, 25.0),
        )
        .with_settlement("S-42")
        .url()
        .unwrap();

        assert!(params(&url).contains(&("settlement_id".into(), "S-42".into())));
    }

    #[test]
    fn test_missing_maintenance_form_is_an_error() {
        let link = FormLink::new(
            "https://forms.example.org",
            ResourceType::Settlement,
            &plan(),
            LonLat::new(75.0, 25.0),
        )
        .with_kind(FormKind::Maintenance);
        assert!(matches!(link.url(), Err(SourceError::InvalidUrl { .. })));
    }

    #[test]
    fn test_every_resource_has_a_survey_form() {
        for rt in ResourceType::ALL {
            assert!(form_path(rt, FormKind::Survey).is_some(), "{rt}");
        }
    }
}
