//! Issuance intake forms: bulk issuance by CSV and the single-issuance quote request.

use crate::errors::AppError;
use crate::models::{CoverOption, PricingGrid};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Who receives the issued policy emails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailPreference {
    #[default]
    Customer,
    Operator,
}

/// State of the bulk-issuance form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkIssuanceDraft {
    pub cover: Option<CoverOption>,
    #[serde(default)]
    pub email_preference: EmailPreference,
    /// Chosen option type per trip duration (days).
    #[serde(default)]
    pub selected_pricing: BTreeMap<i64, String>,
    pub csv_file_name: Option<String>,
}

impl BulkIssuanceDraft {
    /// Selects a cover; any pricing chosen for the previous cover is dropped.
    pub fn select_cover(&mut self, cover: CoverOption) {
        self.cover = Some(cover);
        self.selected_pricing.clear();
    }

    pub fn clear_cover(&mut self) {
        self.cover = None;
        self.selected_pricing.clear();
    }

    /// Picks the `option_type` cell for the `days` row; the cell must exist in `grid`.
    pub fn select_pricing(
        &mut self,
        grid: &PricingGrid,
        days: i64,
        option_type: &str,
    ) -> Result<(), AppError> {
        if self.cover.is_none() {
            return Err(AppError::BadRequest(
                "Select a cover before choosing a price".to_string(),
            ));
        }
        if grid.cell(days, option_type).is_none() {
            return Err(AppError::BadRequest(format!(
                "No {} price for {} days",
                option_type, days
            )));
        }
        self.selected_pricing.insert(days, option_type.to_string());
        Ok(())
    }

    /// Accepts the file if it is a `.csv`; other files leave the draft unchanged.
    pub fn accept_csv(&mut self, file_name: &str) -> bool {
        if !is_csv_file_name(file_name) {
            return false;
        }
        self.csv_file_name = Some(file_name.to_string());
        true
    }

    pub fn is_ready(&self) -> bool {
        self.cover.is_some() && self.csv_file_name.is_some()
    }
}

pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name.ends_with(".csv")
}

/// Bulk-issuance form as submitted for preview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkIssuanceRequest {
    pub cover_id: i64,
    #[serde(default)]
    pub email_preference: EmailPreference,
    /// Option type per duration in days.
    #[serde(default)]
    pub selections: BTreeMap<i64, String>,
    pub csv_file_name: Option<String>,
}

impl BulkIssuanceRequest {
    /// Replays the request through a draft, checking it against the operator's
    /// covers and the chosen cover's price grid.
    pub fn into_draft(
        self,
        covers: &[CoverOption],
        grid: &PricingGrid,
    ) -> Result<BulkIssuanceDraft, AppError> {
        let cover = covers
            .iter()
            .find(|c| c.id == self.cover_id)
            .cloned()
            .ok_or_else(|| {
                AppError::BadRequest(format!("Cover {} is not available", self.cover_id))
            })?;

        let mut draft = BulkIssuanceDraft {
            email_preference: self.email_preference,
            ..Default::default()
        };
        draft.select_cover(cover);

        for (days, option_type) in &self.selections {
            draft.select_pricing(grid, *days, option_type)?;
        }

        if let Some(file_name) = self.csv_file_name.as_deref() {
            if !draft.accept_csv(file_name) {
                return Err(AppError::BadRequest(format!(
                    "{} is not a CSV file",
                    file_name
                )));
            }
        }

        Ok(draft)
    }
}

/// The single-issuance "Get Quote" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub nationality: String,
    pub travelling_from: String,
    pub travelling_to: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adventure: String,
    #[serde(default = "default_pax")]
    pub num_people: u32,
    /// One age per passenger, in passenger order.
    #[serde(default)]
    pub ages: Vec<u32>,
}

fn default_pax() -> u32 {
    1
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("nationality", &self.nationality),
            ("travelling_from", &self.travelling_from),
            ("travelling_to", &self.travelling_to),
            ("adventure", &self.adventure),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(AppError::BadRequest(format!("{} is required", name)));
        }

        if self.end_date < self.start_date {
            return Err(AppError::BadRequest(
                "end_date cannot be before start_date".to_string(),
            ));
        }

        if self.num_people == 0 {
            return Err(AppError::BadRequest(
                "num_people must be at least 1".to_string(),
            ));
        }

        if self.ages.len() != self.num_people as usize {
            return Err(AppError::BadRequest(format!(
                "Expected {} ages, got {}",
                self.num_people,
                self.ages.len()
            )));
        }

        Ok(())
    }

    /// Trip length in days, both ends inclusive.
    pub fn trip_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
