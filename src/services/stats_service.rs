//! Per-link statistics

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::errors::{LeadlinkerError, Result};
use crate::storage::{
    EventKind, EventStore, Field, FormStore, Link, LinkEvent, LinkStore, Stores, Submission,
    SubmissionStore,
};

pub const RECENT_EVENTS_LIMIT: u64 = 100;
pub const RECENT_SUBMISSIONS_LIMIT: u64 = 50;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total_clicks: i64,
    pub total_leads: i64,
    /// leads / clicks * 100, rounded to two decimals
    pub conversion_rate: f64,
    pub events_by_kind: BTreeMap<EventKind, u64>,
    pub recent_events: Vec<LinkEvent>,
    pub recent_submissions: Vec<Submission>,
    pub form_fields: Vec<Field>,
}

pub fn conversion_rate(clicks: i64, leads: i64) -> f64 {
    if clicks <= 0 {
        return 0.0;
    }
    let rate = leads as f64 / clicks as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

pub struct LinkStatsService {
    links: Arc<dyn LinkStore>,
    forms: Arc<dyn FormStore>,
    submissions: Arc<dyn SubmissionStore>,
    events: Arc<dyn EventStore>,
}

impl LinkStatsService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            links: stores.links.clone(),
            forms: stores.forms.clone(),
            submissions: stores.submissions.clone(),
            events: stores.events.clone(),
        }
    }

    pub async fn link_stats(&self, owner_id: &str, id: &str) -> Result<LinkStats> {
        let link: Link = self
            .links
            .get_link(id)
            .await?
            .filter(|link| link.owner_id == owner_id)
            .ok_or_else(|| LeadlinkerError::not_found(format!("Link not found: {}", id)))?;

        let events_by_kind = self.events.count_by_kind(&link.id).await?;
        let recent_events = self
            .events
            .recent_events(&link.id, RECENT_EVENTS_LIMIT)
            .await?;
        let recent_submissions = self
            .submissions
            .recent_submissions(&link.id, RECENT_SUBMISSIONS_LIMIT)
            .await?;
        let form_fields = match link.form_id.as_deref() {
            Some(form_id) => self
                .forms
                .get_form(form_id)
                .await?
                .map(|form| form.fields)
                .unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(LinkStats {
            total_clicks: link.click_count,
            total_leads: link.lead_count,
            conversion_rate: conversion_rate(link.click_count, link.lead_count),
            events_by_kind,
            recent_events,
            recent_submissions,
            form_fields,
        })
    }
}
