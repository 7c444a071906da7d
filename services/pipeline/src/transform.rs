//! Ads × CRM transformation
//!
//! Cleans both record sets, groups them by attribution key and derives one
//! [`MetricRow`] per ads group. Steps run in a fixed order because the row's
//! representative date / channel / campaign come from the first cleaned ads
//! record of its group.
//!
//! Ordering note: groups and their members keep first-seen order of the
//! cleaned input. The representative fields, and the order of the returned
//! rows, therefore depend on upstream array order. Callers must not rely on
//! any particular row order.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use types::ads::AdRecord;
use types::attribution::AttributionKey;
use types::calendar::day_start_utc;
use types::crm::OpportunityRecord;
use types::metric::{add_amount, MetricRow};

/// Ads record that passed cleaning.
#[derive(Debug, Clone)]
struct CleanAd<'a> {
    record: &'a AdRecord,
    key: AttributionKey,
}

/// Opportunity record that passed cleaning.
#[derive(Debug, Clone)]
struct CleanOpportunity<'a> {
    record: &'a OpportunityRecord,
    key: AttributionKey,
}

/// Records grouped by attribution key, keys in first-seen order.
#[derive(Debug)]
struct Grouping<T> {
    order: Vec<AttributionKey>,
    groups: HashMap<AttributionKey, Vec<T>>,
}

impl<T> Grouping<T> {
    fn build<I>(items: I, key_of: impl Fn(&T) -> &AttributionKey) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut order = Vec::new();
        let mut groups: HashMap<AttributionKey, Vec<T>> = HashMap::new();
        for item in items {
            let key = key_of(&item);
            match groups.get_mut(key) {
                Some(members) => members.push(item),
                None => {
                    order.push(key.clone());
                    groups.insert(key.clone(), vec![item]);
                }
            }
        }
        Self { order, groups }
    }

    fn get(&self, key: &AttributionKey) -> &[T] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    fn iter(&self) -> impl Iterator<Item = (&AttributionKey, &[T])> {
        self.order.iter().map(move |key| (key, self.get(key)))
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Stateless ads × CRM transformer. Safe to share across tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer;

impl Transformer {
    pub fn new() -> Self {
        Self
    }

    /// Derive metric rows from raw ads and CRM records.
    ///
    /// `since` drops ads dated strictly before it and opportunities created
    /// strictly before its midnight UTC; `None` means no lower bound.
    /// Invalid records are dropped and logged, never reported as errors.
    pub fn transform(
        &self,
        ads: &[AdRecord],
        crm: &[OpportunityRecord],
        since: Option<NaiveDate>,
    ) -> Vec<MetricRow> {
        info!(
            ads_records = ads.len(),
            crm_records = crm.len(),
            since = ?since,
            "Transforming data"
        );

        let cleaned_ads = clean_ads(ads, since);
        let cleaned_crm = clean_crm(crm, since);

        let ads_by_key = Grouping::build(cleaned_ads, |ad| &ad.key);
        let crm_by_key = Grouping::build(cleaned_crm, |opp| &opp.key);
        debug!(
            ads_groups = ads_by_key.len(),
            crm_groups = crm_by_key.len(),
            "Records grouped by attribution key"
        );

        let rows: Vec<MetricRow> = ads_by_key
            .iter()
            .map(|(key, ads)| derive_row(key, ads, crm_by_key.get(key)))
            .collect();

        info!(rows = rows.len(), "Transformed data into metric rows");
        rows
    }
}

// ── Cleaning ────────────────────────────────────────────────────────

fn clean_ads(ads: &[AdRecord], since: Option<NaiveDate>) -> Vec<CleanAd<'_>> {
    ads.iter()
        .filter_map(|record| {
            let day = match record.validate() {
                Ok(day) => day,
                Err(reason) => {
                    warn!(
                        ?reason,
                        date = %record.date,
                        campaign_id = %record.campaign_id,
                        channel = %record.channel,
                        "Dropping invalid ads record"
                    );
                    return None;
                }
            };
            if since.is_some_and(|bound| day < bound) {
                debug!(date = %record.date, "Ads record before since bound");
                return None;
            }
            Some(CleanAd {
                record,
                key: record.attribution_key(),
            })
        })
        .collect()
}

fn clean_crm(crm: &[OpportunityRecord], since: Option<NaiveDate>) -> Vec<CleanOpportunity<'_>> {
    let bound = since.map(day_start_utc);
    crm.iter()
        .filter_map(|record| {
            if let Err(reason) = record.validate() {
                warn!(
                    ?reason,
                    opportunity_id = %record.opportunity_id,
                    stage = %record.stage,
                    "Dropping invalid CRM record"
                );
                return None;
            }
            if bound.is_some_and(|bound| record.created_before(bound)) {
                debug!(
                    opportunity_id = %record.opportunity_id,
                    created_at = ?record.created_at,
                    "CRM record before since bound"
                );
                return None;
            }
            Some(CleanOpportunity {
                record,
                key: record.attribution_key(),
            })
        })
        .collect()
}

// ── Aggregation ─────────────────────────────────────────────────────

/// Aggregate one ads group and its matching CRM group into a row.
///
/// `ads` is never empty: groups only exist for keys that were seen.
fn derive_row(key: &AttributionKey, ads: &[CleanAd<'_>], crm: &[CleanOpportunity<'_>]) -> MetricRow {
    let mut row = match ads.first() {
        Some(first) => MetricRow::empty(
            &first.record.date,
            &first.record.channel,
            &first.record.campaign_id,
            key.clone(),
        ),
        None => MetricRow::empty("", "", "", key.clone()),
    };

    for ad in ads {
        row.clicks = row.clicks.saturating_add(ad.record.clicks);
        row.impressions = row.impressions.saturating_add(ad.record.impressions);
        row.cost = add_amount(row.cost, ad.record.cost);
    }

    for opp in crm {
        row.leads += 1;
        if opp.record.is_opportunity() {
            row.opportunities += 1;
        }
        if opp.record.is_closed_won() {
            row.closed_won += 1;
            row.revenue = add_amount(row.revenue, opp.record.amount);
        }
    }

    row.compute_ratios();
    row
}
