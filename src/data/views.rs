use std::collections::BTreeMap;

use super::filter::{filter, FilterCriteria, SiteSelector};
use super::model::{LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Success summary (pie chart data)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SuccessSummary {
    /// All-sites mode: successful launches per site.  Failures are not
    /// counted, but a site present in the subset with no successes is kept
    /// with a zero count.
    BySite(BTreeMap<String, usize>),
    /// Single-site mode: both outcomes within the selected site.
    SiteOutcomes {
        site: String,
        success: usize,
        failure: usize,
    },
}

impl SuccessSummary {
    /// Sum of every slice.
    pub fn total(&self) -> usize {
        match self {
            SuccessSummary::BySite(counts) => counts.values().sum(),
            SuccessSummary::SiteOutcomes {
                success, failure, ..
            } => success + failure,
        }
    }

    /// Nothing to draw: renders as a placeholder.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// `(label, count)` pairs in display order.
    pub fn slices(&self) -> Vec<(String, usize)> {
        match self {
            SuccessSummary::BySite(counts) => counts
                .iter()
                .map(|(site, &n)| (site.clone(), n))
                .collect(),
            SuccessSummary::SiteOutcomes {
                success, failure, ..
            } => vec![
                (Outcome::Success.to_string(), *success),
                (Outcome::Failure.to_string(), *failure),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Correlation view (strip chart data)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

impl From<&LaunchRecord> for CorrelationPoint {
    fn from(rec: &LaunchRecord) -> Self {
        CorrelationPoint {
            launch_site: rec.launch_site.clone(),
            payload_mass_kg: rec.payload_mass_kg,
            outcome: rec.outcome,
            booster_version_category: rec.booster_version_category.clone(),
        }
    }
}

/// One point per filtered record, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationView {
    pub points: Vec<CorrelationPoint>,
}

impl CorrelationView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Group points by booster version category for per-series plotting.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&CorrelationPoint>> {
        let mut groups: BTreeMap<&str, Vec<&CorrelationPoint>> = BTreeMap::new();
        for p in &self.points {
            groups
                .entry(p.booster_version_category.as_str())
                .or_default()
                .push(p);
        }
        groups
    }
}

// ---------------------------------------------------------------------------
// DerivedViews – both views from one subset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedViews {
    pub summary: SuccessSummary,
    pub correlation: CorrelationView,
    pub summary_title: String,
    pub correlation_title: String,
    /// Number of records both views were computed from.
    pub subset_len: usize,
}

impl DerivedViews {
    /// Filter the dataset once and build both views from that subset.
    pub fn compute(dataset: &LaunchDataset, criteria: &FilterCriteria) -> Self {
        let subset = filter(dataset.records(), criteria);
        log::debug!(
            "site={} payload={}: {} of {} records",
            criteria.site.label(),
            criteria.range,
            subset.len(),
            dataset.len()
        );
        log::trace!("filtered records: {subset:#?}");
        build_views(&subset, &criteria.site)
    }
}

pub fn summary_title(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "Total Success Launches By Site".to_string(),
        SiteSelector::Site(s) => format!("Total Success Launches for Site {s}"),
    }
}

pub fn correlation_title(site: &SiteSelector) -> String {
    match site {
        SiteSelector::All => "Correlation for Payload and Success for All Sites".to_string(),
        SiteSelector::Site(s) => format!("Correlation for Payload and Success for Site {s}"),
    }
}

/// Build the success summary and correlation view for an already filtered
/// subset.  `site` selects the summary mode and the titles.
pub fn build_views(subset: &[&LaunchRecord], site: &SiteSelector) -> DerivedViews {
    let summary = match site {
        SiteSelector::All => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for rec in subset {
                let n = counts.entry(rec.launch_site.clone()).or_default();
                if rec.outcome.is_success() {
                    *n += 1;
                }
            }
            SuccessSummary::BySite(counts)
        }
        SiteSelector::Site(name) => {
            let success = subset.iter().filter(|r| r.outcome.is_success()).count();
            SuccessSummary::SiteOutcomes {
                site: name.clone(),
                success,
                failure: subset.len() - success,
            }
        }
    };

    let correlation = CorrelationView {
        points: subset.iter().map(|&rec| CorrelationPoint::from(rec)).collect(),
    };

    DerivedViews {
        summary,
        correlation,
        summary_title: summary_title(site),
        correlation_title: correlation_title(site),
        subset_len: subset.len(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::filter::tests::{arb_criteria, arb_dataset, selector};
    use crate::data::filter::PayloadRange;
    use crate::data::model::tests::four_launches;

    fn compute(site: &str, lo: f64, hi: f64) -> DerivedViews {
        let criteria = FilterCriteria::new(
            selector(site),
            PayloadRange::new(lo, hi).unwrap(),
        );
        DerivedViews::compute(&four_launches(), &criteria)
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let views = compute("ALL", 0.0, 10000.0);
        let expected: BTreeMap<String, usize> =
            [("SiteA".to_string(), 1), ("SiteB".to_string(), 1)].into();
        assert_eq!(views.summary, SuccessSummary::BySite(expected));
        assert_eq!(views.correlation.points.len(), 4);
        assert_eq!(views.subset_len, 4);
        assert_eq!(views.summary_title, "Total Success Launches By Site");
        assert_eq!(
            views.correlation_title,
            "Correlation for Payload and Success for All Sites"
        );
    }

    #[test]
    fn single_site_counts_both_outcomes() {
        let views = compute("SiteA", 0.0, 10000.0);
        assert_eq!(
            views.summary,
            SuccessSummary::SiteOutcomes {
                site: "SiteA".into(),
                success: 1,
                failure: 1,
            }
        );
        assert_eq!(views.correlation.points.len(), 2);
        assert!(views
            .correlation
            .points
            .iter()
            .all(|p| p.launch_site == "SiteA"));
        assert_eq!(views.summary_title, "Total Success Launches for Site SiteA");
        assert_eq!(
            views.correlation_title,
            "Correlation for Payload and Success for Site SiteA"
        );
    }

    #[test]
    fn empty_subset_gives_empty_views() {
        let views = compute("ALL", 1000.0, 1999.0);
        assert_eq!(views.summary, SuccessSummary::BySite(BTreeMap::new()));
        assert!(views.summary.is_empty());
        assert!(views.summary.slices().is_empty());
        assert!(views.correlation.is_empty());

        let views = compute("Cape Nowhere", 0.0, 10000.0);
        assert!(views.summary.is_empty());
        assert_eq!(views.summary.slices().len(), 2);
        assert!(views.correlation.is_empty());
    }

    #[test]
    fn exact_payload_match_on_one_site() {
        let views = compute("SiteB", 9000.0, 9000.0);
        assert_eq!(
            views.summary,
            SuccessSummary::SiteOutcomes {
                site: "SiteB".into(),
                success: 0,
                failure: 1,
            }
        );
        assert_eq!(views.correlation.points[0].payload_mass_kg, 9000.0);
        assert_eq!(views.correlation.points[0].outcome, Outcome::Failure);
    }

    #[test]
    fn failures_only_site_keeps_zero_slice_in_all_mode() {
        // Only the 2000 kg SiteA failure falls in this range.
        let views = compute("ALL", 1500.0, 2500.0);
        assert_eq!(views.summary.slices(), [("SiteA".to_string(), 0)]);
        assert!(views.summary.is_empty());
        assert_eq!(views.correlation.points.len(), 1);
    }

    #[test]
    fn slices_for_single_site() {
        let views = compute("SiteB", 0.0, 10000.0);
        assert_eq!(
            views.summary.slices(),
            [("Success".to_string(), 1), ("Failure".to_string(), 1)]
        );
    }

    #[test]
    fn correlation_groups_by_booster_category() {
        let views = compute("ALL", 0.0, 10000.0);
        let groups = views.correlation.by_category();
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), ["v1", "v2"]);
        assert_eq!(groups["v1"].len(), 2);
        assert_eq!(groups["v2"].len(), 2);
    }

    proptest! {
        #[test]
        fn views_agree_on_subset(ds in arb_dataset(), c in arb_criteria()) {
            let subset = filter(ds.records(), &c);
            let views = DerivedViews::compute(&ds, &c);
            prop_assert_eq!(views.subset_len, subset.len());
            prop_assert_eq!(views.correlation.points.len(), subset.len());
            match &views.summary {
                SuccessSummary::BySite(_) => {
                    prop_assert!(views.summary.total() <= subset.len());
                }
                SuccessSummary::SiteOutcomes { success, failure, .. } => {
                    prop_assert_eq!(success + failure, subset.len());
                }
            }
        }
    }
}
