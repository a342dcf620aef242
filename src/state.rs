use crate::color::ColorMap;
use crate::data::filter::{CriteriaError, FilterCriteria, PayloadRange, SiteSelector};
use crate::data::model::LaunchDataset;
use crate::data::views::DerivedViews;

/// Half the slider step: values closer than this to a payload bound are the bound.
const SLIDER_SNAP_KG: f64 = 0.5;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded at startup; never modified afterwards.
    dataset: LaunchDataset,

    /// Current site selector value.
    pub site: SiteSelector,

    /// Current payload slider values, kept within the dataset bounds with
    /// `range_lo <= range_hi`.
    pub range_lo: f64,
    pub range_hi: f64,

    /// Views for the current criteria (cached).
    pub views: DerivedViews,

    /// Colours per launch site (pie slices).
    pub site_colors: ColorMap,

    /// Colours per booster version category (strip chart series).
    pub category_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start with all sites and the full observed payload range.
    pub fn new(dataset: LaunchDataset) -> Self {
        let range_lo = dataset.payload_min();
        let range_hi = dataset.payload_max();
        let site = SiteSelector::All;
        let criteria = FilterCriteria::new(site.clone(), PayloadRange::observed(&dataset));
        let views = DerivedViews::compute(&dataset, &criteria);

        Self {
            site_colors: ColorMap::new(dataset.sites()),
            category_colors: ColorMap::new(dataset.booster_categories()),
            dataset,
            site,
            range_lo,
            range_hi,
            views,
            status_message: None,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    /// Selector options: "All Sites" first, then every distinct site.
    pub fn site_options(&self) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::All)
            .chain(
                self.dataset
                    .sites()
                    .iter()
                    .map(|s| SiteSelector::Site(s.clone())),
            )
            .collect()
    }

    /// Criteria for the current control values.
    pub fn criteria(&self) -> Result<FilterCriteria, CriteriaError> {
        let range = PayloadRange::new(self.range_lo, self.range_hi)?
            .clamp_to(self.dataset.payload_min(), self.dataset.payload_max());
        Ok(FilterCriteria::new(self.site.clone(), range))
    }

    /// Recompute both views after a control change.
    pub fn refresh(&mut self) {
        match self.criteria() {
            Ok(criteria) => {
                self.views = DerivedViews::compute(&self.dataset, &criteria);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Rejected filter criteria: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_site(&mut self, site: SiteSelector) {
        if site != self.site {
            self.site = site;
            self.refresh();
        }
    }

    /// Move the lower payload bound; the upper bound follows if crossed.
    pub fn set_range_lo(&mut self, value: f64) {
        let lo = self.clamp_payload(value);
        let hi = self.range_hi.max(lo);
        self.set_range(lo, hi);
    }

    /// Move the upper payload bound; the lower bound follows if crossed.
    pub fn set_range_hi(&mut self, value: f64) {
        let hi = self.clamp_payload(value);
        let lo = self.range_lo.min(hi);
        self.set_range(lo, hi);
    }

    pub fn reset_range(&mut self) {
        self.set_range(self.dataset.payload_min(), self.dataset.payload_max());
    }

    fn set_range(&mut self, lo: f64, hi: f64) {
        if lo != self.range_lo || hi != self.range_hi {
            self.range_lo = lo;
            self.range_hi = hi;
            self.refresh();
        }
    }

    /// Clamp into the observed payload bounds; NaN falls back to the minimum.
    /// The sliders move in whole kilograms, so a value that rounds to a
    /// fractional bound snaps onto the bound itself.
    fn clamp_payload(&self, value: f64) -> f64 {
        let (min, max) = (self.dataset.payload_min(), self.dataset.payload_max());
        if value.is_nan() {
            return min;
        }
        let value = value.clamp(min, max);
        if max - value < SLIDER_SNAP_KG {
            max
        } else if value - min < SLIDER_SNAP_KG {
            min
        } else {
            value
        }
    }
}
