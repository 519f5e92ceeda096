// Headless model of the membership periods form.
//
// Responsibilities
// - Keep one PeriodList per span category, filled from the member's spans by the coalescer.
// - Answer what the form shows: which periods are visible and whether saving is possible.

use crate::modules::entities::core::collection::Collection;
use crate::modules::entities::core::errors::ModelError;
use crate::modules::entities::core::observers::Subscription;
use crate::modules::membership::core::coalesce::filter_periods;
use crate::modules::membership::core::period::Period;
use crate::modules::membership::core::span::{SpanCategory, TimeSpan};
use crate::modules::membership::models::span::SpanModel;
use crate::modules::membership::use_cases::edit_membership_periods::period_list::PeriodList;
use crate::shared::core::primitives::Millis;

pub struct MembershipPeriodsForm {
    lists: Vec<PeriodList>,
    show_historic: bool,
}

impl Default for MembershipPeriodsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MembershipPeriodsForm {
    pub fn new() -> Self {
        Self {
            lists: SpanCategory::ALL.into_iter().map(PeriodList::new).collect(),
            show_historic: true,
        }
    }

    pub fn lists(&self) -> &[PeriodList] {
        &self.lists
    }

    pub fn list(&self, category: SpanCategory) -> &PeriodList {
        &self.lists[index_of(category)]
    }

    pub fn list_mut(&mut self, category: SpanCategory) -> &mut PeriodList {
        &mut self.lists[index_of(category)]
    }

    /// Registers `callback` on every period list.
    pub fn subscribe(
        &self,
        callback: impl Fn() + Send + Sync + Clone + 'static,
    ) -> Vec<Subscription> {
        self.lists
            .iter()
            .map(|list| list.subscribe(callback.clone()))
            .collect()
    }

    pub fn load(&mut self, spans: &[TimeSpan]) {
        for list in &mut self.lists {
            list.replace(filter_periods(spans, list.category()));
        }
    }

    /// Fetches the spans and reloads every list. Lists are untouched if the fetch fails.
    pub async fn load_from(&mut self, spans: &mut Collection<SpanModel>) -> Result<(), ModelError> {
        spans.fetch().await?;
        self.load(&spans.time_spans());
        Ok(())
    }

    pub fn save_disabled(&self) -> bool {
        !self.lists.iter().any(PeriodList::is_dirty)
    }

    pub fn show_historic(&self) -> bool {
        self.show_historic
    }

    pub fn set_show_historic(&mut self, show_historic: bool) {
        self.show_historic = show_historic;
    }

    pub fn visible_periods(&self, category: SpanCategory, now: Millis) -> Vec<Period> {
        self.list(category)
            .periods()
            .iter()
            .filter(|p| self.show_historic || !p.is_historic(now))
            .copied()
            .collect()
    }
}

fn index_of(category: SpanCategory) -> usize {
    match category {
        SpanCategory::Labaccess => 0,
        SpanCategory::Membership => 1,
        SpanCategory::SpecialLabaccess => 2,
    }
}
