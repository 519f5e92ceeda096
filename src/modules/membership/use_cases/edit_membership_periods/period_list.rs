// Editable list of periods for one category.
//
// Invariants
// - `replace` makes the list clean: the replaced periods become the reference snapshot.
// - The list is dirty exactly when the current periods differ from that snapshot.

use crate::modules::entities::core::observers::{Observers, Subscription};
use crate::modules::membership::core::period::Period;
use crate::modules::membership::core::span::SpanCategory;
use crate::shared::core::primitives::Millis;

pub struct PeriodList {
    category: SpanCategory,
    periods: Vec<Period>,
    snapshot: Vec<Period>,
    observers: Observers,
}

impl PeriodList {
    pub fn new(category: SpanCategory) -> Self {
        Self {
            category,
            periods: Vec::new(),
            snapshot: Vec::new(),
            observers: Observers::new(),
        }
    }

    pub fn category(&self) -> SpanCategory {
        self.category
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.observers.subscribe(callback)
    }

    pub fn replace(&mut self, periods: Vec<Period>) {
        self.snapshot = periods.clone();
        self.periods = periods;
        self.observers.notify();
    }

    pub fn add(&mut self, start: Millis, end: Millis) {
        self.periods.push(Period {
            start,
            end,
            category: self.category,
        });
        self.observers.notify();
    }

    pub fn update(&mut self, index: usize, start: Millis, end: Millis) -> bool {
        let Some(period) = self.periods.get_mut(index) else {
            return false;
        };
        period.start = start;
        period.end = end;
        self.observers.notify();
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<Period> {
        if index >= self.periods.len() {
            return None;
        }
        let removed = self.periods.remove(index);
        self.observers.notify();
        Some(removed)
    }

    pub fn is_dirty(&self) -> bool {
        self.periods != self.snapshot
    }
}
