// Shared test fixtures for spans.
// Compiled into the crate only during tests (cfg(test) in src/lib.rs).

use crate::modules::membership::core::span::{SpanCategory, TimeSpan};
use crate::shared::core::primitives::{DAY_MS, Millis};

pub fn day(n: i64) -> Millis {
    n * DAY_MS
}

pub struct TimeSpanBuilder {
    inner: TimeSpan,
}

impl Default for TimeSpanBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeSpanBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimeSpan {
                start: 0,
                end: DAY_MS,
                category: SpanCategory::Labaccess,
                deleted_at: None,
            },
        }
    }

    pub fn start(mut self, v: Millis) -> Self {
        self.inner.start = v;
        self
    }

    pub fn end(mut self, v: Millis) -> Self {
        self.inner.end = v;
        self
    }

    pub fn category(mut self, v: SpanCategory) -> Self {
        self.inner.category = v;
        self
    }

    pub fn deleted_at(mut self, v: Millis) -> Self {
        self.inner.deleted_at = Some(v);
        self
    }

    pub fn build(self) -> TimeSpan {
        self.inner
    }
}

#[cfg(test)]
mod time_span_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_build_a_one_day_labaccess_span_by_default() {
        let span = TimeSpanBuilder::default().build();
        assert_eq!(span.start, 0);
        assert_eq!(span.end, DAY_MS);
        assert_eq!(span.category, SpanCategory::Labaccess);
        assert_eq!(span.deleted_at, None);
    }
}
