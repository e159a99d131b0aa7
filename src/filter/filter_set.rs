use super::EventFilter;
use crate::reader::Record;

/// Ordered set of [`EventFilter`]s combined with logical OR.
///
/// A record matched by the set is excluded from publication. The default set is empty and
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<EventFilter>,
}

impl FilterSet {
    /// Parses comma separated `source:eventName` pairs. Pairs that don't split into exactly two
    /// parts on `:` are skipped.
    pub fn parse(rules: &str) -> Self {
        let filters = rules
            .split(',')
            .filter_map(|rule| {
                let parts: Vec<&str> = rule.split(':').collect();
                match parts.as_slice() {
                    [source, event_name] => Some(EventFilter::new(source, event_name)),
                    _ => {
                        log::debug!("Skipping malformed event filter: {rule:?}");
                        None
                    }
                }
            })
            .collect();
        Self { filters }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().any(|filter| filter.matches(record))
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventFilter> {
        self.filters.iter()
    }
}
