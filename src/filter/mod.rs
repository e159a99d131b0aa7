mod event_filter;
mod filter_set;

pub use event_filter::EventFilter;
pub use filter_set::FilterSet;
