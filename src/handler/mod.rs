mod dispatcher;
mod envelope;
mod object_store;

pub use dispatcher::Dispatcher;
pub use object_store::ObjectStore;
