pub mod listener;
pub mod metadata;
pub mod reporter;

pub use listener::{ClassOutcome, UnannotatedMethodsListener, LISTENER_SOURCE};
pub use metadata::{
    load_snapshot, read_snapshot, MetadataError, MetadataProvider, Snapshot, SnapshotProvider,
};
pub use reporter::{
    format_fault_message, format_violation_message, CollectingReporter, ListenerFailure,
    TracingReporter, ViolationReporter,
};
