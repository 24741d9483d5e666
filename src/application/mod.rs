//! Use cases wired against ports; adapters are supplied by the entry point.
pub(crate) mod collection_run;
