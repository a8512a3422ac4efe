#![allow(missing_docs)]

pub(crate) mod rates;
pub(crate) mod store;

pub(crate) use rates::{FailingRates, FixedRates, GatedRates};
pub(crate) use store::RecordingStore;
