//! FAQ domain types.

use std::collections::BTreeMap;

/// Question → answer pairs generated by the backend.
///
/// A `BTreeMap` gives a stable display order; the backend attaches no
/// meaning to the order of its entries.
pub type FaqMapping = BTreeMap<String, String>;
