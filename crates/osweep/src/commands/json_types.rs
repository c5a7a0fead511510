use serde::Serialize;

use osweep_core::cleanup::CycleSummary;

/// Report envelope for `osweep run --json`.
#[derive(Serialize)]
pub(crate) struct RunReport<'a> {
    pub cycles: &'a [CycleSummary],
}
