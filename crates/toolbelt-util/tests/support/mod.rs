//! Helpers living in a separate file so call-site lookups from them have a
//! distinct caller to find.

use toolbelt_util::{call_site, CallSite, SourceLocation};

pub const HELPER_FILE: &str = "support/mod.rs";

/// Where was this helper called from?
pub fn where_called_from() -> Option<SourceLocation> {
    call_site(CallSite::DistinctCaller)
}

/// Goes through another helper in this file before asking.
pub fn where_called_from_indirect() -> Option<SourceLocation> {
    where_called_from()
}

/// The line inside this helper.
pub fn where_am_i() -> (Option<SourceLocation>, u32) {
    (call_site(CallSite::Immediate), line!())
}
