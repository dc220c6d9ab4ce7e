//! Developer utilities.
//!
//! - [`schema`]: declarative option shapes and [`ill_formed_opts`]
//! - [`console`]: value printing, labeled diagnostics, output redirection,
//!   counters and timers
//! - [`util`]: runtime values, call-site lookup, paths, JSON files, text
//!   search and string helpers
//!
//! Most programs only need the [`prelude`].
//!
//! ```rust,ignore
//! use toolbelt::prelude::*;
//!
//! let schema = Schema::new()
//!     .rule("name", TypeTag::String)
//!     .rule("retries", Rule::of(TypeTag::Number).optional());
//!
//! if ill_formed_opts(&schema, &options) {
//!     return;
//! }
//! print_values!("starting", options);
//! ```

pub use toolbelt_console as console;
pub use toolbelt_schema as schema;
pub use toolbelt_util as util;

pub use toolbelt_console::{
    count, count_end, count_end_all, find_value_in_file, print, print_labeled, redirect_to_file,
    time, time_end, time_scope, write_json, Console, Label, PrintOptions, Printer, Profiler,
};
pub use toolbelt_console::{print_error, print_success, print_values, print_warning};
pub use toolbelt_schema::{check, check_eq, ill_formed_opts, Rule, Schema, Violation};
pub use toolbelt_util::{
    arrays_equal, call_site, camel_to_kebab_case, clean_number, expand_home, find_in_file,
    kebab_to_camel_case, read_json, CallSite, Error, ErrorKind, Object, Result, SourceLocation,
    TypeTag, Value,
};

/// The common imports.
pub mod prelude {
    pub use crate::{
        call_site, check, check_eq, count, count_end, count_end_all, ill_formed_opts, print,
        print_error, print_success, print_values, print_warning, redirect_to_file, time,
        time_end, CallSite, Label, Object, Rule, Schema, TypeTag, Value,
    };
}
