use std::collections::BTreeSet;

use ariadne::{Color, Fmt, Label, Report, ReportKind};
use laxjson::{Json, Spanned};

use crate::config::Config;
use crate::Diagnostics;

/// Flags arrays whose elements are not all of one kind. The lenient
/// decoder's last resort for these is stringifying every element, which is
/// lossy for anything that is not a scalar.
pub fn lint_mixed_arrays<'d>(
    _config: &Config,
    document: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    super::walk_members(document, "", &mut |member_path, _name, val| {
        let Json::Array(elems) = &val.val else {
            return;
        };
        let kinds: BTreeSet<&'static str> = elems.iter().map(|e| e.val.kind_desc()).collect();
        if kinds.len() > 1 {
            let kinds = kinds.into_iter().collect::<Vec<_>>().join(", ");
            diag.push(
                Report::build(ReportKind::Warning, path, val.span.start)
                    .with_message(format!(
                        "member \"{}\" is an array mixing {}",
                        member_path.fg(Color::Blue),
                        kinds
                    ))
                    .with_help(
                        "lenient decoding falls back to stringifying every element of a mixed array",
                    )
                    .with_label(Label::new((path, val.span.into_range())).with_color(Color::Yellow))
                    .finish(),
            );
        }
    });
}
