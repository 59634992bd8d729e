use ariadne::{Color, Fmt, Label, Report, ReportKind};
use laxjson::{Json, Spanned};

use crate::config::Config;
use crate::Diagnostics;

/// Flags members whose value is `null`. Producers often emit `null` where
/// they mean "absent"; lenient decoding treats both as the member type's
/// default, so this reports as advice rather than a warning.
pub fn lint_null_members<'d>(
    config: &Config,
    document: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    if !config.flag_null_members {
        return;
    }
    super::walk_members(document, "", &mut |member_path, _name, val| {
        if !matches!(val.val, Json::Null) {
            return;
        }
        diag.push(
            Report::build(ReportKind::Advice, path, val.span.start)
                .with_message(format!(
                    "member \"{}\" is null and will decode as a default",
                    member_path.fg(Color::Blue)
                ))
                .with_label(Label::new((path, val.span.into_range())).with_color(Color::Blue))
                .finish(),
        );
    });
}
