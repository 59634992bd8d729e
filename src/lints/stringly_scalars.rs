use ariadne::{Color, Fmt, Label, Report, ReportKind};
use laxjson::{coerce, Json, Kind, Spanned};

use crate::config::Config;
use crate::Diagnostics;

/// Flags scalar members whose value is a number or boolean encoded as a
/// string. The lenient decoder recovers these via cross-type coercion, but
/// the producer should be fixed to emit the native kind.
pub fn lint_stringly_scalars<'d>(
    config: &Config,
    document: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    super::walk_members(document, "", &mut |member_path, name, val| {
        let Json::Str(s) = &val.val else {
            return;
        };
        if config.allowed_stringly_members.contains(&name.val) {
            return;
        }
        let hidden = if coerce(&val.val, Kind::Double).is_some_and(|c| c.crossed) {
            "number"
        } else if s == "true" || s == "false" {
            "bool"
        } else {
            return;
        };
        diag.push(
            Report::build(ReportKind::Warning, path, val.span.start)
                .with_message(format!(
                    "member \"{}\" holds a {} encoded as a string",
                    member_path.fg(Color::Blue),
                    hidden
                ))
                .with_label(Label::new((path, val.span.into_range())).with_color(Color::Yellow))
                .finish(),
        );
    });
}
