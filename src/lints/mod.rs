mod mixed_arrays;
mod null_members;
mod stringly_scalars;

pub(crate) use mixed_arrays::*;
pub(crate) use null_members::*;
pub(crate) use stringly_scalars::*;

use laxjson::{Json, Spanned};

/// Walk every object member in the tree, depth-first, calling `visit` with
/// the member's dotted path, its name node, and its value node.
pub(crate) fn walk_members<'t>(
    node: &'t Spanned<Json>,
    prefix: &str,
    visit: &mut impl FnMut(String, &'t Spanned<String>, &'t Spanned<Json>),
) {
    match &node.val {
        Json::Object(members) => {
            for (name, val) in members {
                let path = if prefix.is_empty() {
                    name.val.clone()
                } else {
                    format!("{prefix}.{}", name.val)
                };
                visit(path.clone(), name, val);
                walk_members(val, &path, visit);
            }
        }
        Json::Array(elems) => {
            for (i, elem) in elems.iter().enumerate() {
                walk_members(elem, &format!("{prefix}[{i}]"), visit);
            }
        }
        _ => {}
    }
}
