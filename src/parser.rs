//! Parser for sloppy-but-well-formed JSON documents.
//!
//! This is the upstream collaborator of the decode layer: it owns the raw
//! text and produces the spanned [`Json`] node tree everything else consumes.
//! String unescaping is delegated to `serde_json`, since handling escapes
//! (surrogate pairs especially) is better left to the existing mature
//! implementation.

use chumsky::prelude::*;

use crate::Spanned;

/// A parsed JSON value as a tagged tree. Every child node carries the span it
/// was parsed from, so decode failures can point back into the source.
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<Spanned<Json>>),
    Object(Vec<(Spanned<String>, Spanned<Json>)>),
}

impl Json {
    pub fn kind_desc(&self) -> &'static str {
        match self {
            Json::Null => "null",
            Json::Bool(_) => "bool",
            Json::Num(_) => "number",
            Json::Str(_) => "string",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
        }
    }
}

/// The grammar has already validated the escape sequences by the time this
/// runs; `serde_json` does the actual unescaping.
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_owned();
    }
    serde_json::from_str(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_owned())
}

/// Adapted from: <https://github.com/zesterer/chumsky/blob/main/examples/json.rs>.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Spanned<Json>, extra::Err<Rich<'a, char>>> {
    recursive(|value| {
        let digits = text::digits(10).to_slice();

        let frac = just('.').then(digits);

        let exp = just('e')
            .or(just('E'))
            .then(one_of("+-").or_not())
            .then(digits)
            .labelled("exponent");

        let number = just('-')
            .or_not()
            .then(text::int(10))
            .then(frac.or_not())
            .then(exp.or_not())
            .to_slice()
            .map(|s: &str| s.parse::<f64>().unwrap())
            .boxed()
            .labelled("number");

        let escape = just('\\')
            .then(choice((
                just('\\'),
                just('/'),
                just('"'),
                just('b').to('\x08'),
                just('f').to('\x0C'),
                just('n').to('\n'),
                just('r').to('\r'),
                just('t').to('\t'),
                just('u').ignore_then(text::digits(16).exactly(4).to_slice().validate(
                    |digits, e, emitter| {
                        char::from_u32(u32::from_str_radix(digits, 16).unwrap()).unwrap_or_else(
                            || {
                                emitter.emit(Rich::custom(e.span(), "invalid unicode character"));
                                '\u{FFFD}' // unicode replacement character
                            },
                        )
                    },
                )),
            )))
            .ignored()
            .boxed()
            .labelled("escape character");

        let string = none_of("\\\"")
            .ignored()
            .or(escape)
            .repeated()
            .to_slice()
            .map(unescape)
            .delimited_by(just('"'), just('"'))
            .map_with(|val, e| Spanned {
                span: e.span(),
                val,
            })
            .boxed()
            .labelled("string");

        let array = value
            .clone()
            .separated_by(just(',').padded())
            .collect()
            .padded()
            .delimited_by(just('['), just(']'))
            .boxed()
            .labelled("array");

        let member = string
            .clone()
            .then_ignore(just(':').padded())
            .then(value)
            .labelled("object member");
        let object = member
            .separated_by(just(',').padded())
            .collect()
            .padded()
            .delimited_by(just('{'), just('}'))
            .boxed()
            .labelled("object");

        choice((
            just("null")
                .map_with(|_, e| Spanned {
                    span: e.span(),
                    val: Json::Null,
                })
                .labelled("null"),
            just("true")
                .map_with(|_, e| Spanned {
                    span: e.span(),
                    val: Json::Bool(true),
                })
                .labelled("true"),
            just("false")
                .map_with(|_, e| Spanned {
                    span: e.span(),
                    val: Json::Bool(false),
                })
                .labelled("false"),
            number
                .map_with(|n, e| Spanned {
                    span: e.span(),
                    val: Json::Num(n),
                })
                .labelled("number"),
            string
                .map(|s: Spanned<String>| Spanned {
                    span: s.span,
                    val: Json::Str(s.val),
                })
                .labelled("string"),
            array
                .map_with(|elems, e| Spanned {
                    span: e.span(),
                    val: Json::Array(elems),
                })
                .labelled("array"),
            object
                .map_with(|members, e| Spanned {
                    span: e.span(),
                    val: Json::Object(members),
                })
                .labelled("object"),
        ))
        .padded()
    })
    .labelled("JSON document")
}
