//! The audit sink: silent recoveries are observable, and observing them
//! never changes decode results.

use chumsky::Parser as _;
use laxjson::{Decode, Error, Event, Fields, Json, Kind, Recorder, Scope, Spanned};

fn parse(src: &str) -> Spanned<Json> {
    laxjson::parser()
        .parse(src)
        .into_result()
        .expect("valid JSON")
}

#[derive(Debug, PartialEq, Default)]
struct Sensor {
    label: String,
    reading: f64,
    online: bool,
}

impl Decode for Sensor {
    fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
        let fields = Fields::in_scope(node, scope)?;
        Ok(Sensor {
            label: fields.decode_string("label"),
            reading: fields.decode_f64("reading"),
            online: fields.decode_bool("online"),
        })
    }
}

#[test]
fn cross_conversions_record_one_coercion_each() {
    let doc = parse(r#"{"label": "probe", "reading": "2.5", "online": true}"#);
    let recorder = Recorder::new();
    let sensor: Sensor = laxjson::decode_node_with_audit(&doc, &recorder).unwrap();
    assert_eq!(sensor.reading, 2.5);

    let coercions: Vec<Event> = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Coerced { .. }))
        .collect();
    assert_eq!(coercions.len(), 1);
    let Event::Coerced { path, from, to, .. } = &coercions[0] else {
        unreachable!();
    };
    assert_eq!(path, "reading");
    assert_eq!(*from, "string");
    assert_eq!(*to, Kind::Double);
}

#[test]
fn absent_members_record_defaults() {
    let doc = parse(r#"{"label": "probe"}"#);
    let recorder = Recorder::new();
    let _: Sensor = laxjson::decode_node_with_audit(&doc, &recorder).unwrap();

    let defaulted: Vec<String> = recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Defaulted { path, .. } => Some(path),
            _ => None,
        })
        .collect();
    assert!(defaulted.contains(&"reading".to_owned()));
    assert!(defaulted.contains(&"online".to_owned()));
    assert!(!defaulted.contains(&"label".to_owned()));
}

#[test]
fn composite_fallbacks_are_audited() {
    #[derive(Debug, PartialEq)]
    struct Rig {
        sensor: Sensor,
    }

    impl Decode for Rig {
        fn decode(node: &Spanned<Json>, scope: &Scope<'_>) -> Result<Self, Error> {
            let fields = Fields::in_scope(node, scope)?;
            Ok(Rig {
                sensor: fields.decode("sensor")?,
            })
        }
    }

    let doc = parse(r#"{"sensor": null}"#);
    let recorder = Recorder::new();
    let rig: Rig = laxjson::decode_node_with_audit(&doc, &recorder).unwrap();
    assert_eq!(rig.sensor, Sensor::default());

    let events = recorder.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::FallbackEmptyObject { path } if path == "sensor")));
    // The fallback decode defaults the sensor's own members, under the
    // member's path.
    assert!(events.iter().any(
        |e| matches!(e, Event::Defaulted { path, .. } if path == "sensor.label")
    ));
}

#[test]
fn array_adaptation_counts_lossy_elements() {
    let doc = parse(r#"{"xs": ["x", {"a": 1}, 2, null]}"#);
    let recorder = Recorder::new();
    let fields = Fields::with_audit(&doc, &recorder).unwrap();
    let xs: Vec<String> = fields.opt("xs").unwrap();
    assert_eq!(xs.len(), 4);

    let adapted: Vec<Event> = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::ArrayAdapted { .. }))
        .collect();
    assert_eq!(adapted.len(), 1);
    let Event::ArrayAdapted { path, lossy, .. } = &adapted[0] else {
        unreachable!();
    };
    assert_eq!(path, "xs");
    assert_eq!(*lossy, 2);
}

#[test]
fn duplicate_members_are_audited() {
    let doc = parse(r#"{"a": 1, "a": 2}"#);
    let recorder = Recorder::new();
    let fields = Fields::with_audit(&doc, &recorder).unwrap();
    assert_eq!(fields.decode_i64("a"), 2);

    assert!(recorder
        .events()
        .iter()
        .any(|e| matches!(e, Event::DuplicateMember { path, .. } if path == "a")));
}

#[test]
fn auditing_never_changes_results() {
    let doc = parse(r#"{"label": 7, "reading": "2.5", "online": "true"}"#);
    let silent: Sensor = laxjson::decode_node(&doc).unwrap();
    let recorder = Recorder::new();
    let audited: Sensor = laxjson::decode_node_with_audit(&doc, &recorder).unwrap();
    assert_eq!(silent, audited);
    assert!(!recorder.events().is_empty());
}

#[test]
fn events_serialize_for_export() {
    let doc = parse(r#"{"reading": "2.5"}"#);
    let recorder = Recorder::new();
    let _: Sensor = laxjson::decode_node_with_audit(&doc, &recorder).unwrap();

    let json = serde_json::to_string(&recorder.events()).unwrap();
    assert!(json.contains("\"coerced\""), "serialized: {json}");
}
