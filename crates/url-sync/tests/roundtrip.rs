//! Round-trip property: serializing a parsed tree and re-parsing it with
//! the same schema yields an equivalent tree, null leaves excepted (a
//! null leaf emits no key, and an absent key parses back to null).

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use proptest::prelude::*;
use url_sync::{parse_query, serialize_query, FlatParams, QueryValue, Schema, S};

fn schema() -> Schema {
    S.obj(vec![
        S.key("q", S.str()),
        S.key("page", S.num()),
        S.key("exact", S.bool()),
        S.key("since", S.date()),
        S.key("color", S.enum_(["red", "green", "blue"])),
        S.key("tags", S.arr(S.str())),
        S.key(
            "ranges",
            S.arr(S.obj(vec![S.key("start", S.num()), S.key("end", S.num())])),
        ),
    ])
}

// Strings that the parser treats as data rather than absence markers.
fn data_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.:/-]{1,16}".prop_filter("absence marker", |s| s != "null")
}

fn number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64),
        any::<f64>().prop_filter("NaN never round-trips", |n| !n.is_nan()),
    ]
}

// Millisecond precision: the ISO-8601 output carries exactly three
// fractional digits, so finer timestamps cannot survive a round trip.
fn date() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    (0i64..4_102_444_800_000i64).prop_map(|ms| Utc.timestamp_millis_opt(ms).unwrap())
}

fn leaf_or_null<L: Strategy<Value = QueryValue> + 'static>(
    leaf: L,
) -> impl Strategy<Value = QueryValue> {
    prop_oneof![3 => leaf, 1 => Just(QueryValue::Null)]
}

fn tree() -> impl Strategy<Value = QueryValue> {
    let range = || {
        (number(), number()).prop_map(|(start, end)| {
            QueryValue::Obj(IndexMap::from([
                ("start".to_string(), QueryValue::Num(start)),
                ("end".to_string(), QueryValue::Num(end)),
            ]))
        })
    };
    (
        leaf_or_null(data_string().prop_map(QueryValue::Str)),
        leaf_or_null(number().prop_map(QueryValue::Num)),
        leaf_or_null(any::<bool>().prop_map(QueryValue::Bool)),
        leaf_or_null(date().prop_map(QueryValue::Date)),
        leaf_or_null(
            prop_oneof![Just("red"), Just("green"), Just("blue")]
                .prop_map(|l| QueryValue::Str(l.to_string())),
        ),
        proptest::collection::vec(data_string().prop_map(QueryValue::Str), 0..4),
        proptest::collection::vec(range(), 0..3),
    )
        .prop_map(|(q, page, exact, since, color, tags, ranges)| {
            QueryValue::Obj(IndexMap::from([
                ("q".to_string(), q),
                ("page".to_string(), page),
                ("exact".to_string(), exact),
                ("since".to_string(), since),
                ("color".to_string(), color),
                ("tags".to_string(), tags.into()),
                ("ranges".to_string(), ranges.into()),
            ]))
        })
}

// Nulls vanish on serialization, and with them any array tail they gated:
// re-parsing stops at the first index whose keys all disappeared.
fn expected_after_round_trip(value: &QueryValue) -> QueryValue {
    match value {
        QueryValue::Obj(map) => QueryValue::Obj(
            map.iter()
                .map(|(k, v)| (k.clone(), expected_after_round_trip(v)))
                .collect(),
        ),
        QueryValue::Arr(items) => {
            let mut kept = Vec::new();
            for item in items {
                let round = expected_after_round_trip(item);
                let emits_key = match &round {
                    QueryValue::Null => false,
                    QueryValue::Obj(map) => map.values().any(|v| !v.is_null()),
                    _ => true,
                };
                if !emits_key {
                    break;
                }
                kept.push(round);
            }
            QueryValue::Arr(kept)
        }
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn parse_serialize_parse_is_stable(tree in tree()) {
        let schema = schema();
        let query = serialize_query(&tree, &schema).to_query();
        let round = parse_query(&FlatParams::from_query(&query), &schema, None);
        prop_assert_eq!(round, expected_after_round_trip(&tree));
    }

    #[test]
    fn second_round_trip_is_identity(tree in tree()) {
        let schema = schema();
        let once = parse_query(
            &FlatParams::from_query(&serialize_query(&tree, &schema).to_query()),
            &schema,
            None,
        );
        let twice = parse_query(
            &FlatParams::from_query(&serialize_query(&once, &schema).to_query()),
            &schema,
            None,
        );
        prop_assert_eq!(twice, once);
    }
}

#[test]
fn fixed_point_example() {
    let schema = schema();
    let params = FlatParams::from_query(
        "q=boots&page=2&exact=1&since=2024-06-01&color=green&tags.0=a&tags.1=b\
         &ranges.0.start=1&ranges.0.end=2",
    );
    let first = parse_query(&params, &schema, None);
    let round = parse_query(
        &FlatParams::from_query(&serialize_query(&first, &schema).to_query()),
        &schema,
        None,
    );
    assert_eq!(round, first);
}
