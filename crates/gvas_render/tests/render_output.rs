use gvas_core::{Delegate, Document, EngineVersion, Metadata, Properties, PropertyValue};
use gvas_render::{
    JsonStyle, missing_fields, render_document_json, render_metadata_json, render_metadata_text,
    render_properties_json, render_text, select_fields,
};
use serde_json::json;

fn sample_metadata() -> Metadata {
    Metadata {
        save_version: 2,
        package_version: 522,
        engine_version: EngineVersion {
            major: 4,
            minor: 27,
            patch: 2,
            build: 18319896,
            build_id: "++UE4+Release-4.27".to_string(),
        },
        custom_format_version: 3,
        custom_format_data: vec![("00112233445566778899aabbccddeeff".to_string(), 7)]
            .into_iter()
            .collect(),
        save_game_type: "/Script/FSD.FSDSaveGame".to_string(),
    }
}

fn sample_properties() -> Properties {
    let mut stats = Properties::new();
    stats.insert("Kills", PropertyValue::Int32(12));
    stats.insert("Accuracy", PropertyValue::Float32(0.5));

    let mut loadout = Properties::new();
    loadout.insert("Name", PropertyValue::Str("Primary".to_string()));

    let mut props = Properties::new();
    props.insert("Zeta", PropertyValue::UInt32(7));
    props.insert("Alpha", PropertyValue::Bool(true));
    props.insert("Stats", PropertyValue::Struct(stats));
    props.insert(
        "Id",
        PropertyValue::GuidHex("00112233445566778899aabbccddeeff".to_string()),
    );
    props.insert(
        "LastPlayed",
        PropertyValue::DateTimeTicks("637800000000000000".to_string()),
    );
    props.insert("Scores", PropertyValue::IntArray(vec![1, 2]));
    props.insert(
        "Loadouts",
        PropertyValue::StructArray(vec![
            PropertyValue::Struct(loadout),
            PropertyValue::GuidHex("abababababababababababababababab".to_string()),
        ]),
    );
    props.insert(
        "Flags",
        PropertyValue::KeyedMap(
            vec![
                ("7".to_string(), PropertyValue::Bool(true)),
                ("-1".to_string(), PropertyValue::Bool(false)),
            ]
            .into_iter()
            .collect(),
        ),
    );
    props.insert(
        "OnDone",
        PropertyValue::Delegate(Delegate {
            object_path: "/Game/Maps/Space.Space:Rig".to_string(),
            function_name: "HandleDone".to_string(),
        }),
    );
    props
}

fn sample_document() -> Document {
    Document {
        metadata: Some(sample_metadata()),
        properties: sample_properties(),
    }
}

#[test]
fn canonical_json_wraps_metadata_and_properties() {
    let value = render_document_json(&sample_document(), JsonStyle::CanonicalV1);
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["metadata", "properties"]);
}

#[test]
fn metadata_is_omitted_when_absent() {
    let document = Document {
        metadata: None,
        properties: sample_properties(),
    };
    let value = render_document_json(&document, JsonStyle::CanonicalV1);
    assert!(value.get("metadata").is_none());
    assert!(value.get("properties").is_some());
}

#[test]
fn properties_only_style_drops_wrapper() {
    let value = render_document_json(&sample_document(), JsonStyle::PropertiesOnly);
    assert_eq!(value, render_properties_json(&sample_properties()));
}

#[test]
fn property_json_keeps_declaration_order() {
    let value = render_properties_json(&sample_properties());
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "Zeta",
            "Alpha",
            "Stats",
            "Id",
            "LastPlayed",
            "Scores",
            "Loadouts",
            "Flags",
            "OnDone",
        ]
    );

    let flag_keys: Vec<&str> = value["Flags"]
        .as_object()
        .expect("map should be an object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(flag_keys, vec!["7", "-1"]);
}

#[test]
fn property_json_shapes() {
    let value = render_properties_json(&sample_properties());
    assert_eq!(
        value,
        json!({
            "Zeta": 7,
            "Alpha": true,
            "Stats": { "Kills": 12, "Accuracy": 0.5 },
            "Id": "00112233445566778899aabbccddeeff",
            "LastPlayed": "637800000000000000",
            "Scores": [1, 2],
            "Loadouts": [
                { "Name": "Primary" },
                "abababababababababababababababab"
            ],
            "Flags": { "7": true, "-1": false },
            "OnDone": {
                "object_path": "/Game/Maps/Space.Space:Rig",
                "function_name": "HandleDone"
            }
        })
    );
}

#[test]
fn non_finite_floats_render_as_null() {
    let mut props = Properties::new();
    props.insert("Bad", PropertyValue::Float32(f32::NAN));
    props.insert("Fine", PropertyValue::Float32(0.1));

    let value = render_properties_json(&props);
    assert_eq!(value, json!({ "Bad": null, "Fine": 0.1 }));
}

#[test]
fn metadata_json_matches_serde_derive() {
    let metadata = sample_metadata();
    let manual = render_metadata_json(&metadata);
    let derived = serde_json::to_value(&metadata).expect("metadata should serialize");
    assert_eq!(manual, derived);
    assert_eq!(manual["engine_version"]["build_id"], "++UE4+Release-4.27");
}

#[test]
fn select_fields_follows_file_order() {
    let props = sample_properties();
    let wanted = vec![
        "Flags".to_string(),
        "Zeta".to_string(),
        "Nope".to_string(),
    ];

    let selected = select_fields(&props, &wanted);
    let names: Vec<&str> = selected.names().collect();
    assert_eq!(names, vec!["Zeta", "Flags"]);
    assert_eq!(missing_fields(&props, &wanted), vec!["Nope"]);
}

#[test]
fn text_tree_indents_nested_values() {
    let rendered = render_text(&sample_document());

    assert!(rendered.starts_with("save_game_type: /Script/FSD.FSDSaveGame\n"));
    assert!(rendered.contains("engine_version: 4.27.2-18319896+++UE4+Release-4.27\n"));
    assert!(rendered.contains("custom_format_data:\n  00112233445566778899aabbccddeeff: 7\n"));
    assert!(rendered.contains("Zeta: 7\n"));
    assert!(rendered.contains("Stats:\n  Kills: 12\n  Accuracy: 0.5\n"));
    assert!(rendered.contains("LastPlayed: 637800000000000000 ticks\n"));
    assert!(rendered.contains("Scores: [1, 2]\n"));
    assert!(rendered.contains(
        "Loadouts:\n  [0]:\n    Name: \"Primary\"\n  [1]: abababababababababababababababab\n"
    ));
    assert!(rendered.contains("Flags:\n  7: true\n  -1: false\n"));
    assert!(rendered.contains("OnDone: /Game/Maps/Space.Space:Rig -> HandleDone\n"));
}

#[test]
fn metadata_text_is_the_tree_header() {
    let metadata = render_metadata_text(&sample_metadata());
    let full = render_text(&sample_document());

    assert!(full.starts_with(&format!("{metadata}\n")));
    assert_eq!(metadata.lines().count(), 7);
}

#[test]
fn text_tree_marks_empty_containers() {
    let mut props = Properties::new();
    props.insert("Empty", PropertyValue::Struct(Properties::new()));
    props.insert("NoItems", PropertyValue::ObjectPathArray(vec![]));
    let rendered = render_text(&Document {
        metadata: None,
        properties: props,
    });

    assert_eq!(rendered, "Empty: {}\nNoItems: []\n");
}
