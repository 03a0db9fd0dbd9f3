//! Integration tests: enumerated devices + query string → picker decision.

use pl_core::webcam::{device_links, error_text, plan, video_inputs};
use pl_core::{DeviceInfo, DeviceKind, PickerError, PickerParams, Selection};
use pretty_assertions::assert_eq;

fn enumerated() -> Vec<DeviceInfo> {
    vec![
        DeviceInfo::new("mic-0", "Built-in Microphone", DeviceKind::AudioInput),
        DeviceInfo::new("cam-0", "FaceTime HD Camera", DeviceKind::VideoInput),
        DeviceInfo::new("spk-0", "Speakers", DeviceKind::AudioOutput),
        DeviceInfo::new("cam-1", "Capture Card", DeviceKind::VideoInput),
    ]
}

fn query(pairs: &[(&'static str, &'static str)]) -> PickerParams {
    PickerParams::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}

#[test]
fn only_video_inputs_are_listed() {
    let cams = video_inputs(enumerated());
    let ids: Vec<&str> = cams.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["cam-0", "cam-1"]);

    let links = device_links(&cams);
    assert_eq!(links[1].input, "cam-1");
    assert_eq!(links[1].text, "index: 1, id: \"cam-1\", label: \"Capture Card\"");
}

#[test]
fn no_input_lists_only() {
    let cams = video_inputs(enumerated());
    assert_eq!(plan(&cams, &query(&[("fps", "30")])).unwrap(), Selection::ListOnly);
}

#[test]
fn bad_number_without_input_still_lists_only() {
    let cams = video_inputs(enumerated());
    let params = query(&[("fps", "abc"), ("height", "tall")]);
    assert_eq!(plan(&cams, &params).unwrap(), Selection::ListOnly);
}

#[test]
fn unknown_input_opens_nothing() {
    let cams = video_inputs(enumerated());
    let err = plan(&cams, &query(&[("input", "mic-0")])).unwrap_err();
    assert_eq!(
        err,
        PickerError::DeviceNotFound {
            input: "mic-0".into()
        }
    );
    assert_eq!(error_text(&err), "Error: device not found: \"mic-0\"");
}

#[test]
fn matches_by_label_and_builds_constraints() {
    let cams = video_inputs(enumerated());
    let params = query(&[("input", "Capture Card"), ("fps", "60"), ("height", "720")]);
    match plan(&cams, &params).unwrap() {
        Selection::Open {
            device,
            constraints,
        } => {
            assert_eq!(device.id, "cam-1");
            assert_eq!(
                constraints.to_json().unwrap(),
                r#"{"video":{"deviceId":{"exact":"cam-1"},"frameRate":{"exact":60.0},"height":{"exact":720.0}}}"#
            );
        }
        other => panic!("expected Open, got {other:?}"),
    }
}

#[test]
fn first_match_wins_when_label_equals_another_id() {
    let cams = vec![
        DeviceInfo::new("x", "cam-b", DeviceKind::VideoInput),
        DeviceInfo::new("cam-b", "Other", DeviceKind::VideoInput),
    ];
    match plan(&cams, &query(&[("input", "cam-b")])).unwrap() {
        Selection::Open { device, .. } => assert_eq!(device.id, "x"),
        other => panic!("expected Open, got {other:?}"),
    }
}

#[test]
fn bad_number_fails_once_device_is_found() {
    let cams = video_inputs(enumerated());
    let err = plan(&cams, &query(&[("input", "cam-0"), ("height", "tall")])).unwrap_err();
    assert_eq!(
        error_text(&err),
        "Error: query parameter `height` is not a number: \"tall\""
    );
}
