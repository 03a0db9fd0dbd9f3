//! Webcam picker logic: query parameters, device matching and media-stream
//! constraints.
//!
//! The browser side enumerates devices and opens streams; everything it needs
//! to decide *what* to open is computed here.

use crate::error::PickerError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    VideoInput,
    AudioInput,
    AudioOutput,
}

/// A media device as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub id: String,
    pub label: String,
    pub kind: DeviceKind,
}

impl DeviceInfo {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: DeviceKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }
}

/// Keep only video inputs, in platform order.
pub fn video_inputs(devices: impl IntoIterator<Item = DeviceInfo>) -> Vec<DeviceInfo> {
    devices
        .into_iter()
        .filter(|d| d.kind == DeviceKind::VideoInput)
        .collect()
}

/// First device whose id or label equals `needle`.
pub fn find_device<'a>(devices: &'a [DeviceInfo], needle: &str) -> Option<&'a DeviceInfo> {
    devices.iter().find(|d| d.id == needle || d.label == needle)
}

/// Picker options read from the page's query string.
///
/// `fps` and `height` stay raw until a device is actually opened, so a
/// list-only page never fails on them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickerParams {
    /// Device id or label to open.
    pub input: Option<String>,
    /// Exact frame rate to request.
    pub fps: Option<String>,
    /// Exact frame height to request.
    pub height: Option<String>,
}

impl PickerParams {
    /// Build from a lookup such as `URLSearchParams.get`.
    pub fn from_lookup<F>(mut get: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        Self {
            input: get("input"),
            fps: get("fps"),
            height: get("height"),
        }
    }
}

/// Parse a numeric parameter. Blank reads as 0, the way the page's
/// `Number("")` would.
fn parse_number(param: &'static str, raw: Option<&str>) -> Result<Option<f64>, PickerError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(Some(0.0));
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(PickerError::InvalidNumber {
            param,
            value: value.to_string(),
        }),
    }
}

/// `{ exact: value }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exact<T> {
    pub exact: T,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoConstraints {
    pub device_id: Exact<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<Exact<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Exact<f64>>,
}

/// Shape of a `MediaStreamConstraints` dictionary for one video track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamConstraints {
    pub video: VideoConstraints,
}

impl StreamConstraints {
    /// Exact-device constraints, plus frame rate and height when requested.
    pub fn for_device(device: &DeviceInfo, params: &PickerParams) -> Result<Self, PickerError> {
        let frame_rate = parse_number("fps", params.fps.as_deref())?;
        let height = parse_number("height", params.height.as_deref())?;
        Ok(Self {
            video: VideoConstraints {
                device_id: Exact {
                    exact: device.id.clone(),
                },
                frame_rate: frame_rate.map(|exact| Exact { exact }),
                height: height.map(|exact| Exact { exact }),
            },
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// What the picker should do after listing devices.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No `input` parameter; just show the list.
    ListOnly,
    Open {
        device: DeviceInfo,
        constraints: StreamConstraints,
    },
}

/// Decide whether to open a stream and with which constraints.
pub fn plan(devices: &[DeviceInfo], params: &PickerParams) -> Result<Selection, PickerError> {
    let Some(input) = params.input.as_deref() else {
        return Ok(Selection::ListOnly);
    };
    log::debug!("looking up device {input:?}");
    let device = find_device(devices, input).ok_or_else(|| PickerError::DeviceNotFound {
        input: input.to_string(),
    })?;
    Ok(Selection::Open {
        device: device.clone(),
        constraints: StreamConstraints::for_device(device, params)?,
    })
}

/// One entry of the rendered device list.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLink {
    /// Value for the `input` query parameter.
    pub input: String,
    pub text: String,
}

pub fn device_links(devices: &[DeviceInfo]) -> Vec<DeviceLink> {
    devices
        .iter()
        .enumerate()
        .map(|(i, d)| DeviceLink {
            input: d.id.clone(),
            text: format!("index: {i}, id: \"{}\", label: \"{}\"", d.id, d.label),
        })
        .collect()
}

/// Text shown in the error region.
pub fn error_text(err: &PickerError) -> String {
    format!("Error: {err}")
}
