//! Webcam picker: unlock labels → enumerate → list → (match → open → play).
//!
//! One linear async sequence. The first failure ends it and is shown in the
//! error region.

use pl_core::webcam::{self, device_links, error_text, plan};
use pl_core::{DeviceInfo, DeviceKind, PickerError, PickerParams, Selection, StreamConstraints};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlVideoElement, MediaDeviceInfo, MediaDeviceKind, MediaDevices,
    MediaStream, MediaStreamConstraints, MediaStreamTrack, UrlSearchParams, Window,
};

/// Run the picker against the elements with ids `output_id` and `error_id`.
///
/// Never rejects: failures are logged and written into the error element.
#[wasm_bindgen]
pub async fn start_webcam_picker(output_id: String, error_id: String) {
    if let Err(err) = run(&output_id).await {
        log::error!("webcam picker failed: {err}");
        show_error(&error_id, &err);
    }
}

async fn run(output_id: &str) -> Result<(), PickerError> {
    let window = web_sys::window().ok_or_else(|| PickerError::Platform("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| PickerError::Platform("no document".into()))?;
    let output = document
        .get_element_by_id(output_id)
        .ok_or_else(|| PickerError::MissingElement(output_id.to_string()))?;
    let media = window.navigator().media_devices().map_err(platform)?;

    unlock_labels(&media).await?;
    let devices = list_devices(&media).await?;
    log::info!("devices: {}", devices.len());
    render_list(&document, &output, &devices)?;

    let params = query_params(&window)?;
    match plan(&devices, &params)? {
        Selection::ListOnly => Ok(()),
        Selection::Open {
            device,
            constraints,
        } => open_stream(&document, &output, &media, &device, &constraints).await,
    }
}

/// Ask for microphone access so enumerated devices carry labels.
async fn unlock_labels(media: &MediaDevices) -> Result<(), PickerError> {
    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let promise = media
        .get_user_media_with_constraints(&constraints)
        .map_err(platform)?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(platform)?
        .dyn_into()
        .map_err(platform)?;
    // Only the permission grant matters; release the microphone.
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
    Ok(())
}

async fn list_devices(media: &MediaDevices) -> Result<Vec<DeviceInfo>, PickerError> {
    let promise = media.enumerate_devices().map_err(platform)?;
    let list = js_sys::Array::from(&JsFuture::from(promise).await.map_err(platform)?);
    let devices = list.iter().filter_map(|value| {
        let info = value.dyn_into::<MediaDeviceInfo>().ok()?;
        let kind = match info.kind() {
            MediaDeviceKind::Videoinput => DeviceKind::VideoInput,
            MediaDeviceKind::Audioinput => DeviceKind::AudioInput,
            MediaDeviceKind::Audiooutput => DeviceKind::AudioOutput,
            _ => return None,
        };
        Some(DeviceInfo::new(info.device_id(), info.label(), kind))
    });
    let cams = webcam::video_inputs(devices);
    for cam in &cams {
        log::debug!("video input {:?} ({})", cam.label, cam.id);
    }
    Ok(cams)
}

/// Replace the output element's content with one link per device.
fn render_list(
    document: &Document,
    output: &Element,
    devices: &[DeviceInfo],
) -> Result<(), PickerError> {
    let list = document.create_element("ul").map_err(platform)?;
    for link in device_links(devices) {
        let query = UrlSearchParams::new().map_err(platform)?;
        query.append("input", &link.input);
        let href = format!("?{}", String::from(query.to_string()));

        let item = document.create_element("li").map_err(platform)?;
        let anchor = document.create_element("a").map_err(platform)?;
        anchor.set_attribute("href", &href).map_err(platform)?;
        anchor.set_text_content(Some(&link.text));
        item.append_child(&anchor).map_err(platform)?;
        list.append_child(&item).map_err(platform)?;
    }
    output.set_text_content(None);
    output.append_child(&list).map_err(platform)?;
    Ok(())
}

fn query_params(window: &Window) -> Result<PickerParams, PickerError> {
    let search = window.location().search().map_err(platform)?;
    let query = UrlSearchParams::new_with_str(&search).map_err(platform)?;
    Ok(PickerParams::from_lookup(|name| query.get(name)))
}

async fn open_stream(
    document: &Document,
    output: &Element,
    media: &MediaDevices,
    device: &DeviceInfo,
    constraints: &StreamConstraints,
) -> Result<(), PickerError> {
    log::info!("using device {:?} ({})", device.label, device.id);

    let video: HtmlVideoElement = document
        .create_element("video")
        .map_err(platform)?
        .dyn_into()
        .map_err(|el| platform(el.into()))?;
    video.set_autoplay(true);
    output.append_child(&video).map_err(platform)?;

    let json = constraints
        .to_json()
        .map_err(|e| PickerError::Platform(format!("constraints: {e}")))?;
    log::info!("open stream... {json}");
    let constraints: MediaStreamConstraints = js_sys::JSON::parse(&json)
        .map_err(platform)?
        .unchecked_into();
    let promise = media
        .get_user_media_with_constraints(&constraints)
        .map_err(platform)?;
    let stream: MediaStream = JsFuture::from(promise)
        .await
        .map_err(platform)?
        .dyn_into()
        .map_err(platform)?;
    log::info!("got stream");

    video.set_src_object(Some(&stream));
    let player = video.clone();
    let on_metadata = Closure::once_into_js(move || {
        log::debug!("loadedmetadata");
        if let Err(e) = player.play() {
            log::error!("play failed: {}", platform(e));
        }
    });
    video
        .add_event_listener_with_callback("loadedmetadata", on_metadata.unchecked_ref())
        .map_err(platform)?;
    Ok(())
}

fn show_error(error_id: &str, err: &PickerError) {
    let target = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(error_id));
    match target {
        Some(el) => el.set_text_content(Some(&error_text(err))),
        None => log::warn!("no #{error_id} element to report the error in"),
    }
}

/// Best-effort message from a rejected browser call.
fn platform(value: JsValue) -> PickerError {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let name = String::from(err.name());
        let message = String::from(err.message());
        return PickerError::Platform(format!("{name}: {message}"));
    }
    match value.as_string() {
        Some(s) => PickerError::Platform(s),
        None => PickerError::Platform(format!("{value:?}")),
    }
}
