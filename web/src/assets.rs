use std::collections::HashMap;

use gloo::events::EventListener;
use web_sys::{HtmlAudioElement, HtmlImageElement};
use yew::Callback;

/// Which host decoder a resource goes through.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AssetKind {
    Image,
    Audio,
}

/// Starts one image load per manifest entry.
///
/// Each element lands in the by-name map before its data arrives, matching
/// the populate-then-load behavior the board relies on; the `load` event
/// reports back through `on_ready`. There are no retries and no timeout: a
/// resource that never loads leaves its barrier stalled.
pub(crate) fn load_images(
    manifest: &[(&'static str, String)],
    gfx: &mut HashMap<&'static str, HtmlImageElement>,
    on_ready: &Callback<&'static str>,
) -> Vec<EventListener> {
    manifest
        .iter()
        .map(|(name, url)| {
            let image = HtmlImageElement::new().expect("Could not create image element");
            let listener = {
                let on_ready = on_ready.clone();
                let name = *name;
                EventListener::once(&image, "load", move |_| on_ready.emit(name))
            };
            image.set_src(url);
            log::trace!("image load started: {} <- {}", name, url);
            gfx.insert(name, image);
            listener
        })
        .collect()
}

/// Starts one audio load per manifest entry; readiness is the element's
/// `canplaythrough` event.
pub(crate) fn load_sounds(
    manifest: &[(&'static str, String)],
    sfx: &mut HashMap<&'static str, HtmlAudioElement>,
    on_ready: &Callback<&'static str>,
) -> Vec<EventListener> {
    manifest
        .iter()
        .map(|(name, url)| {
            let audio = HtmlAudioElement::new().expect("Could not create audio element");
            let listener = {
                let on_ready = on_ready.clone();
                let name = *name;
                EventListener::once(&audio, "canplaythrough", move |_| on_ready.emit(name))
            };
            audio.set_src(url);
            log::trace!("audio load started: {} <- {}", name, url);
            sfx.insert(name, audio);
            listener
        })
        .collect()
}
