use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crossbeam::channel::{self, Receiver, Sender};

use crate::foundation::core::Size;
use crate::foundation::error::SpriteResult;
use crate::provider::{FALLBACK_SIZE, ProviderCore, ProviderKind, TextureProvider};
use crate::render::texture::Texture;

/// Something a decoder reports between frames.
#[derive(Debug, Clone)]
pub enum MediaEvent {
    /// A decoded frame, premultiplied.
    Frame(Texture),
    /// Playback reached the end of the media.
    Ended,
}

/// Media decode backend driven by a [`VideoProvider`].
///
/// Implementations must not block: `poll` returns whatever is already available.
pub trait MediaDecoder {
    /// Whether the media is open and frames can be requested.
    fn is_playable(&self) -> bool;

    /// Frame size once known.
    fn size(&self) -> Option<Size>;

    fn play(&mut self, looping: bool);

    fn stop(&mut self);

    /// Next pending event, if any.
    fn poll(&mut self) -> Option<MediaEvent>;
}

/// Opens a decoder for a source string.
pub trait DecoderOpener {
    fn open(&mut self, source: &str) -> SpriteResult<Box<dyn MediaDecoder>>;
}

impl<F> DecoderOpener for F
where
    F: FnMut(&str) -> SpriteResult<Box<dyn MediaDecoder>>,
{
    fn open(&mut self, source: &str) -> SpriteResult<Box<dyn MediaDecoder>> {
        self(source)
    }
}

/// Time-based media provider.
///
/// Completion is reported through [`TextureProvider::media_complete`] once per natural end of
/// a non-looping playback; stopping manually never reports it.
#[derive(Default)]
pub struct VideoProvider {
    core: ProviderCore,
    opener: Option<Box<dyn DecoderOpener>>,
    decoder: Option<Box<dyn MediaDecoder>>,
    playing: bool,
    looping: bool,
}

impl std::fmt::Debug for VideoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoProvider")
            .field("source", &self.core.source())
            .field("has_decoder", &self.decoder.is_some())
            .field("playing", &self.playing)
            .field("looping", &self.looping)
            .finish()
    }
}

impl VideoProvider {
    /// Provider without a decoder backend; sources cannot be opened until one is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that opens sources through `opener`.
    pub fn with_opener(opener: impl DecoderOpener + 'static) -> Self {
        Self {
            opener: Some(Box::new(opener)),
            ..Self::default()
        }
    }

    /// Provider around an already opened decoder.
    pub fn with_decoder(decoder: impl MediaDecoder + 'static) -> Self {
        Self {
            decoder: Some(Box::new(decoder)),
            ..Self::default()
        }
    }

    pub fn set_opener(&mut self, opener: impl DecoderOpener + 'static) {
        self.opener = Some(Box::new(opener));
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }
}

impl TextureProvider for VideoProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Video
    }

    fn core(&self) -> &ProviderCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProviderCore {
        &mut self.core
    }

    fn set_source(&mut self, source: &str) {
        if let Some(decoder) = self.decoder.as_mut() {
            decoder.stop();
        }
        self.decoder = None;
        self.playing = false;
        self.core.reset();
        self.core.set_source(Some(source.to_owned()));

        let Some(opener) = self.opener.as_mut() else {
            tracing::warn!(source, "video provider has no decoder backend");
            return;
        };
        match opener.open(source) {
            Ok(decoder) => {
                tracing::debug!(source, "video decoder opened");
                self.decoder = Some(decoder);
            }
            Err(err) => {
                tracing::warn!(source, error = %err, "video provider failed to open source");
            }
        }
    }

    fn update(&mut self) {
        let Some(decoder) = self.decoder.as_mut() else {
            return;
        };

        let mut latest = None;
        let mut ended = false;
        while let Some(event) = decoder.poll() {
            match event {
                MediaEvent::Frame(frame) => latest = Some(frame),
                MediaEvent::Ended => ended = true,
            }
        }

        if let Some(frame) = latest {
            self.core.publish(frame);
        }
        if ended && self.playing && !self.looping {
            self.playing = false;
            tracing::debug!(source = ?self.core.source(), "media complete");
            self.core.emit_media_complete();
        }
    }

    fn is_ready(&self) -> bool {
        self.decoder.as_ref().is_some_and(|d| d.is_playable())
    }

    fn size(&self) -> Size {
        self.decoder
            .as_ref()
            .filter(|d| d.is_playable())
            .and_then(|d| d.size())
            .filter(|s| s.width > 0.0 && s.height > 0.0)
            .unwrap_or(FALLBACK_SIZE)
    }

    fn start_media(&mut self, looping: bool) {
        let Some(decoder) = self.decoder.as_mut() else {
            tracing::warn!("start_media without an open decoder");
            return;
        };
        decoder.play(looping);
        self.playing = true;
        self.looping = looping;
    }

    fn stop_media(&mut self) {
        if let Some(decoder) = self.decoder.as_mut() {
            decoder.stop();
        }
        self.playing = false;
    }
}

#[derive(Debug)]
enum FeedMsg {
    Ready(Size),
    Frame(Texture),
    Ended,
}

#[derive(Debug, Default)]
struct Playback {
    playing: AtomicBool,
    looping: AtomicBool,
}

/// Decoder fed from another thread through a [`DecoderFeed`].
#[derive(Debug)]
pub struct ChannelDecoder {
    rx: Receiver<FeedMsg>,
    playback: Arc<Playback>,
    size: Option<Size>,
}

/// Producer half of a [`ChannelDecoder`]. `Send`, so a host decode thread can own it.
#[derive(Debug, Clone)]
pub struct DecoderFeed {
    tx: Sender<FeedMsg>,
    playback: Arc<Playback>,
}

impl ChannelDecoder {
    /// A connected decoder/feed pair.
    pub fn channel() -> (ChannelDecoder, DecoderFeed) {
        let (tx, rx) = channel::unbounded();
        let playback = Arc::new(Playback::default());
        (
            ChannelDecoder {
                rx,
                playback: playback.clone(),
                size: None,
            },
            DecoderFeed { tx, playback },
        )
    }
}

impl MediaDecoder for ChannelDecoder {
    fn is_playable(&self) -> bool {
        self.size.is_some()
    }

    fn size(&self) -> Option<Size> {
        self.size
    }

    fn play(&mut self, looping: bool) {
        self.playback.looping.store(looping, Ordering::Release);
        self.playback.playing.store(true, Ordering::Release);
    }

    fn stop(&mut self) {
        self.playback.playing.store(false, Ordering::Release);
    }

    fn poll(&mut self) -> Option<MediaEvent> {
        loop {
            match self.rx.try_recv().ok()? {
                FeedMsg::Ready(size) => self.size = Some(size),
                FeedMsg::Frame(frame) => return Some(MediaEvent::Frame(frame)),
                FeedMsg::Ended => return Some(MediaEvent::Ended),
            }
        }
    }
}

impl DecoderFeed {
    /// Announce the media as open with the given frame size.
    pub fn ready(&self, width: u32, height: u32) -> bool {
        let size = Size::new(f64::from(width), f64::from(height));
        self.tx.send(FeedMsg::Ready(size)).is_ok()
    }

    /// Queue a frame. Returns `false` once the decoder side is gone.
    pub fn push_frame(&self, frame: Texture) -> bool {
        self.tx.send(FeedMsg::Frame(frame)).is_ok()
    }

    /// Report the natural end of the media.
    pub fn end(&self) -> bool {
        self.tx.send(FeedMsg::Ended).is_ok()
    }

    /// Whether the consumer asked for playback.
    pub fn is_playing(&self) -> bool {
        self.playback.playing.load(Ordering::Acquire)
    }

    pub fn is_looping(&self) -> bool {
        self.playback.looping.load(Ordering::Acquire)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/provider/video.rs"]
mod tests;
