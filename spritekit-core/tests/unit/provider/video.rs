use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use super::*;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::SpriteError;

fn frame(v: u8) -> Texture {
    Texture::solid(2, 2, Rgba8Premul::from_straight_rgba(v, v, v, 255))
}

fn open_pair() -> (VideoProvider, DecoderFeed) {
    let (decoder, feed) = ChannelDecoder::channel();
    (VideoProvider::with_decoder(decoder), feed)
}

fn completion_counter(p: &mut VideoProvider) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    p.media_complete().subscribe(move || c.set(c.get() + 1));
    count
}

#[test]
fn ready_only_after_decoder_reports_playable() {
    let (mut p, feed) = open_pair();
    assert!(!p.is_ready());
    assert_eq!(p.size(), FALLBACK_SIZE);
    feed.ready(320, 240);
    p.update();
    assert!(p.is_ready());
    assert_eq!(p.size(), Size::new(320.0, 240.0));
}

#[test]
fn update_publishes_only_new_frames() {
    let (mut p, feed) = open_pair();
    feed.ready(2, 2);
    p.update();
    assert!(!p.has_new_texture());

    feed.push_frame(frame(10));
    feed.push_frame(frame(20));
    p.update();
    assert!(p.has_new_texture());
    let tex = p.take_texture().unwrap();
    assert_eq!(tex.pixel(0, 0), Some([20, 20, 20, 255]));

    p.update();
    assert!(!p.has_new_texture());
}

#[test]
fn completion_fires_once_per_natural_end() {
    let (mut p, feed) = open_pair();
    let count = completion_counter(&mut p);
    feed.ready(2, 2);
    p.start_media(false);
    assert!(feed.is_playing());

    feed.end();
    feed.end();
    p.update();
    p.update();
    assert_eq!(count.get(), 1);
    assert!(!p.is_playing());

    p.start_media(false);
    feed.end();
    p.update();
    assert_eq!(count.get(), 2);
}

#[test]
fn no_completion_after_manual_stop() {
    let (mut p, feed) = open_pair();
    let count = completion_counter(&mut p);
    p.start_media(false);
    p.stop_media();
    assert!(!feed.is_playing());
    feed.end();
    p.update();
    assert_eq!(count.get(), 0);
}

#[test]
fn no_completion_while_looping() {
    let (mut p, feed) = open_pair();
    let count = completion_counter(&mut p);
    p.start_media(true);
    assert!(feed.is_looping());
    for _ in 0..3 {
        feed.end();
        p.update();
    }
    assert_eq!(count.get(), 0);
    assert!(p.is_playing());
}

#[test]
fn set_source_goes_through_the_opener() {
    let feeds: Rc<RefCell<Vec<DecoderFeed>>> = Rc::default();
    let sink = feeds.clone();
    let mut p = VideoProvider::with_opener(move |source: &str| -> SpriteResult<Box<dyn MediaDecoder>> {
        if source.ends_with(".bad") {
            return Err(SpriteError::decode("unsupported container"));
        }
        let (decoder, feed) = ChannelDecoder::channel();
        sink.borrow_mut().push(feed);
        Ok(Box::new(decoder))
    });

    p.set_source("clip.mp4");
    assert_eq!(p.source(), Some("clip.mp4"));
    assert_eq!(feeds.borrow().len(), 1);
    feeds.borrow()[0].ready(8, 8);
    feeds.borrow()[0].push_frame(frame(1));
    p.update();
    assert!(p.is_ready());
    assert!(p.has_new_texture());

    p.set_source("clip.bad");
    assert!(!p.is_ready());
    assert!(p.take_texture().is_none());
}

#[test]
fn provider_without_backend_stays_idle() {
    let mut p = VideoProvider::new();
    p.set_source("clip.mp4");
    p.start_media(false);
    p.update();
    assert!(!p.is_ready());
    assert!(!p.is_playing());
}

#[test]
fn feed_can_cross_threads() {
    let (mut p, feed) = open_pair();
    let handle = std::thread::spawn(move || {
        feed.ready(2, 2);
        feed.push_frame(frame(7));
    });
    handle.join().unwrap();
    p.update();
    assert!(p.is_ready());
    assert!(p.has_new_texture());
}
