use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;

pub trait Scheduler {
    type Handle: 'static;

    fn after(&self, millis: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
    fn next_frame(&self, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// `setTimeout` / `requestAnimationFrame` through gloo.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

pub enum BrowserHandle {
    Timeout(Timeout),
    Frame(AnimationFrame),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserHandle;

    fn after(&self, millis: u32, callback: Box<dyn FnOnce()>) -> BrowserHandle {
        BrowserHandle::Timeout(Timeout::new(millis, callback))
    }

    fn next_frame(&self, callback: Box<dyn FnOnce()>) -> BrowserHandle {
        BrowserHandle::Frame(request_animation_frame(move |_timestamp| callback()))
    }
}
