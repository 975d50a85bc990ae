//! Mount, frame and teardown lifecycle for a particle field.

use motes_core::MotionPreference;
use rand::Rng;

use crate::field::ParticleField;
use crate::params::FieldParams;
use crate::surface::{Surface, SurfaceRect};

/// Input signals the effect listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Resize,
    PointerMove,
    TouchMove,
    PointerLeave,
    TouchEnd,
}

/// Every signal a mounted effect subscribes to.
pub const SIGNALS: [Signal; 5] = [
    Signal::Resize,
    Signal::PointerMove,
    Signal::TouchMove,
    Signal::PointerLeave,
    Signal::TouchEnd,
];

/// Input delivered by the host. Coordinates are in viewport units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Resize,
    PointerMove { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    PointerLeave,
    TouchEnd,
}

impl InputEvent {
    pub fn signal(&self) -> Signal {
        match self {
            InputEvent::Resize => Signal::Resize,
            InputEvent::PointerMove { .. } => Signal::PointerMove,
            InputEvent::TouchMove { .. } => Signal::TouchMove,
            InputEvent::PointerLeave => Signal::PointerLeave,
            InputEvent::TouchEnd => Signal::TouchEnd,
        }
    }
}

/// Handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Handle for a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Environment the effect is mounted into.
pub trait Host {
    /// Measure the surface's current box in the viewport.
    fn surface_rect(&self) -> SurfaceRect;

    fn add_listener(&mut self, signal: Signal) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A particle field mounted into a [`Host`].
///
/// Teardown consumes the effect, so no frame can run after
/// [`FieldEffect::unmount`].
#[derive(Debug)]
pub struct FieldEffect<R> {
    field: ParticleField<R>,
    rect: SurfaceRect,
    listeners: Vec<(Signal, ListenerId)>,
    pending_frame: Option<FrameHandle>,
}

impl<R: Rng> FieldEffect<R> {
    /// Measure the surface, populate the field, subscribe and start the loop.
    pub fn mount<H: Host + ?Sized>(
        host: &mut H,
        params: FieldParams,
        motion: MotionPreference,
        rng: R,
    ) -> Self {
        let rect = host.surface_rect();
        let mut field = ParticleField::new(params, motion, rng);
        field.resize(rect.dimensions);

        let listeners = SIGNALS
            .iter()
            .map(|&signal| (signal, host.add_listener(signal)))
            .collect();
        let pending_frame = Some(host.request_frame());

        tracing::info!(
            width = rect.dimensions.width,
            height = rect.dimensions.height,
            particles = field.particles().len(),
            "mounted particle field"
        );

        Self {
            field,
            rect,
            listeners,
            pending_frame,
        }
    }

    /// Apply one input event.
    pub fn handle<H: Host + ?Sized>(&mut self, host: &H, event: InputEvent) {
        if !self.is_listening(event.signal()) {
            return;
        }
        match event {
            InputEvent::Resize => {
                self.rect = host.surface_rect();
                self.field.resize(self.rect.dimensions);
            }
            InputEvent::PointerMove { x, y } | InputEvent::TouchMove { x, y } => {
                let (lx, ly) = self.rect.to_local(x, y);
                self.field.track_pointer(lx, ly);
            }
            InputEvent::PointerLeave | InputEvent::TouchEnd => self.field.clear_pointer(),
        }
    }

    /// Run the frame callback for `handle` and schedule the next one.
    ///
    /// Returns `false` without drawing when `handle` is stale or cancelled.
    pub fn on_frame<H, S>(&mut self, host: &mut H, handle: FrameHandle, surface: &mut S) -> bool
    where
        H: Host + ?Sized,
        S: Surface + ?Sized,
    {
        if self.pending_frame != Some(handle) {
            tracing::trace!(?handle, "ignoring stale frame");
            return false;
        }
        self.field.frame(surface);
        self.pending_frame = Some(host.request_frame());
        true
    }

    /// Detach every listener and cancel the pending frame.
    pub fn unmount<H: Host + ?Sized>(mut self, host: &mut H) {
        for (_, id) in self.listeners.drain(..) {
            host.remove_listener(id);
        }
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        tracing::info!("unmounted particle field");
    }

    fn is_listening(&self, signal: Signal) -> bool {
        self.listeners.iter().any(|&(s, _)| s == signal)
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn rect(&self) -> SurfaceRect {
        self.rect
    }

    pub fn set_motion(&mut self, motion: MotionPreference) {
        self.field.set_motion(motion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[derive(Debug, Default)]
    struct MockHost {
        rect: SurfaceRect,
        next_id: u64,
        active_listeners: HashSet<ListenerId>,
        pending_frames: HashSet<FrameHandle>,
        added: usize,
        removed: usize,
        requested: usize,
        cancelled: usize,
    }

    impl MockHost {
        fn new(rect: SurfaceRect) -> Self {
            Self {
                rect,
                ..Default::default()
            }
        }

        /// Fire the scheduled callback the way a display refresh would.
        fn fire(&mut self) -> FrameHandle {
            let handle = *self.pending_frames.iter().next().expect("a frame is pending");
            self.pending_frames.remove(&handle);
            handle
        }
    }

    impl Host for MockHost {
        fn surface_rect(&self) -> SurfaceRect {
            self.rect
        }

        fn add_listener(&mut self, _signal: Signal) -> ListenerId {
            self.next_id += 1;
            self.added += 1;
            let id = ListenerId(self.next_id);
            self.active_listeners.insert(id);
            id
        }

        fn remove_listener(&mut self, id: ListenerId) {
            self.removed += 1;
            self.active_listeners.remove(&id);
        }

        fn request_frame(&mut self) -> FrameHandle {
            self.next_id += 1;
            self.requested += 1;
            let handle = FrameHandle(self.next_id);
            self.pending_frames.insert(handle);
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled += 1;
            self.pending_frames.remove(&handle);
        }
    }

    fn mount(host: &mut MockHost) -> FieldEffect<StdRng> {
        FieldEffect::mount(
            host,
            FieldParams::default(),
            MotionPreference::Full,
            StdRng::seed_from_u64(9),
        )
    }

    #[test]
    fn test_mount_populates_and_subscribes() {
        let mut host = MockHost::new(SurfaceRect::new(0, 0, 800, 600));
        let effect = mount(&mut host);

        assert_eq!(effect.field().particles().len(), 48);
        assert_eq!(host.active_listeners.len(), SIGNALS.len());
        assert_eq!(host.pending_frames.len(), 1);
    }

    #[test]
    fn test_teardown_leaves_nothing_behind() {
        let mut host = MockHost::new(SurfaceRect::new(0, 0, 800, 600));
        let effect = mount(&mut host);
        effect.unmount(&mut host);

        assert_eq!(host.removed, 5);
        assert_eq!(host.cancelled, 1);
        assert!(host.active_listeners.is_empty());
        assert!(host.pending_frames.is_empty());
    }

    #[test]
    fn test_teardown_after_frames() {
        let mut host = MockHost::new(SurfaceRect::new(0, 0, 800, 600));
        let mut effect = mount(&mut host);
        let mut scene = Scene::default();
        for _ in 0..3 {
            let handle = host.fire();
            assert!(effect.on_frame(&mut host, handle, &mut scene));
        }
        assert_eq!(host.requested, 4);

        effect.unmount(&mut host);
        assert!(host.active_listeners.is_empty());
        assert!(host.pending_frames.is_empty());
        assert_eq!(host.cancelled, 1);
    }

    #[test]
    fn test_stale_frame_is_ignored() {
        let mut host = MockHost::new(SurfaceRect::new(0, 0, 800, 600));
        let mut effect = mount(&mut host);
        let mut scene = Scene::default();

        assert!(!effect.on_frame(&mut host, FrameHandle(9999), &mut scene));
        assert!(scene.shapes().is_empty());
        assert_eq!(host.requested, 1);
    }

    #[test]
    fn test_frame_draws_every_particle() {
        let mut host = MockHost::new(SurfaceRect::new(0, 0, 800, 600));
        let mut effect = mount(&mut host);
        let mut scene = Scene::default();
        let handle = host.fire();
        effect.on_frame(&mut host, handle, &mut scene);

        assert_eq!(scene.circles().count(), 48);
    }

    #[test]
    fn test_pointer_translated_to_surface_local() {
        let mut host = MockHost::new(SurfaceRect::new(100, 50, 800, 600));
        let mut effect = mount(&mut host);

        effect.handle(&host, InputEvent::PointerMove { x: 150.0, y: 80.0 });
        assert_eq!(effect.field().pointer().position(), Some((50.0, 30.0)));

        effect.handle(&host, InputEvent::TouchMove { x: 110.0, y: 60.0 });
        assert_eq!(effect.field().pointer().position(), Some((10.0, 10.0)));

        effect.handle(&host, InputEvent::TouchEnd);
        assert_eq!(effect.field().pointer().position(), None);

        effect.handle(&host, InputEvent::PointerMove { x: 150.0, y: 80.0 });
        effect.handle(&host, InputEvent::PointerLeave);
        assert_eq!(effect.field().pointer().position(), None);
    }

    #[test]
    fn test_resize_remeasures_and_regenerates() {
        let mut host = MockHost::new(SurfaceRect::new(0, 0, 800, 600));
        let mut effect = mount(&mut host);

        host.rect = SurfaceRect::new(0, 0, 200, 100);
        effect.handle(&host, InputEvent::Resize);

        assert_eq!(effect.rect(), SurfaceRect::new(0, 0, 200, 100));
        assert_eq!(effect.field().particles().len(), 2);
        for p in effect.field().particles() {
            assert!(p.x <= 200.0 && p.y <= 100.0);
        }
    }

    #[test]
    fn test_zero_size_mount_is_silent_noop() {
        let mut host = MockHost::new(SurfaceRect::default());
        let mut effect = mount(&mut host);
        let mut scene = Scene::default();
        let handle = host.fire();

        assert!(effect.on_frame(&mut host, handle, &mut scene));
        assert!(scene.shapes().is_empty());
    }
}
