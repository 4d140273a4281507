//! Window Lifecycle Controller
//!
//! Minimize, maximize/restore, close and drag-to-move. Each operation
//! branches on the negotiated [`Runtime`]: the native shell moves the real
//! window, the browser fallback fakes the effect on the document.
//!
//! Bridge calls made here are best-effort. Failures are logged and the
//! operation is abandoned; nothing is retried.

use crate::{
    bridge::{CloseHandler, CloseTask, Timer},
    config::WindowConfig,
    detect::Runtime,
    host::Surface,
    types::{CloseOutcome, PointerButton, PointerInput, Position},
};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, trace, warn};

/// Work that must finish before the window goes away
#[async_trait(?Send)]
pub trait Cleanup {
    async fn cleanup(&self);
}

/// Drag tracking owned by the window controller.
///
/// `window_origin` and `pointer_offset` only carry meaning while `active`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    active: bool,
    generation: u64,
    start_pointer: Position,
    window_origin: Option<Position>,
    pointer_offset: Option<Position>,
}

impl DragState {
    /// Start a new drag and return its generation
    pub fn begin(&mut self, pointer: Position) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.active = true;
        self.start_pointer = pointer;
        self.window_origin = None;
        self.pointer_offset = None;
        self.generation
    }

    /// Record the window origin looked up for drag `generation`.
    ///
    /// Ignored when that drag already ended or a newer one started.
    pub fn anchor(&mut self, generation: u64, origin: Position, pointer_screen: Position) -> bool {
        if !self.active || self.generation != generation {
            return false;
        }
        self.window_origin = Some(origin);
        self.pointer_offset = Some(pointer_screen - origin);
        true
    }

    /// End the drag; returns whether one was active
    pub fn end(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        self.window_origin = None;
        self.pointer_offset = None;
        was_active
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_pointer(&self) -> Position {
        self.start_pointer
    }

    pub fn window_origin(&self) -> Option<Position> {
        self.window_origin.filter(|_| self.active)
    }

    pub fn pointer_offset(&self) -> Option<Position> {
        self.pointer_offset.filter(|_| self.active)
    }

    /// Native target window position for a pointer at `pointer_screen`
    pub fn target_for(&self, pointer_screen: Position) -> Option<Position> {
        self.pointer_offset().map(|offset| pointer_screen - offset)
    }

    /// Pointer displacement since the drag started
    pub fn displacement(&self, pointer_client: Position) -> Position {
        pointer_client - self.start_pointer
    }
}

/// Minimize, maximize, close and drag-to-move for the single player window
pub struct WindowController {
    runtime: Runtime,
    surface: Rc<dyn Surface>,
    timer: Rc<dyn Timer>,
    cleanup: Rc<dyn Cleanup>,
    config: WindowConfig,
    drag: RefCell<DragState>,
    closing: Cell<bool>,
}

impl WindowController {
    pub fn new(
        runtime: Runtime,
        surface: Rc<dyn Surface>,
        timer: Rc<dyn Timer>,
        cleanup: Rc<dyn Cleanup>,
        config: WindowConfig,
    ) -> Self {
        Self {
            runtime,
            surface,
            timer,
            cleanup,
            config,
            drag: RefCell::new(DragState::default()),
            closing: Cell::new(false),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Snapshot of the drag state
    pub fn drag_state(&self) -> DragState {
        *self.drag.borrow()
    }

    pub fn is_closing(&self) -> bool {
        self.closing.get()
    }

    /// Minimize the window, or slide the document out and hide it
    pub async fn minimize(&self) {
        match &self.runtime {
            Runtime::NativeReady(bridge) => {
                if let Err(e) = bridge.minimize().await {
                    error!(error = %e, "Minimize failed");
                }
            }
            Runtime::Fallback => {
                self.surface.set_transform(&self.config.slide_out_transform);
                self.timer.sleep(self.config.minimize_hide_delay()).await;
                self.surface.hide();
            }
        }
    }

    /// Toggle maximized state, or whole-document fullscreen in the browser
    pub async fn toggle_maximize(&self) {
        match &self.runtime {
            Runtime::NativeReady(bridge) => {
                let result = match bridge.is_maximized().await {
                    Ok(true) => bridge.unmaximize().await,
                    Ok(false) => bridge.maximize().await,
                    Err(e) => Err(e),
                };
                if let Err(e) = result {
                    error!(error = %e, "Maximize toggle failed");
                }
            }
            Runtime::Fallback => {
                let result = if self.surface.is_fullscreen() {
                    self.surface.exit_fullscreen().await
                } else {
                    self.surface.request_fullscreen().await
                };
                if let Err(e) = result {
                    error!(error = %e, "Fullscreen toggle failed");
                }
            }
        }
    }

    /// Run cleanup and request termination, at most once at a time.
    ///
    /// A second call while the first is in flight is a no-op. When the
    /// termination request fails the guard is reset so the user can retry.
    pub async fn close(&self) -> CloseOutcome {
        if self.closing.replace(true) {
            debug!("Close already in progress");
            return CloseOutcome::AlreadyClosing;
        }

        self.cleanup.cleanup().await;

        let result = match &self.runtime {
            Runtime::NativeReady(bridge) => bridge.close().await,
            Runtime::Fallback => self.surface.close_window(),
        };

        match result {
            Ok(()) => {
                info!(mode = self.runtime.label(), "Close requested");
                CloseOutcome::Requested
            }
            Err(e) => {
                error!(error = %e, "Close failed");
                self.closing.set(false);
                CloseOutcome::Failed
            }
        }
    }

    /// Handle a close request raised by the window manager.
    ///
    /// Routed through [`WindowController::close`] so cleanup still runs
    /// before the window is destroyed, and only once.
    pub async fn handle_close_requested(&self) -> CloseOutcome {
        debug!("Window manager requested close");
        self.close().await
    }

    /// Route window-manager close requests through [`WindowController::handle_close_requested`].
    ///
    /// Only the native shell raises these; in the browser this is a no-op.
    pub async fn watch_close_requests(self: &Rc<Self>) {
        let Some(bridge) = self.runtime.bridge() else {
            return;
        };

        let window = Rc::clone(self);
        let handler: CloseHandler = Box::new(move || -> CloseTask {
            let window = Rc::clone(&window);
            Box::pin(async move {
                window.handle_close_requested().await;
            })
        });

        match bridge.subscribe_close_requested(handler).await {
            Ok(()) => debug!("Watching window manager close requests"),
            Err(e) => error!(error = %e, "Could not subscribe to close requests"),
        }
    }

    /// Pointer pressed on the drag handle
    pub async fn pointer_down(&self, input: PointerInput) {
        if input.button != PointerButton::Primary {
            trace!(button = ?input.button, "Ignoring non-primary pointer down");
            return;
        }

        let generation = self.drag.borrow_mut().begin(input.client);

        match &self.runtime {
            Runtime::NativeReady(bridge) => match bridge.outer_position().await {
                Ok(origin) => {
                    let anchored = self
                        .drag
                        .borrow_mut()
                        .anchor(generation, origin, input.screen);
                    if anchored {
                        debug!(origin = %origin, pointer = %input.screen, "Drag anchored");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Could not read window position, drag will not track");
                }
            },
            Runtime::Fallback => self.surface.set_grabbing(true),
        }
    }

    /// Pointer moved anywhere in the document.
    ///
    /// In native mode this issues one position request per call without
    /// coalescing; concurrent requests may land out of order.
    pub async fn pointer_move(&self, input: PointerInput) {
        let drag = self.drag_state();
        if !drag.is_active() {
            return;
        }

        match &self.runtime {
            Runtime::NativeReady(bridge) => {
                let Some(target) = drag.target_for(input.screen) else {
                    trace!("Drag not anchored yet, skipping move");
                    return;
                };
                if let Err(e) = bridge.set_position(target).await {
                    error!(error = %e, target = %target, "Window move failed");
                }
            }
            Runtime::Fallback => {
                let moved = drag.displacement(input.client);
                self.surface.set_transform(&moved.to_translate());
                self.surface.set_transition("none");
            }
        }
    }

    /// Pointer released anywhere in the document
    pub fn pointer_up(&self) {
        if !self.drag.borrow_mut().end() {
            return;
        }

        if let Runtime::Fallback = self.runtime {
            self.surface.set_grabbing(false);
            self.surface.set_transform("");
            self.surface.set_transition(&self.config.restore_transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_anchor_computes_offset() {
        let mut drag = DragState::default();
        let generation = drag.begin(Position::new(100, 100));
        assert!(drag.anchor(generation, Position::new(50, 50), Position::new(100, 100)));
        assert_eq!(drag.pointer_offset(), Some(Position::new(50, 50)));
        assert_eq!(
            drag.target_for(Position::new(130, 120)),
            Some(Position::new(80, 70))
        );
    }

    #[test]
    fn test_stale_anchor_is_ignored() {
        let mut drag = DragState::default();
        let first = drag.begin(Position::new(0, 0));
        drag.end();
        let second = drag.begin(Position::new(10, 10));
        assert!(!drag.anchor(first, Position::new(5, 5), Position::new(10, 10)));
        assert_eq!(drag.pointer_offset(), None);
        assert!(drag.anchor(second, Position::new(5, 5), Position::new(10, 10)));
    }

    #[test]
    fn test_end_clears_offsets() {
        let mut drag = DragState::default();
        let generation = drag.begin(Position::new(1, 1));
        drag.anchor(generation, Position::new(0, 0), Position::new(1, 1));
        assert!(drag.end());
        assert!(!drag.is_active());
        assert_eq!(drag.window_origin(), None);
        assert_eq!(drag.target_for(Position::new(3, 3)), None);
        assert!(!drag.end());
    }

    #[test]
    fn test_displacement() {
        let mut drag = DragState::default();
        drag.begin(Position::new(100, 100));
        assert_eq!(drag.displacement(Position::new(140, 115)), Position::new(40, 15));
    }
}
