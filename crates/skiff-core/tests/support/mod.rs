//! In-memory hosts for exercising the shell without a browser or a desktop runtime

#![allow(dead_code)]

use async_trait::async_trait;
use skiff_core::{
    BridgeProbe, CloseHandler, CloseTask, DialogFilter, DropCue, Error, LocalFiles, MediaElement, PlayerShell, Position,
    Result, Runtime, ShellBridge, ShellConfig, Surface, Timer,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

// =============================================================================
// Shell bridge
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCall {
    OuterPosition,
    SetPosition(Position),
    Minimize,
    IsMaximized,
    Maximize,
    Unmaximize,
    Close,
    OpenDialog(DialogFilter),
    Convert(String),
    Subscribe,
}

#[derive(Default)]
pub struct BridgeState {
    pub calls: RefCell<Vec<BridgeCall>>,
    /// `None` makes the position lookup fail
    pub origin: Cell<Option<Position>>,
    pub maximized: Cell<bool>,
    pub fail_is_maximized: Cell<bool>,
    pub fail_close: Cell<bool>,
    pub fail_minimize: Cell<bool>,
    pub fail_set_position: Cell<bool>,
    pub fail_convert: Cell<bool>,
    pub dialog_result: RefCell<Option<String>>,
    pub close_handler: RefCell<Option<CloseHandler>>,
}

/// Bridge whose clones share one call log
#[derive(Clone, Default)]
pub struct MockBridge {
    pub state: Rc<BridgeState>,
}

impl MockBridge {
    pub fn with_origin(origin: Position) -> Self {
        let bridge = Self::default();
        bridge.state.origin.set(Some(origin));
        bridge
    }

    pub fn calls(&self) -> Vec<BridgeCall> {
        self.state.calls.borrow().clone()
    }

    pub fn count(&self, call: &BridgeCall) -> usize {
        self.state.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Fire the subscribed close-request handler, as the host does when
    /// the window manager asks to close
    pub fn request_close(&self) -> Option<CloseTask> {
        self.state.close_handler.borrow().as_ref().map(|handler| handler())
    }

    fn record(&self, call: BridgeCall) {
        self.state.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl ShellBridge for MockBridge {
    async fn outer_position(&self) -> Result<Position> {
        self.record(BridgeCall::OuterPosition);
        tokio::task::yield_now().await;
        self.state
            .origin
            .get()
            .ok_or_else(|| Error::shell("outer_position", "no window"))
    }

    async fn set_position(&self, position: Position) -> Result<()> {
        self.record(BridgeCall::SetPosition(position));
        if self.state.fail_set_position.get() {
            return Err(Error::shell("set_position", "refused"));
        }
        Ok(())
    }

    async fn minimize(&self) -> Result<()> {
        self.record(BridgeCall::Minimize);
        if self.state.fail_minimize.get() {
            return Err(Error::shell("minimize", "refused"));
        }
        Ok(())
    }

    async fn is_maximized(&self) -> Result<bool> {
        self.record(BridgeCall::IsMaximized);
        if self.state.fail_is_maximized.get() {
            return Err(Error::shell("is_maximized", "window gone"));
        }
        Ok(self.state.maximized.get())
    }

    async fn maximize(&self) -> Result<()> {
        self.record(BridgeCall::Maximize);
        self.state.maximized.set(true);
        Ok(())
    }

    async fn unmaximize(&self) -> Result<()> {
        self.record(BridgeCall::Unmaximize);
        self.state.maximized.set(false);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(BridgeCall::Close);
        tokio::task::yield_now().await;
        if self.state.fail_close.get() {
            return Err(Error::shell("close", "refused"));
        }
        Ok(())
    }

    async fn open_dialog(&self, filter: &DialogFilter) -> Result<Option<String>> {
        self.record(BridgeCall::OpenDialog(filter.clone()));
        Ok(self.state.dialog_result.borrow().clone())
    }

    async fn convert_file_src(&self, path: &str) -> Result<String> {
        self.record(BridgeCall::Convert(path.to_string()));
        if self.state.fail_convert.get() {
            return Err(Error::shell("convert_file_src", "bad path"));
        }
        Ok(format!("asset://localhost/{path}"))
    }

    async fn subscribe_close_requested(&self, handler: CloseHandler) -> Result<()> {
        self.record(BridgeCall::Subscribe);
        *self.state.close_handler.borrow_mut() = Some(handler);
        Ok(())
    }
}

/// Probe that reports the capability ready on the `ready_on`-th check
pub struct MockProbe {
    pub present: bool,
    pub ready_on: Option<u32>,
    pub checks: Cell<u32>,
    pub bridge: MockBridge,
}

impl MockProbe {
    pub fn absent() -> Self {
        Self {
            present: false,
            ready_on: None,
            checks: Cell::new(0),
            bridge: MockBridge::default(),
        }
    }

    pub fn ready_on(check: u32) -> Self {
        Self {
            present: true,
            ready_on: Some(check),
            ..Self::absent()
        }
    }

    pub fn never_ready() -> Self {
        Self {
            present: true,
            ..Self::absent()
        }
    }
}

impl BridgeProbe for MockProbe {
    type Bridge = MockBridge;

    fn bridge_present(&self) -> bool {
        self.present
    }

    fn acquire(&self) -> Option<MockBridge> {
        let check = self.checks.get() + 1;
        self.checks.set(check);
        match self.ready_on {
            Some(ready) if check >= ready => Some(self.bridge.clone()),
            _ => None,
        }
    }
}

// =============================================================================
// Timer
// =============================================================================

#[derive(Default)]
pub struct MockTimer {
    pub sleeps: RefCell<Vec<Duration>>,
}

#[async_trait(?Send)]
impl Timer for MockTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Document surface
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Transform(String),
    Transition(String),
    Grabbing(bool),
    Hidden,
    DropCue(String),
    DropCueCleared,
    FullscreenRequested,
    FullscreenExited,
    WindowClosed,
}

#[derive(Default)]
pub struct MockSurface {
    pub events: RefCell<Vec<SurfaceEvent>>,
    pub fullscreen: Cell<bool>,
    pub fail_fullscreen: Cell<bool>,
    pub fail_close_window: Cell<bool>,
}

impl MockSurface {
    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn last_transform(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Transform(t) => Some(t.clone()),
            _ => None,
        })
    }

    pub fn has(&self, event: &SurfaceEvent) -> bool {
        self.events.borrow().contains(event)
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[async_trait(?Send)]
impl Surface for MockSurface {
    fn set_transform(&self, transform: &str) {
        self.record(SurfaceEvent::Transform(transform.to_string()));
    }

    fn set_transition(&self, transition: &str) {
        self.record(SurfaceEvent::Transition(transition.to_string()));
    }

    fn set_grabbing(&self, grabbing: bool) {
        self.record(SurfaceEvent::Grabbing(grabbing));
    }

    fn hide(&self) {
        self.record(SurfaceEvent::Hidden);
    }

    fn show_drop_cue(&self, cue: &DropCue) {
        self.record(SurfaceEvent::DropCue(cue.outline.clone()));
    }

    fn clear_drop_cue(&self) {
        self.record(SurfaceEvent::DropCueCleared);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    async fn request_fullscreen(&self) -> Result<()> {
        self.record(SurfaceEvent::FullscreenRequested);
        if self.fail_fullscreen.get() {
            return Err(Error::Fullscreen("permission denied".into()));
        }
        self.fullscreen.set(true);
        Ok(())
    }

    async fn exit_fullscreen(&self) -> Result<()> {
        self.record(SurfaceEvent::FullscreenExited);
        self.fullscreen.set(false);
        Ok(())
    }

    fn close_window(&self) -> Result<()> {
        self.record(SurfaceEvent::WindowClosed);
        if self.fail_close_window.get() {
            return Err(Error::WindowClose("blocked by browser".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Media element
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    SetSrc(String),
    RemoveSrc,
    Load,
    Play,
    Pause,
}

#[derive(Default)]
pub struct MockMedia {
    pub src: RefCell<Option<String>>,
    pub events: RefCell<Vec<MediaEvent>>,
    pub reject_play: Cell<bool>,
}

impl MockMedia {
    pub fn src_value(&self) -> Option<String> {
        self.src.borrow().clone()
    }

    pub fn count(&self, event: &MediaEvent) -> usize {
        self.events.borrow().iter().filter(|e| *e == event).count()
    }
}

#[async_trait(?Send)]
impl MediaElement for MockMedia {
    fn set_src(&self, url: &str) {
        *self.src.borrow_mut() = Some(url.to_string());
        self.events.borrow_mut().push(MediaEvent::SetSrc(url.to_string()));
    }

    fn remove_src(&self) {
        *self.src.borrow_mut() = None;
        self.events.borrow_mut().push(MediaEvent::RemoveSrc);
    }

    fn load(&self) {
        self.events.borrow_mut().push(MediaEvent::Load);
    }

    async fn play(&self) -> Result<()> {
        self.events.borrow_mut().push(MediaEvent::Play);
        if self.reject_play.get() {
            return Err(Error::Playback("NotAllowedError".into()));
        }
        Ok(())
    }

    fn pause(&self) {
        self.events.borrow_mut().push(MediaEvent::Pause);
    }
}

// =============================================================================
// Local files
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MockFile {
    pub name: String,
    pub mime: String,
}

impl MockFile {
    pub fn new(name: &str, mime: &str) -> Self {
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
        }
    }

    pub fn video(name: &str) -> Self {
        Self::new(name, "video/mp4")
    }
}

#[derive(Default)]
pub struct MockFiles {
    pub created: RefCell<Vec<String>>,
    pub revoked: RefCell<Vec<String>>,
    pub fail_revoke: Cell<bool>,
    pub picked: RefCell<Option<MockFile>>,
    pub picks: Cell<u32>,
}

#[async_trait(?Send)]
impl LocalFiles for MockFiles {
    type File = MockFile;

    fn content_type(&self, file: &MockFile) -> String {
        file.mime.clone()
    }

    fn create_object_url(&self, file: &MockFile) -> Result<String> {
        let url = format!("blob:skiff/{}", file.name);
        self.created.borrow_mut().push(url.clone());
        Ok(url)
    }

    fn revoke_object_url(&self, url: &str) -> Result<()> {
        self.revoked.borrow_mut().push(url.to_string());
        if self.fail_revoke.get() {
            return Err(Error::ObjectUrl("unknown URL".into()));
        }
        Ok(())
    }

    async fn pick_file(&self, _accept: &str) -> Option<MockFile> {
        self.picks.set(self.picks.get() + 1);
        self.picked.borrow().clone()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub struct Fixture {
    pub shell: PlayerShell<MockFiles>,
    pub bridge: MockBridge,
    pub surface: Rc<MockSurface>,
    pub media: Rc<MockMedia>,
    pub timer: Rc<MockTimer>,
}

impl Fixture {
    pub fn files(&self) -> &MockFiles {
        self.shell.media().files()
    }
}

fn build(runtime: Runtime, bridge: MockBridge) -> Fixture {
    let surface = Rc::new(MockSurface::default());
    let media = Rc::new(MockMedia::default());
    let timer = Rc::new(MockTimer::default());
    let shell = PlayerShell::with_runtime(
        ShellConfig::default(),
        runtime,
        timer.clone(),
        surface.clone(),
        media.clone(),
        MockFiles::default(),
    );
    Fixture {
        shell,
        bridge,
        surface,
        media,
        timer,
    }
}

/// Shell running against a native bridge
pub fn native(bridge: MockBridge) -> Fixture {
    build(Runtime::NativeReady(Rc::new(bridge.clone())), bridge)
}

/// Shell running in the browser fallback
pub fn fallback() -> Fixture {
    build(Runtime::Fallback, MockBridge::default())
}
