use crate::barcode_loop::BarcodeLoop;
use crate::config::ScanConfig;
use crate::device::{BarcodeDecoder, CameraSource, CameraStream, OcrEngine, VehicleRegistry, VideoSource};
use crate::error::ScanError;
use crate::ocr_loop::OcrLoop;
use crate::session::{LogEntry, ScanMode, ScanSession, ScanStatus, SessionHandle};
use crate::FrameClock;
use vin_capture_core::FrameBuffer;
use vin_capture_preprocess::Preprocessor;
use vin_capture_vin::Vin;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Host-side callbacks. `Send` so the controller can be moved into a
/// spawned task.
pub trait ScanObserver: Send {
    /// A VIN was accepted. Called at most once per session.
    fn on_scan(&mut self, _vin: &Vin) {}

    /// The session could not start; `notice` is meant for the user.
    fn on_fatal(&mut self, _notice: &str) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// External services the controller drives.
#[derive(Debug)]
pub struct Collaborators<C, O, B, R> {
    pub camera: C,
    pub ocr: O,
    pub barcode: B,
    pub registry: R,
}

/// Result of one [`CaptureController::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing accepted yet; schedule another attempt.
    Retry,
    /// A VIN was accepted and the session torn down.
    Accepted(Vin),
    /// No live loop: closed, cancelled, failed or never opened.
    Stopped,
}

enum ActiveLoop<H> {
    Text(OcrLoop<H>),
    Barcode(BarcodeLoop),
}

/// Owns the camera stream, the active recognition loop and the session.
///
/// Every exit path (acceptance, fatal open, [`close`](Self::close), mode
/// switch, cancellation through a [`SessionHandle`], drop) goes through one
/// teardown that stops the stream tracks, disposes the recognizer or resets
/// the decoder, and clears the flash state.
pub struct CaptureController<C, O, B, R>
where
    C: CameraSource,
    O: OcrEngine,
    B: BarcodeDecoder,
    R: VehicleRegistry,
{
    config: ScanConfig,
    collaborators: Collaborators<C, O, B, R>,
    session: Option<ScanSession>,
    stream: Option<C::Stream>,
    active: Option<ActiveLoop<O::Handle>>,
    live: SessionHandle,
    observer: Box<dyn ScanObserver>,
}

impl<C, O, B, R> CaptureController<C, O, B, R>
where
    C: CameraSource,
    O: OcrEngine,
    B: BarcodeDecoder,
    R: VehicleRegistry,
{
    pub fn new(config: ScanConfig, collaborators: Collaborators<C, O, B, R>) -> Self {
        Self {
            config,
            collaborators,
            session: None,
            stream: None,
            active: None,
            live: SessionHandle::closed(),
            observer: Box::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl ScanObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn collaborators(&self) -> &Collaborators<C, O, B, R> {
        &self.collaborators
    }

    /// Current or last session, if any was opened.
    pub fn session(&self) -> Option<&ScanSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> ScanStatus {
        self.session.as_ref().map_or(ScanStatus::Idle, ScanSession::status)
    }

    pub fn log(&self) -> &[LogEntry] {
        self.session
            .as_ref()
            .map(ScanSession::entries)
            .unwrap_or_default()
    }

    pub fn has_flash(&self) -> bool {
        self.session.as_ref().is_some_and(ScanSession::has_flash)
    }

    pub fn is_flash_on(&self) -> bool {
        self.session.as_ref().is_some_and(ScanSession::is_flash_on)
    }

    /// Whether a camera stream is currently held.
    pub fn holds_camera(&self) -> bool {
        self.stream.is_some()
    }

    /// Cancellation handle for the current session. Closing it makes the
    /// next [`step`](Self::step) tear everything down.
    pub fn handle(&self) -> SessionHandle {
        self.live.clone()
    }

    /// Acquire the camera and start the loop for `mode`.
    ///
    /// Any previous session is torn down first. Camera and recognizer
    /// failures are fatal: the session is marked `Failed`, the observer is
    /// notified and nothing stays allocated.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip(self)))]
    pub async fn open(&mut self, mode: ScanMode) -> Result<(), ScanError> {
        self.teardown();
        self.live = SessionHandle::live();

        let mut session = ScanSession::new(mode);
        session.set_status(ScanStatus::Opening);
        session.log(format!("opening camera for {} scan", mode.label()));
        self.session = Some(session);

        let acquired = self
            .collaborators
            .camera
            .acquire(&self.config.constraints)
            .await;
        let stream = match acquired {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("camera unavailable: {e}");
                self.fail(format!("camera unavailable: {e}"));
                return Err(e.into());
            }
        };
        // Stored before any further await so a dropped `open` future still
        // leaves the stream to close() or Drop.
        let torch = stream.capabilities().torch;
        self.stream = Some(stream);
        if let Some(session) = self.session.as_mut() {
            session.set_has_flash(torch);
            session.set_status(ScanStatus::Streaming);
            session.log(format!("camera ready (torch: {})", if torch { "yes" } else { "no" }));
        }

        let active = match mode {
            ScanMode::Text => {
                let handle = match self.collaborators.ocr.initialize(&self.config.ocr).await {
                    Ok(handle) => handle,
                    Err(e) => {
                        log::warn!("OCR engine unavailable: {e}");
                        self.fail(format!("text recognition unavailable: {e}"));
                        return Err(e.into());
                    }
                };
                ActiveLoop::Text(OcrLoop::new(
                    handle,
                    self.config.band.clone(),
                    Preprocessor::new(self.config.preprocess.clone()),
                    self.config.gate.clone(),
                ))
            }
            ScanMode::Barcode => ActiveLoop::Barcode(BarcodeLoop::new()),
        };
        self.active = Some(active);

        if let Some(session) = self.session.as_mut() {
            session.set_status(ScanStatus::Scanning);
            session.log(format!("scanning ({})", mode.label()));
        }
        log::info!("{} scan session open", mode.label());
        Ok(())
    }

    /// Scan-band crop of the current camera frame, `None` while the camera
    /// has no full frame yet.
    pub fn capture_frame(&mut self) -> Option<FrameBuffer> {
        let frame = self.stream.as_mut()?.current_frame()?;
        self.config.band.crop(&frame)
    }

    /// Flip the torch. Returns whether the change was applied; failures are
    /// only logged.
    pub async fn toggle_flash(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(stream) = self.stream.as_mut() else {
            session.log("flash: camera is not open");
            return false;
        };
        if !session.has_flash() {
            session.log("flash is not supported on this camera");
            return false;
        }
        let target = !session.is_flash_on();
        match stream.apply_torch(target).await {
            Ok(()) => {
                session.set_flash_on(target);
                session.log(if target { "flash on" } else { "flash off" });
                true
            }
            Err(e) => {
                log::warn!("torch toggle failed: {e}");
                session.log(format!("flash toggle failed: {e}"));
                false
            }
        }
    }

    /// Full restart in `mode`: tear down, then open again.
    pub async fn switch_mode(&mut self, mode: ScanMode) -> Result<(), ScanError> {
        log::debug!("switching to {} scan", mode.label());
        self.teardown();
        self.open(mode).await
    }

    /// Release everything. Safe from any state and on repeated calls.
    pub fn close(&mut self) {
        self.teardown();
        if let Some(session) = self.session.as_mut() {
            if !session.status().is_terminal() {
                session.set_status(ScanStatus::Idle);
            }
        }
    }

    /// Stop reporting diagnostics. The loop keeps running.
    pub fn pause(&mut self) -> bool {
        match self.session.as_mut() {
            Some(s) if s.status() == ScanStatus::Scanning => {
                s.set_status(ScanStatus::Paused);
                true
            }
            _ => false,
        }
    }

    pub fn resume(&mut self) -> bool {
        match self.session.as_mut() {
            Some(s) if s.status() == ScanStatus::Paused => {
                s.set_status(ScanStatus::Scanning);
                true
            }
            _ => false,
        }
    }

    /// One recognition attempt.
    pub async fn step(&mut self) -> StepOutcome {
        if !self.live.is_live() {
            self.teardown();
            return StepOutcome::Stopped;
        }
        let (Some(session), Some(stream), Some(active)) = (
            self.session.as_mut(),
            self.stream.as_mut(),
            self.active.as_mut(),
        ) else {
            return StepOutcome::Stopped;
        };
        if !matches!(session.status(), ScanStatus::Scanning | ScanStatus::Paused) {
            return StepOutcome::Stopped;
        }

        let accepted = match active {
            ActiveLoop::Text(ocr) => {
                ocr.step(stream, &self.collaborators.registry, session, &self.live)
                    .await
            }
            ActiveLoop::Barcode(barcode) => {
                let source: &mut dyn VideoSource = stream;
                barcode
                    .step(&mut self.collaborators.barcode, source, session, &self.live)
                    .await
            }
        };

        if !self.live.is_live() {
            self.teardown();
            return StepOutcome::Stopped;
        }
        match accepted {
            Some(vin) => {
                if let Some(session) = self.session.as_mut() {
                    session.set_status(ScanStatus::Succeeded);
                }
                self.teardown();
                log::info!("VIN accepted: {vin}");
                self.observer.on_scan(&vin);
                StepOutcome::Accepted(vin)
            }
            None => StepOutcome::Retry,
        }
    }

    /// Drive [`step`](Self::step) from `clock` until a VIN is accepted or
    /// the session stops.
    pub async fn run<K: FrameClock>(&mut self, clock: &mut K) -> Option<Vin> {
        loop {
            match self.step().await {
                StepOutcome::Accepted(vin) => return Some(vin),
                StepOutcome::Stopped => return None,
                StepOutcome::Retry => clock.next_frame().await,
            }
        }
    }

    fn fail(&mut self, notice: String) {
        if let Some(session) = self.session.as_mut() {
            session.log(notice.as_str());
            session.set_status(ScanStatus::Failed);
        }
        self.teardown();
        self.observer.on_fatal(&notice);
    }

    fn teardown(&mut self) {
        self.live.close();
        match self.active.take() {
            Some(ActiveLoop::Text(mut ocr)) => ocr.dispose(),
            Some(ActiveLoop::Barcode(_)) => self.collaborators.barcode.reset(),
            None => {}
        }
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            log::debug!("camera released");
        }
        if let Some(session) = self.session.as_mut() {
            session.set_flash_on(false);
        }
    }
}

impl<C, O, B, R> Drop for CaptureController<C, O, B, R>
where
    C: CameraSource,
    O: OcrEngine,
    B: BarcodeDecoder,
    R: VehicleRegistry,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
