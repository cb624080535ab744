//! The crop engine: one editing session over one source image.
//!
//! # Session lifecycle
//!
//! ```text
//! load ──► editing ──► apply (Ok)  ──► closed
//!              │  └──► apply (Err) ──► editing (retry)
//!              └─────► cancel      ──► closed
//! ```
//!
//! Each `load` opens a fresh session. Within a session at most one of
//! "crop delivered" and "cancelled" happens, and only once.
//!
//! Geometry is plain data owned here. The overlay and preview rasters are
//! re-rendered from it after every change and never read back.

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::decode::SourceImage;
use crate::error::CropError;
use crate::export::{encode_raster, export_crop_with, CroppedResult, EncodeFn, ExportOptions};
use crate::geometry::{Point, Size};
use crate::interaction::{EditContext, Interaction};
use crate::raster::Raster;
use crate::region::{CropRegion, CropShape};
use crate::render::{compute_preview, render_frame, render_overlay, OverlayStyle};
use crate::view::{ViewTransform, ZoomDirection};

/// Ratios closer than this count as 1:1.
const SQUARE_EPSILON: f64 = 1e-9;

/// Everything tied to one loaded image.
#[derive(Debug, Clone)]
struct Session {
    image: SourceImage,
    view: ViewTransform,
    region: CropRegion,
    interaction: Interaction,
    preview: Raster,
    overlay: Raster,
}

/// Interactive crop editor state.
///
/// # Example
///
/// ```
/// use cropkit_core::{CropConfig, CropEngine, Point, SourceImage};
///
/// let mut engine = CropEngine::new(CropConfig::default()).unwrap();
/// engine.load(SourceImage::new(400, 400, vec![255; 400 * 400 * 4]).unwrap()).unwrap();
///
/// engine.begin_interaction(Point::new(300.0, 300.0));
/// engine.update_interaction(Point::new(350.0, 350.0));
/// engine.end_interaction();
///
/// let result = engine.apply(0.0).unwrap();
/// assert_eq!((result.width, result.height), (250, 250));
/// ```
#[derive(Debug, Clone)]
pub struct CropEngine {
    config: CropConfig,
    shape: CropShape,
    lock: Option<f64>,
    session: Option<Session>,
}

impl CropEngine {
    /// Create an engine with no image loaded.
    pub fn new(config: CropConfig) -> Result<Self, CropError> {
        config.validate()?;
        Ok(Self {
            shape: config.shape,
            lock: config.aspect_ratio.ratio(),
            config,
            session: None,
        })
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Whether a session is open.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn shape(&self) -> CropShape {
        self.shape
    }

    /// Active width/height lock, `None` when free-form.
    pub fn aspect_lock(&self) -> Option<f64> {
        self.lock
    }

    pub fn region(&self) -> Option<&CropRegion> {
        self.session.as_ref().map(|s| &s.region)
    }

    pub fn interaction(&self) -> Interaction {
        self.session
            .as_ref()
            .map(|s| s.interaction)
            .unwrap_or_default()
    }

    pub fn view(&self) -> Option<&ViewTransform> {
        self.session.as_ref().map(|s| &s.view)
    }

    /// Current zoom; 1.0 without an image.
    pub fn zoom(&self) -> f64 {
        self.session.as_ref().map_or(1.0, |s| s.view.zoom())
    }

    pub fn image(&self) -> Option<&SourceImage> {
        self.session.as_ref().map(|s| &s.image)
    }

    /// Preview rendered after the latest geometry change.
    pub fn preview(&self) -> Option<&Raster> {
        self.session.as_ref().map(|s| &s.preview)
    }

    /// Overlay rendered after the latest geometry change.
    pub fn overlay(&self) -> Option<&Raster> {
        self.session.as_ref().map(|s| &s.overlay)
    }

    /// Load a decoded image and open a new session.
    ///
    /// Zoom resets to 1.0 and the region to the default for the configured
    /// aspect ratio. On error the previous state is left untouched.
    pub fn load(&mut self, image: SourceImage) -> Result<(), CropError> {
        if let Err(e) = image.validate() {
            log::warn!("Rejected image: {}", e);
            return Err(e.into());
        }

        let source = Size::from_pixels(image.width, image.height);
        let viewport = self.config.viewport.unwrap_or(source);
        let view = ViewTransform::new(viewport, source, self.config.min_zoom, self.config.max_zoom);

        self.shape = self.config.shape;
        self.lock = self.config.aspect_ratio.ratio();
        let region = default_region(self.config.aspect_ratio, source, viewport, self.shape);

        log::debug!(
            "Loaded {}x{} image into {}x{} viewport, default region {:?}",
            image.width,
            image.height,
            viewport.width,
            viewport.height,
            region.as_rect()
        );

        self.session = Some(Session {
            image,
            view,
            region,
            interaction: Interaction::Idle,
            preview: Raster::empty(),
            overlay: Raster::empty(),
        });
        self.refresh();
        Ok(())
    }

    fn edit_context(&self, viewport: Size) -> EditContext {
        EditContext {
            viewport,
            lock: self.lock,
            handle_size: self.config.handle_size,
        }
    }

    /// Pointer-down in viewport coordinates.
    pub fn begin_interaction(&mut self, pos: Point) {
        if !is_finite(pos) {
            log::warn!("Ignoring non-finite pointer position {:?}", pos);
            return;
        }
        let Some(viewport) = self.session.as_ref().map(|s| s.view.viewport()) else {
            return;
        };
        let ctx = self.edit_context(viewport);
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let before = session.region;
        session.interaction = Interaction::begin(&mut session.region, pos, &ctx);
        log::trace!("Pointer down at {:?}: {:?}", pos, session.interaction);

        if session.region != before {
            self.refresh();
        }
    }

    /// Pointer-move in viewport coordinates. Returns true when the region
    /// changed.
    pub fn update_interaction(&mut self, pos: Point) -> bool {
        if !is_finite(pos) {
            log::warn!("Ignoring non-finite pointer position {:?}", pos);
            return false;
        }
        let Some(viewport) = self.session.as_ref().map(|s| s.view.viewport()) else {
            return false;
        };
        let ctx = self.edit_context(viewport);
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let changed = session.interaction.update(&mut session.region, pos, &ctx);
        if changed {
            self.refresh();
        }
        changed
    }

    /// Pointer-up.
    pub fn end_interaction(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if !session.interaction.is_idle() {
                log::trace!("Interaction ended, region {:?}", session.region.as_rect());
            }
            session.interaction = Interaction::Idle;
        }
    }

    /// Step the zoom. The region keeps its viewport coordinates; only the
    /// image mapping changes. Returns the new zoom.
    pub fn set_zoom(&mut self, direction: ZoomDirection) -> Result<f64, CropError> {
        let step = self.config.zoom_step;
        let session = self.session.as_mut().ok_or(CropError::NoImage)?;
        let zoom = session.view.step(direction, step);
        log::trace!("Zoom {:?} -> {}", direction, zoom);
        self.refresh();
        Ok(zoom)
    }

    /// Switch between rectangle and circle.
    ///
    /// Only allowed with a 1:1 lock or no lock.
    pub fn toggle_shape(&mut self) -> Result<CropShape, CropError> {
        if !square_or_free(self.lock) {
            log::warn!("Shape toggle rejected under {:?} aspect lock", self.lock);
            return Err(CropError::UnsupportedShape);
        }

        self.shape = self.shape.toggled();
        if let Some(session) = self.session.as_mut() {
            session.region.shape = self.shape;
        }
        self.refresh();
        Ok(self.shape)
    }

    /// Switch between the aspect lock and free-form resizing.
    ///
    /// Re-locking uses the configured preset's ratio, or the current
    /// region's ratio when the preset is free-form. The region is not
    /// resized. A circle re-locked to a non-square ratio turns back into a
    /// rectangle. Returns the new lock.
    pub fn toggle_aspect_lock(&mut self) -> Option<f64> {
        self.lock = match self.lock {
            Some(_) => None,
            None => self
                .config
                .aspect_ratio
                .ratio()
                .or_else(|| self.session.as_ref().and_then(|s| s.region.ratio())),
        };
        log::trace!("Aspect lock -> {:?}", self.lock);

        if self.shape == CropShape::Circle && !square_or_free(self.lock) {
            log::debug!("Circle reset to rectangle under {:?} aspect lock", self.lock);
            self.shape = CropShape::Rect;
            if let Some(session) = self.session.as_mut() {
                session.region.shape = CropShape::Rect;
            }
        }
        self.refresh();
        self.lock
    }

    /// Preview of the current region. Pure: repeated calls without an
    /// intervening change return identical rasters.
    pub fn compute_preview(&self) -> Raster {
        match &self.session {
            Some(s) => compute_preview(&s.image, &s.region, &s.view),
            None => Raster::empty(),
        }
    }

    /// The source image as currently displayed in the viewport.
    pub fn render_frame(&self) -> Option<Raster> {
        self.session
            .as_ref()
            .map(|s| render_frame(&s.image, &s.view))
    }

    /// Export the crop, rotated clockwise by `rotation_degrees` about the
    /// output centre.
    ///
    /// Success closes the session. On error the session stays open so the
    /// caller can adjust and retry.
    pub fn apply(&mut self, rotation_degrees: f64) -> Result<CroppedResult, CropError> {
        self.apply_with(rotation_degrees, encode_raster)
    }

    pub(crate) fn apply_with(
        &mut self,
        rotation_degrees: f64,
        encode: EncodeFn,
    ) -> Result<CroppedResult, CropError> {
        let session = self.session.as_ref().ok_or(CropError::NoImage)?;
        if session.region.is_empty() {
            log::warn!("Apply rejected: empty region {:?}", session.region.as_rect());
            return Err(CropError::EmptyRegion);
        }

        let rotation_degrees = if rotation_degrees.is_finite() {
            rotation_degrees
        } else {
            log::warn!("Ignoring non-finite rotation {}", rotation_degrees);
            0.0
        };
        let options = ExportOptions {
            output_scale: self.config.output_scale,
            rotation_degrees,
            format: self.config.output_format,
            jpeg_quality: self.config.jpeg_quality,
        };

        let result = export_crop_with(
            &session.image,
            &session.region,
            &session.view,
            &options,
            encode,
        )
        .inspect_err(|e| log::warn!("Apply failed: {}", e))?;

        log::debug!(
            "Crop applied: {}x{} {}, {} bytes",
            result.width,
            result.height,
            result.format,
            result.bytes.len()
        );
        self.session = None;
        Ok(result)
    }

    /// Discard the session without producing a result.
    ///
    /// Returns true the first time for an open session, false when there
    /// is nothing to cancel.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(_) => {
                log::debug!("Crop session cancelled");
                true
            }
            None => false,
        }
    }

    /// Re-render overlay and preview from the current geometry.
    fn refresh(&mut self) {
        let style = OverlayStyle {
            show_guides: self.config.show_guides,
            handle_size: self.config.handle_size,
            ..OverlayStyle::default()
        };
        let locked = self.lock.is_some();
        if let Some(s) = self.session.as_mut() {
            s.overlay = render_overlay(&s.region, s.view.viewport(), &style, locked);
            s.preview = compute_preview(&s.image, &s.region, &s.view);
        }
    }
}

/// Region shown right after loading: the preset's default size, shrunk to
/// the viewport if needed, centred.
/// Whether a circle may be drawn under `lock`.
fn square_or_free(lock: Option<f64>) -> bool {
    lock.map_or(true, |ratio| (ratio - 1.0).abs() < SQUARE_EPSILON)
}

fn default_region(aspect: AspectRatio, source: Size, viewport: Size, shape: CropShape) -> CropRegion {
    let size = aspect.default_size(source).fit_within(viewport);
    CropRegion::centered(viewport.center(), size, shape)
}

fn is_finite(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
