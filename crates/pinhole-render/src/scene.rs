//! Scene container and the parallel pixel loop.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use pinhole_math::Ray;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::{RenderError, Result};
use crate::frame::{ColumnSpan, FrameBuffer};
use crate::light::{Illumination, LightHandle};
use crate::primitive::{Intersection, PrimitiveHandle};

/// Summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Number of column chunks rendered in parallel.
    pub chunks: usize,
    /// Pixels whose primary ray hit a primitive.
    pub hits: usize,
    /// Wall-clock time spent rendering.
    pub elapsed: Duration,
}

/// A camera, the primitives it sees and the lights that illuminate them.
///
/// Primitives and lights are immutable once added; the scene is shared
/// read-only by every render worker.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    camera: Camera,
    primitives: Vec<PrimitiveHandle>,
    lights: Vec<LightHandle>,
}

impl Scene {
    /// An empty scene viewed through `camera`.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            primitives: Vec::new(),
            lights: Vec::new(),
        }
    }

    /// Add a primitive.
    pub fn add_primitive(&mut self, primitive: PrimitiveHandle) -> &mut Self {
        self.primitives.push(primitive);
        self
    }

    /// Add a light.
    pub fn add_light(&mut self, light: LightHandle) -> &mut Self {
        self.lights.push(light);
        self
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Mutable access to the camera. Call [`Camera::update_geometry`] after
    /// changing it.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Primitives in insertion order.
    pub fn primitives(&self) -> &[PrimitiveHandle] {
        &self.primitives
    }

    /// Lights in insertion order.
    pub fn lights(&self) -> &[LightHandle] {
        &self.lights
    }

    /// The closest hit along `ray`, by distance from the ray origin.
    ///
    /// Every primitive is tested; on equal distance the earlier one wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(&PrimitiveHandle, Intersection)> {
        let mut nearest: Option<(&PrimitiveHandle, Intersection, f64)> = None;
        for primitive in &self.primitives {
            let Some(hit) = primitive.test_intersection(ray) else {
                continue;
            };
            let dist = (hit.point - ray.origin).norm();
            if nearest.as_ref().map_or(true, |(_, _, best)| dist < *best) {
                nearest = Some((primitive, hit, dist));
            }
        }
        nearest.map(|(primitive, hit, _)| (primitive, hit))
    }

    /// Color of a hit on `owner`.
    ///
    /// Lights do not accumulate: the last light evaluated decides the result.
    pub fn shade(&self, owner: &PrimitiveHandle, hit: &Intersection) -> [f64; 3] {
        let mut illumination: Option<Illumination> = None;
        for light in &self.lights {
            illumination = Some(light.compute_illumination(
                &hit.point,
                &hit.normal,
                &self.primitives,
                Some(owner),
            ));
        }

        match illumination {
            Some(ill) if ill.lit => {
                let c = hit.color * ill.intensity;
                [c.x, c.y, c.z]
            }
            _ => [0.0; 3],
        }
    }

    /// Color seen through normalized screen coordinates `(nx, ny)`.
    pub fn trace(&self, nx: f64, ny: f64) -> [f64; 3] {
        self.sample(nx, ny).unwrap_or([0.0; 3])
    }

    /// Like [`trace`](Self::trace) but `None` when the primary ray misses.
    fn sample(&self, nx: f64, ny: f64) -> Option<[f64; 3]> {
        let ray = self.camera.generate_ray(nx, ny);
        self.nearest_hit(&ray).map(|(owner, hit)| self.shade(owner, &hit))
    }

    /// Render into `frame`, one column chunk per available hardware thread.
    pub fn render(&self, frame: &mut FrameBuffer) -> Result<RenderStats> {
        let threads = thread::available_parallelism().map_or(1, |n| n.get());
        self.render_with_threads(frame, threads)
    }

    /// Render into `frame` split into `chunks` contiguous column ranges.
    ///
    /// Chunks never exceed the frame width. Each chunk writes only its own
    /// columns, so the result is identical for every chunk count.
    pub fn render_with_threads(
        &self,
        frame: &mut FrameBuffer,
        chunks: usize,
    ) -> Result<RenderStats> {
        if chunks == 0 {
            return Err(RenderError::NoChunks);
        }
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyFrame { width, height });
        }
        let chunks = chunks.min(width);

        info!(
            "Rendering {}x{} with {} primitives, {} lights in {} chunks",
            width,
            height,
            self.primitives.len(),
            self.lights.len(),
            chunks
        );
        let start = Instant::now();

        let x_fact = 2.0 / width as f64;
        let y_fact = 2.0 / height as f64;
        let hits = frame
            .column_spans(chunks)
            .into_par_iter()
            .map(|mut span| self.render_span(&mut span, height, x_fact, y_fact))
            .sum::<usize>();

        let stats = RenderStats {
            chunks,
            hits,
            elapsed: start.elapsed(),
        };
        info!(
            "Render finished in {:.3}s ({} of {} pixels hit)",
            stats.elapsed.as_secs_f64(),
            stats.hits,
            width * height
        );
        Ok(stats)
    }

    fn render_span(
        &self,
        span: &mut ColumnSpan<'_>,
        height: usize,
        x_fact: f64,
        y_fact: f64,
    ) -> usize {
        let mut hits = 0;
        for x in span.columns() {
            let nx = x as f64 * x_fact - 1.0;
            for y in 0..height {
                let ny = y as f64 * y_fact - 1.0;
                let rgb = match self.sample(nx, ny) {
                    Some(rgb) => {
                        hits += 1;
                        rgb
                    }
                    None => [0.0; 3],
                };
                span.set_pixel(x, y, rgb);
            }
        }
        debug!("Chunk x={}..{} complete", span.columns().start, span.columns().end);
        hits
    }
}
