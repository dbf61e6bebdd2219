use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use proof_render::{
    ColorSystem, DescriptionError, InkLayer, LightSource, PaperSurface, RenderStats,
    RenderTarget, Renderer, RowSink, Scene,
};

use crate::error::{Component, ProofError};
use crate::models::ProofConfig;
use crate::rendering::PngRowWriter;

/// Result of rendering one proof to disk
#[derive(Debug, Clone)]
pub struct ProofResult {
    pub output: PathBuf,
    pub stats: RenderStats,
    pub elapsed: Duration,
}

/// The loaded paper, ink and light, ready to render
///
/// Loading is all-or-nothing: if any description fails, the ones already
/// read are dropped and the error names the one that failed.
pub struct ProofPipeline {
    color: ColorSystem,
    paper: PaperSurface,
    ink: Option<InkLayer>,
    light: LightSource,
}

impl ProofPipeline {
    /// Read the descriptions named by `config`, paper first, then ink (when
    /// enabled), then light.
    pub fn load(config: &ProofConfig) -> Result<Self, ProofError> {
        let color = config.color_system()?;

        let paper = load_description(Component::Paper, &config.paper_path(), |r| {
            PaperSurface::from_reader(r, &color)
        })?;
        let ink = if config.use_ink {
            Some(load_description(Component::Ink, &config.ink_path(), |r| {
                InkLayer::from_reader(r, &color)
            })?)
        } else {
            None
        };
        let light = load_description(Component::Light, &config.light_path(), |r| {
            LightSource::from_reader(r, &color)
        })?;

        Ok(Self {
            color,
            paper,
            ink,
            light,
        })
    }

    pub fn color(&self) -> &ColorSystem {
        &self.color
    }

    pub fn paper(&self) -> &PaperSurface {
        &self.paper
    }

    pub fn ink(&self) -> Option<&InkLayer> {
        self.ink.as_ref()
    }

    pub fn light(&self) -> &LightSource {
        &self.light
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            color: &self.color,
            paper: &self.paper,
            ink: self.ink.as_ref(),
            light: &self.light,
        }
    }

    /// Render `target` into any row sink.
    pub fn render_to<S: RowSink + ?Sized>(
        &self,
        target: RenderTarget,
        sink: &mut S,
    ) -> Result<RenderStats, ProofError> {
        Ok(Renderer::new(self.scene(), target).render(sink)?)
    }

    /// Render into a PNG file at `path`.
    ///
    /// The image is written to a temporary file beside `path` and moved
    /// into place only once the PNG is complete, so a failed render never
    /// leaves a partial image behind.
    pub fn write_png(&self, config: &ProofConfig, path: &Path) -> Result<RenderStats, ProofError> {
        self.write_png_through(config, path, |file| file)
    }

    fn write_png_through<W, F>(
        &self,
        config: &ProofConfig,
        path: &Path,
        wrap: F,
    ) -> Result<RenderStats, ProofError>
    where
        W: Write + 'static,
        F: FnOnce(File) -> W,
    {
        let target = config.target();
        target.validate()?;

        let (width, height) = match (u32::try_from(target.width), u32::try_from(target.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(ProofError::RasterTooLarge {
                    width: target.width,
                    height: target.height,
                })
            }
        };

        let output_error = |source| ProofError::Output {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut builder = tempfile::Builder::new();
        builder.prefix(".softproof-").suffix(".png");
        // Same mode as File::create, still subject to the umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }
        let partial = builder.tempfile_in(dir).map_err(output_error)?;
        let file = partial.as_file().try_clone().map_err(output_error)?;

        let mut png = PngRowWriter::new(
            wrap(file),
            width,
            height,
            target.dot_size,
            config.compression,
        )?;
        let stats = self.render_to(target, &mut png)?;
        png.finish()?;

        partial.persist(path).map_err(|err| output_error(err.error))?;
        tracing::debug!(path = %path.display(), "PNG written");
        Ok(stats)
    }
}

fn load_description<T>(
    component: Component,
    path: &Path,
    parse: impl FnOnce(BufReader<File>) -> Result<T, DescriptionError>,
) -> Result<T, ProofError> {
    let file = File::open(path).map_err(|source| ProofError::Open {
        component,
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(%component, path = %path.display(), "Reading description");
    parse(BufReader::new(file)).map_err(|source| ProofError::Description {
        component,
        path: path.to_path_buf(),
        source,
    })
}

/// Load the descriptions named by `config` and render them to its output.
pub fn render_proof(config: &ProofConfig) -> Result<ProofResult, ProofError> {
    let start = Instant::now();
    let pipeline = ProofPipeline::load(config)?;
    let output = config.output_path();

    let target = config.target();
    tracing::info!(
        width = target.width,
        height = target.height,
        model = ?target.model,
        ink = target.use_ink,
        output = %output.display(),
        "Rendering proof"
    );

    let stats = pipeline.write_png(config, &output)?;
    let elapsed = start.elapsed();
    tracing::info!(
        pixels = stats.width * stats.height,
        shadowed = stats.shadowed_pixels,
        elapsed_ms = elapsed.as_millis() as u64,
        "Proof rendered"
    );

    Ok(ProofResult {
        output,
        stats,
        elapsed,
    })
}
