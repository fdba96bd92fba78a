use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use itertools::Itertools;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    animation::AnimationPart,
    config::ConverterConfig,
    error::{Result, UvMapperError},
    lut::{index::ColorIndex, template::build_lut},
    texture::{Texture, TextureRef},
    utils::image::{decode, encode, is_png_file},
};

/// Sentinel selecting every animation directory
pub const ALL_ANIMATIONS: &str = "all";

/// Which animations a conversion run covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSelector {
    All,
    Animation(String),
}

impl FromStr for InputSelector {
    type Err = UvMapperError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(UvMapperError::invalid_input("empty animation name")),
            ALL_ANIMATIONS => Ok(InputSelector::All),
            name => Ok(InputSelector::Animation(name.to_string())),
        }
    }
}

/// Counts of what a run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub animations: usize,
    pub frames: usize,
    pub luts: usize,
}

impl BatchReport {
    fn merge(&mut self, other: BatchReport) {
        self.animations += other.animations;
        self.frames += other.frames;
        self.luts += other.luts;
    }
}

impl Display for BatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} animation(s), {} frame(s), {} LUT(s)",
            self.animations, self.frames, self.luts
        )
    }
}

/// A frame scheduled for conversion
#[derive(Debug, Clone)]
struct FrameJob {
    part: AnimationPart,
    input: PathBuf,
    output: PathBuf,
}

/// Converts animation directories into RG frames.
///
/// Color indices are built once per part and reused for every directory the
/// converter processes afterwards.
#[derive(Debug)]
pub struct Converter {
    config: ConverterConfig,
    indices: HashMap<AnimationPart, Arc<ColorIndex>>,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Converter {
            config,
            indices: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn convert(&mut self, selector: &InputSelector) -> Result<BatchReport> {
        match selector {
            InputSelector::All => self.convert_all(),
            InputSelector::Animation(name) => {
                let dir = self.config.animations_dir.join(name);
                if !dir.is_dir() {
                    return Err(UvMapperError::invalid_input(format!(
                        "{} not found, expected the name of a directory in {} holding animations created on the map templates",
                        dir.display(),
                        self.config.animations_dir.display()
                    )));
                }
                self.convert_animations(&dir)
            }
        }
    }

    /// Convert every subdirectory of the animations root, in name order
    pub fn convert_all(&mut self) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        for dir in sorted_entries(&self.config.animations_dir)?
            .into_iter()
            .filter(|path| path.is_dir())
        {
            report.merge(self.convert_animations(&dir)?);
        }
        info!(%report, "converted all animations");
        Ok(report)
    }

    /// Convert one animation directory.
    ///
    /// Every entry must be a frame of a known part, at most one per part.
    /// Frames are remapped in parallel and nothing is written unless all of
    /// them succeed.
    pub fn convert_animations(&mut self, animation_dir: &Path) -> Result<BatchReport> {
        let output_dir = self.output_dir_for(animation_dir)?;
        let mut seen = HashSet::new();
        let jobs = sorted_entries(animation_dir)?
            .into_iter()
            .map(|input| -> Result<FrameJob> {
                let part = AnimationPart::from_frame_path(&input)?;
                if !input.is_file() {
                    return Err(UvMapperError::invalid_input(format!(
                        "{} is not a file",
                        input.display()
                    )));
                }
                // `body.png` and `body.PNG` would both write `body.png`
                if !seen.insert(part) {
                    return Err(UvMapperError::invalid_input(format!(
                        "{} is a second frame for animation part {} in {}",
                        input.display(),
                        part,
                        animation_dir.display()
                    )));
                }
                let output = output_dir.join(part.file_name());
                Ok(FrameJob {
                    part,
                    input,
                    output,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut luts_built = 0;
        let mut indices = HashMap::new();
        for job in &jobs {
            if !indices.contains_key(&job.part) {
                let (index, built) = self.index_for(job.part)?;
                luts_built += usize::from(built);
                indices.insert(job.part, index);
            }
        }

        let strategy = self.config.strategy;
        let converted = jobs
            .par_iter()
            .map(|job| {
                let frame = decode(&job.input)?;
                strategy.remap(&indices[&job.part], &frame).inspect_err(|e| {
                    if let UvMapperError::ColorNotFound { .. } = e {
                        warn!(frame = %job.input.display(), error = %e, "frame does not match its LUT");
                    }
                })
            })
            .collect::<Vec<Result<Texture>>>()
            .into_iter()
            .collect::<Result<Vec<_>>>()?;

        fs::create_dir_all(&output_dir)?;
        jobs.par_iter()
            .zip(converted.par_iter())
            .try_for_each(|(job, texture)| {
                encode(texture, &job.output)?;
                info!(
                    frame = %job.input.display(),
                    output = %job.output.display(),
                    width = texture.width(),
                    height = texture.height(),
                    "converted frame"
                );
                Ok::<_, UvMapperError>(())
            })?;

        Ok(BatchReport {
            animations: 1,
            frames: jobs.len(),
            luts: luts_built,
        })
    }

    /// Output directory mirroring `animation_dir` under the output root
    pub fn output_dir_for(&self, animation_dir: &Path) -> Result<PathBuf> {
        let relative = animation_dir
            .strip_prefix(&self.config.animations_dir)
            .map_err(|_| {
                UvMapperError::invalid_input(format!(
                    "{} is not based in the animation directory {}",
                    animation_dir.display(),
                    self.config.animations_dir.display()
                ))
            })?;
        Ok(self.config.output_dir.join(relative))
    }

    /// Cached index for `part`, and whether it had to be built now
    fn index_for(&mut self, part: AnimationPart) -> Result<(Arc<ColorIndex>, bool)> {
        if let Some(index) = self.indices.get(&part) {
            return Ok((Arc::clone(index), false));
        }
        let lut_path = self.config.luts_dir.join(part.file_name());
        if !lut_path.is_file() {
            return Err(UvMapperError::invalid_input(format!(
                "missing LUT {} for animation part {}",
                lut_path.display(),
                part
            )));
        }
        let lut = decode(&lut_path)?;
        let index = Arc::new(ColorIndex::from_texture(&lut)?);
        debug!(%part, lut = %lut_path.display(), colors = index.len(), "indexed LUT");
        self.indices.insert(part, Arc::clone(&index));
        Ok((index, true))
    }
}

/// Author a LUT for every PNG texture in the clothes directory.
///
/// Each LUT is written to the LUT directory under the texture's file name.
pub fn build_luts(config: &ConverterConfig) -> Result<BatchReport> {
    let template = decode(&config.template_path)?;
    let textures: Vec<PathBuf> = sorted_entries(&config.clothes_dir)?
        .into_iter()
        .filter(|path| {
            let keep = path.is_file() && is_png_file(path);
            if !keep {
                debug!(path = %path.display(), "skipping non-texture entry");
            }
            keep
        })
        .collect();

    fs::create_dir_all(&config.luts_dir)?;
    textures.par_iter().try_for_each(|texture_path| {
        let texture = decode(texture_path)?;
        let lut = build_lut(&template, &texture, config.lut_width, config.lut_height)?;
        // entries come from read_dir, they always carry a file name
        let file_name = texture_path.file_name().unwrap_or_default();
        let lut_path = config.luts_dir.join(file_name);
        encode(&lut, &lut_path)?;
        info!(texture = %texture_path.display(), lut = %lut_path.display(), "3D color map created");
        Ok::<_, UvMapperError>(())
    })?;

    Ok(BatchReport {
        luts: textures.len(),
        ..BatchReport::default()
    })
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)?
        .map_ok(|entry| entry.path())
        .collect::<std::io::Result<Vec<_>>>()?;
    Ok(entries.into_iter().sorted().collect_vec())
}
