use std::{
    error::Error,
    fmt::Display,
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use json::JsonValue;

use crate::{error::Result, lut::remap::RemapStrategy};

pub const DEFAULT_ANIMATIONS_DIR: &str = "img/animations";
pub const DEFAULT_LUTS_DIR: &str = "img/lut";
pub const DEFAULT_OUTPUT_DIR: &str = "img/converted";
pub const DEFAULT_CLOTHES_DIR: &str = "img/clothes";
pub const DEFAULT_TEMPLATE_PATH: &str = "img/map_template.png";
pub const DEFAULT_LUT_SIZE: u32 = 256;

/// Directory layout and tuning for conversion runs
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Root holding one subdirectory per animation
    pub animations_dir: PathBuf,
    /// One LUT per animation part, named `<part>.png`
    pub luts_dir: PathBuf,
    /// Converted frames mirror the animations tree here
    pub output_dir: PathBuf,
    /// Textures painted over the template, input of LUT authoring
    pub clothes_dir: PathBuf,
    pub template_path: PathBuf,
    pub lut_width: u32,
    pub lut_height: u32,
    pub strategy: RemapStrategy,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            animations_dir: PathBuf::from(DEFAULT_ANIMATIONS_DIR),
            luts_dir: PathBuf::from(DEFAULT_LUTS_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            clothes_dir: PathBuf::from(DEFAULT_CLOTHES_DIR),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            lut_width: DEFAULT_LUT_SIZE,
            lut_height: DEFAULT_LUT_SIZE,
            strategy: RemapStrategy::Auto,
        }
    }
}

impl ConverterConfig {
    fn to_config(json_string: &str) -> std::result::Result<ConverterConfig, ConfigError> {
        let json = json::parse(json_string).map_err(|e| ConfigError::new(e.to_string()))?;
        if !json.is_object() {
            return Err(ConfigError::new("config root should be an object"));
        }
        let mut config = ConverterConfig::default();

        let path = |key: &str| -> std::result::Result<Option<PathBuf>, ConfigError> {
            match &json[key] {
                JsonValue::Null => Ok(None),
                value => match value.as_str() {
                    Some(s) => Ok(Some(PathBuf::from(s))),
                    None => Err(ConfigError::new(format!("Couldn't parse {}", key))),
                },
            }
        };
        let size = |key: &str| -> std::result::Result<Option<u32>, ConfigError> {
            match &json[key] {
                JsonValue::Null => Ok(None),
                value => match value.as_u32() {
                    Some(val) if (1..=256).contains(&val) => Ok(Some(val)),
                    _ => Err(ConfigError::new(format!(
                        "{} should be an integer between 1 and 256",
                        key
                    ))),
                },
            }
        };

        if let Some(val) = path("animations_dir")? {
            config.animations_dir = val;
        }
        if let Some(val) = path("luts_dir")? {
            config.luts_dir = val;
        }
        if let Some(val) = path("output_dir")? {
            config.output_dir = val;
        }
        if let Some(val) = path("clothes_dir")? {
            config.clothes_dir = val;
        }
        if let Some(val) = path("template_path")? {
            config.template_path = val;
        }
        if let Some(val) = size("lut_width")? {
            config.lut_width = val;
        }
        if let Some(val) = size("lut_height")? {
            config.lut_height = val;
        }

        config.strategy = match &json["strategy"] {
            JsonValue::Null => RemapStrategy::Auto,
            value => match value.as_str() {
                Some("auto") => RemapStrategy::Auto,
                Some("seq") => RemapStrategy::Seq,
                Some("par") => RemapStrategy::Par,
                Some(_) => return Err(ConfigError::new("Not recognized strategy")),
                None => return Err(ConfigError::new("Couldn't parse strategy")),
            },
        };

        Ok(config)
    }

    fn to_json(config: &ConverterConfig) -> String {
        let mut data = json::JsonValue::new_object();

        data["animations_dir"] = path_to_json(&config.animations_dir);
        data["luts_dir"] = path_to_json(&config.luts_dir);
        data["output_dir"] = path_to_json(&config.output_dir);
        data["clothes_dir"] = path_to_json(&config.clothes_dir);
        data["template_path"] = path_to_json(&config.template_path);
        data["lut_width"] = config.lut_width.into();
        data["lut_height"] = config.lut_height.into();
        data["strategy"] = config.strategy.into();

        data.pretty(4)
    }

    pub fn parse(json_string: &str) -> Result<ConverterConfig> {
        Ok(ConverterConfig::to_config(json_string)?)
    }

    pub fn read_config<P: AsRef<Path>>(path: P) -> Result<ConverterConfig> {
        let mut file = File::open(path)?;
        let mut buff = String::new();
        file.read_to_string(&mut buff)?;

        ConverterConfig::parse(&buff)
    }

    pub fn write_config<P: AsRef<Path>>(&self, path: P) -> Result {
        let string = ConverterConfig::to_json(self);
        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;
        Ok(())
    }
}

fn path_to_json(path: &Path) -> JsonValue {
    JsonValue::String(path.to_string_lossy().into_owned())
}

impl From<RemapStrategy> for JsonValue {
    fn from(strategy: RemapStrategy) -> Self {
        JsonValue::String(String::from(strategy.name()))
    }
}

#[derive(Debug)]
pub struct ConfigError {
    msg: String,
}

impl ConfigError {
    fn new(msg: impl Into<String>) -> Self {
        ConfigError { msg: msg.into() }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ConfigParseError {}", self.msg))
    }
}
impl Error for ConfigError {}
