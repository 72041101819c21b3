// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::settings::{SelectionMode, ShadingSettings};
use crate::math::constants::Float;

#[derive(Debug)]
pub enum SettingsLoadError {
    Io(std::io::Error),
    Parse(String),
    UnknownValue { name: String, value: String },
}

impl From<std::io::Error> for SettingsLoadError {
    fn from(err: std::io::Error) -> Self {
        SettingsLoadError::Io(err)
    }
}

impl fmt::Display for SettingsLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsLoadError::Io(err) => write!(f, "io error: {}", err),
            SettingsLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SettingsLoadError::UnknownValue { name, value } => {
                write!(f, "unsupported value '{}' for '{}'", value, name)
            }
        }
    }
}

impl std::error::Error for SettingsLoadError {}

/// Reads a `<shading>` settings file. Unset keys keep their defaults.
///
/// ```xml
/// <shading>
///     <default name="bias" value="0.001"/>
///     <float name="ray_bias" value="$bias"/>
///     <string name="selection" value="weighted"/>
///     <integer name="max_depth" value="8"/>
///     <integer name="seed" value="1"/>
/// </shading>
/// ```
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<ShadingSettings, SettingsLoadError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let settings = parse_settings(&xml)?;
    log::info!("Loaded shading settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

pub fn parse_settings(xml: &str) -> Result<ShadingSettings, SettingsLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut settings = ShadingSettings::default();
    let mut in_shading = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let tag = e.name().as_ref().to_vec();
                let mut name: Option<String> = None;
                let mut value: Option<String> = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"name" => name = Some(attr.unescape_value().unwrap_or_default().to_string()),
                        b"value" => value = Some(attr.unescape_value().unwrap_or_default().to_string()),
                        _ => {}
                    }
                }

                match tag.as_slice() {
                    b"shading" => in_shading = true,
                    b"default" => {
                        if let (Some(k), Some(v)) = (name, value) {
                            defaults.insert(k, v);
                        }
                    }
                    b"float" | b"integer" | b"string" if in_shading => {
                        let (key, raw) = match (name, value) {
                            (Some(k), Some(v)) => (k, v),
                            _ => return Err(SettingsLoadError::Parse("property needs name and value".to_string())),
                        };
                        let resolved = resolve_value(&raw, &defaults);
                        apply_property(&mut settings, &key, &resolved)?;
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"shading" {
                    in_shading = false;
                }
            }
            Err(e) => {
                return Err(SettingsLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(settings)
}

fn apply_property(settings: &mut ShadingSettings, key: &str, value: &str) -> Result<(), SettingsLoadError> {
    match key {
        "ray_bias" => {
            let bias = parse_float(value)?;
            if !(bias >= 0.0) {
                return Err(SettingsLoadError::Parse(format!("ray_bias must be non-negative: {}", value)));
            }
            settings.ray_bias = bias;
        }
        "selection" => {
            settings.selection = SelectionMode::from_name(value).ok_or_else(|| SettingsLoadError::UnknownValue {
                name: key.to_string(),
                value: value.to_string(),
            })?;
        }
        "max_depth" => settings.max_depth = parse_u32(value)?,
        "seed" => settings.seed = parse_u64(value)?,
        other => log::warn!("Ignoring unknown shading property '{}'.", other),
    }
    Ok(())
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = raw.to_string();
    for (k, v) in defaults {
        out = out.replace(&format!("${}", k), v);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, SettingsLoadError> {
    value.trim().parse::<Float>().map_err(|_| SettingsLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SettingsLoadError> {
    value.trim().parse::<u32>().map_err(|_| SettingsLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_u64(value: &str) -> Result<u64, SettingsLoadError> {
    value.trim().parse::<u64>().map_err(|_| SettingsLoadError::Parse(format!("invalid integer: {}", value)))
}
