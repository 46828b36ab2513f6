//! Tunable scene parameters and their change notification.
//!
//! A [`ParameterStore`] is created once with fixed defaults and mutated in
//! place by the debug panel. Every accepted `set` is clamped into the entry's
//! documented range, stored, and then pushed synchronously to the listeners
//! subscribed to that key.

use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::error::SceneError;

/// 8-bit RGB color as edited in the debug panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels mapped from 0..=255 to 0.0..=1.0.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, SceneError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SceneError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| SceneError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    OffsetX,
    OffsetY,
    SizePerlinValue,
    Blur,
    Color1,
    Color2,
    ThresholdSpeed,
    ThresholdValue,
    ScrollSpeed,
    FbmOctaves,
    FbmGain,
    FbmLacunarity,
    Speed,
    AsciiColor,
    AsciiBgColor,
}

impl ParamKey {
    pub const ALL: [ParamKey; 15] = [
        ParamKey::OffsetX,
        ParamKey::OffsetY,
        ParamKey::SizePerlinValue,
        ParamKey::Blur,
        ParamKey::Color1,
        ParamKey::Color2,
        ParamKey::ThresholdSpeed,
        ParamKey::ThresholdValue,
        ParamKey::ScrollSpeed,
        ParamKey::FbmOctaves,
        ParamKey::FbmGain,
        ParamKey::FbmLacunarity,
        ParamKey::Speed,
        ParamKey::AsciiColor,
        ParamKey::AsciiBgColor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::OffsetX => "offsetX",
            ParamKey::OffsetY => "offsetY",
            ParamKey::SizePerlinValue => "sizePerlinValue",
            ParamKey::Blur => "blur",
            ParamKey::Color1 => "color1",
            ParamKey::Color2 => "color2",
            ParamKey::ThresholdSpeed => "thresholdSpeed",
            ParamKey::ThresholdValue => "thresholdValue",
            ParamKey::ScrollSpeed => "scrollSpeed",
            ParamKey::FbmOctaves => "fbmOctaves",
            ParamKey::FbmGain => "fbmGain",
            ParamKey::FbmLacunarity => "fbmLacunarity",
            ParamKey::Speed => "speed",
            ParamKey::AsciiColor => "asciiColor",
            ParamKey::AsciiBgColor => "asciiBgColor",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, SceneError> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| SceneError::UnknownParam(name.to_string()))
    }

    pub fn kind(self) -> ParamKind {
        match self {
            ParamKey::Color1 | ParamKey::Color2 | ParamKey::AsciiColor | ParamKey::AsciiBgColor => {
                ParamKind::Rgb
            }
            ParamKey::FbmOctaves => ParamKind::Int,
            _ => ParamKind::Scalar,
        }
    }

    pub fn spec(self) -> &'static ParamSpec {
        // PARAM_SPECS is declared in ParamKey::ALL order
        &PARAM_SPECS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Scalar,
    Int,
    Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Int(i32),
    Rgb(Rgb8),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Scalar(_) => ParamKind::Scalar,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Rgb(_) => ParamKind::Rgb,
        }
    }

    /// Numeric view; colors read as 0.
    pub fn scalar(&self) -> f32 {
        match *self {
            ParamValue::Scalar(v) => v,
            ParamValue::Int(v) => v as f32,
            ParamValue::Rgb(_) => 0.0,
        }
    }

    pub fn int(&self) -> i32 {
        match *self {
            ParamValue::Scalar(v) => v.round() as i32,
            ParamValue::Int(v) => v,
            ParamValue::Rgb(_) => 0,
        }
    }

    pub fn rgb(&self) -> Rgb8 {
        match *self {
            ParamValue::Rgb(c) => c,
            _ => Rgb8::default(),
        }
    }
}

/// Inclusive numeric range and UI step of a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParamRange {
    const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub key: ParamKey,
    pub folder: &'static str,
    pub label: &'static str,
    /// `None` for colors (0..=255 per channel by construction).
    pub range: Option<ParamRange>,
}

pub static PARAM_SPECS: [ParamSpec; 15] = [
    ParamSpec {
        key: ParamKey::OffsetX,
        folder: "Offset",
        label: "offsetX",
        range: Some(ParamRange::new(-2.0, 2.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::OffsetY,
        folder: "Offset",
        label: "offsetY",
        range: Some(ParamRange::new(-2.0, 2.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::SizePerlinValue,
        folder: "Perlin Noise",
        label: "Size",
        range: Some(ParamRange::new(0.1, 100.0, 0.1)),
    },
    ParamSpec {
        key: ParamKey::Blur,
        folder: "Perlin Noise",
        label: "blur",
        range: Some(ParamRange::new(0.0, 1.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::Color1,
        folder: "Colors",
        label: "Color 1",
        range: None,
    },
    ParamSpec {
        key: ParamKey::Color2,
        folder: "Colors",
        label: "Color 2",
        range: None,
    },
    ParamSpec {
        key: ParamKey::ThresholdSpeed,
        folder: "Threshold",
        label: "Speed",
        range: Some(ParamRange::new(0.0, 5.0, 0.1)),
    },
    ParamSpec {
        key: ParamKey::ThresholdValue,
        folder: "Threshold",
        label: "Value",
        range: Some(ParamRange::new(0.0, 1.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::ScrollSpeed,
        folder: "Scroll",
        label: "Speed",
        range: Some(ParamRange::new(0.0, 5.0, 0.1)),
    },
    ParamSpec {
        key: ParamKey::FbmOctaves,
        folder: "FBM",
        label: "Octaves",
        range: Some(ParamRange::new(1.0, 8.0, 1.0)),
    },
    ParamSpec {
        key: ParamKey::FbmGain,
        folder: "FBM",
        label: "Gain",
        range: Some(ParamRange::new(0.1, 1.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::FbmLacunarity,
        folder: "FBM",
        label: "Lacunarity",
        range: Some(ParamRange::new(1.0, 3.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::Speed,
        folder: "FBM",
        label: "Speed",
        range: Some(ParamRange::new(0.0, 5.0, 0.01)),
    },
    ParamSpec {
        key: ParamKey::AsciiColor,
        folder: "Post Processing",
        label: "Text Color",
        range: None,
    },
    ParamSpec {
        key: ParamKey::AsciiBgColor,
        folder: "Post Processing",
        label: "Background Color",
        range: None,
    },
];

/// Current values of every tunable.
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub offset_x: f32,
    pub offset_y: f32,
    pub size_perlin_value: f32,
    pub blur: f32,
    pub color1: Rgb8,
    pub color2: Rgb8,
    pub threshold_speed: f32,
    pub threshold_value: f32,
    pub scroll_speed: f32,
    pub fbm_octaves: i32,
    pub fbm_gain: f32,
    pub fbm_lacunarity: f32,
    pub speed: f32,
    pub ascii_color: Rgb8,
    pub ascii_bg_color: Rgb8,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            offset_x: -2.0,
            offset_y: -0.26,
            size_perlin_value: 12.0,
            blur: 0.38,
            color1: Rgb8::new(144, 163, 170),
            color2: Rgb8::new(28, 28, 65),
            threshold_speed: 3.0,
            threshold_value: 0.7,
            scroll_speed: 1.9,
            fbm_octaves: 5,
            fbm_gain: 0.7,
            fbm_lacunarity: 1.15,
            speed: 0.82,
            ascii_color: Rgb8::new(0, 17, 255),
            ascii_bg_color: Rgb8::new(255, 255, 255),
        }
    }
}

impl Params {
    pub fn get(&self, key: ParamKey) -> ParamValue {
        match key {
            ParamKey::OffsetX => ParamValue::Scalar(self.offset_x),
            ParamKey::OffsetY => ParamValue::Scalar(self.offset_y),
            ParamKey::SizePerlinValue => ParamValue::Scalar(self.size_perlin_value),
            ParamKey::Blur => ParamValue::Scalar(self.blur),
            ParamKey::Color1 => ParamValue::Rgb(self.color1),
            ParamKey::Color2 => ParamValue::Rgb(self.color2),
            ParamKey::ThresholdSpeed => ParamValue::Scalar(self.threshold_speed),
            ParamKey::ThresholdValue => ParamValue::Scalar(self.threshold_value),
            ParamKey::ScrollSpeed => ParamValue::Scalar(self.scroll_speed),
            ParamKey::FbmOctaves => ParamValue::Int(self.fbm_octaves),
            ParamKey::FbmGain => ParamValue::Scalar(self.fbm_gain),
            ParamKey::FbmLacunarity => ParamValue::Scalar(self.fbm_lacunarity),
            ParamKey::Speed => ParamValue::Scalar(self.speed),
            ParamKey::AsciiColor => ParamValue::Rgb(self.ascii_color),
            ParamKey::AsciiBgColor => ParamValue::Rgb(self.ascii_bg_color),
        }
    }

    // Caller guarantees `value` already matches the key's kind.
    fn store(&mut self, key: ParamKey, value: ParamValue) {
        match key {
            ParamKey::OffsetX => self.offset_x = value.scalar(),
            ParamKey::OffsetY => self.offset_y = value.scalar(),
            ParamKey::SizePerlinValue => self.size_perlin_value = value.scalar(),
            ParamKey::Blur => self.blur = value.scalar(),
            ParamKey::Color1 => self.color1 = value.rgb(),
            ParamKey::Color2 => self.color2 = value.rgb(),
            ParamKey::ThresholdSpeed => self.threshold_speed = value.scalar(),
            ParamKey::ThresholdValue => self.threshold_value = value.scalar(),
            ParamKey::ScrollSpeed => self.scroll_speed = value.scalar(),
            ParamKey::FbmOctaves => self.fbm_octaves = value.int(),
            ParamKey::FbmGain => self.fbm_gain = value.scalar(),
            ParamKey::FbmLacunarity => self.fbm_lacunarity = value.scalar(),
            ParamKey::Speed => self.speed = value.scalar(),
            ParamKey::AsciiColor => self.ascii_color = value.rgb(),
            ParamKey::AsciiBgColor => self.ascii_bg_color = value.rgb(),
        }
    }
}

pub type ParamListener = Box<dyn FnMut(ParamKey, ParamValue)>;

pub struct ParameterStore {
    values: Params,
    listeners: FnvHashMap<ParamKey, SmallVec<[ParamListener; 2]>>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl ParameterStore {
    pub fn new(values: Params) -> Self {
        Self {
            values,
            listeners: FnvHashMap::default(),
        }
    }

    pub fn values(&self) -> &Params {
        &self.values
    }

    pub fn get(&self, key: ParamKey) -> ParamValue {
        self.values.get(key)
    }

    pub fn subscribe(&mut self, key: ParamKey, listener: ParamListener) {
        self.listeners.entry(key).or_default().push(listener);
    }

    pub fn listener_count(&self, key: ParamKey) -> usize {
        self.listeners.get(&key).map_or(0, |l| l.len())
    }

    /// Store a new value and notify listeners of `key`.
    ///
    /// Numeric values are clamped into the key's range (`Int` entries are
    /// rounded, and a `Scalar` is accepted for them since range inputs report
    /// floats). Returns the value actually stored.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> Result<ParamValue, SceneError> {
        let value = normalize(key, value)?;
        self.values.store(key, value);
        if let Some(listeners) = self.listeners.get_mut(&key) {
            for listener in listeners.iter_mut() {
                listener(key, value);
            }
        }
        Ok(value)
    }

    pub fn set_by_name(&mut self, name: &str, value: ParamValue) -> Result<ParamValue, SceneError> {
        self.set(ParamKey::from_name(name)?, value)
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }
}

fn normalize(key: ParamKey, value: ParamValue) -> Result<ParamValue, SceneError> {
    let expected = key.kind();
    let range = key.spec().range;
    match (expected, value) {
        (ParamKind::Rgb, ParamValue::Rgb(c)) => Ok(ParamValue::Rgb(c)),
        (ParamKind::Scalar, ParamValue::Scalar(v)) => {
            let v = if v.is_finite() { v } else { 0.0 };
            Ok(ParamValue::Scalar(range.map_or(v, |r| r.clamp(v))))
        }
        (ParamKind::Int, ParamValue::Int(_) | ParamValue::Scalar(_)) => {
            let v = value.scalar();
            let v = if v.is_finite() { v.round() } else { 0.0 };
            Ok(ParamValue::Int(range.map_or(v, |r| r.clamp(v)) as i32))
        }
        (expected, found) => Err(SceneError::ParamKindMismatch {
            key,
            expected,
            found: found.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_follow_key_order() {
        for (i, key) in ParamKey::ALL.iter().enumerate() {
            assert_eq!(PARAM_SPECS[i].key, *key);
            assert_eq!(key.spec().key, *key);
        }
    }

    #[test]
    fn color_specs_have_no_numeric_range() {
        for spec in PARAM_SPECS.iter() {
            assert_eq!(spec.range.is_none(), spec.key.kind() == ParamKind::Rgb);
        }
    }

    #[test]
    fn defaults_sit_inside_their_ranges() {
        let params = Params::default();
        for spec in PARAM_SPECS.iter() {
            if let Some(r) = spec.range {
                let v = params.get(spec.key).scalar();
                assert!(v >= r.min && v <= r.max, "{} out of range", spec.key.name());
            }
        }
    }
}
