//! Parameter → uniform routing.
//!
//! One row per tunable. `subscribe_all` walks the table and registers exactly
//! one listener per row, so a change event updates exactly one uniform field.

use std::cell::RefCell;
use std::rc::Rc;

use crate::params::{ParamKey, ParamValue, ParameterStore};
use crate::uniforms::{AsciiUniforms, BackgroundUniforms};

#[derive(Clone, Copy)]
pub enum UniformWrite {
    Background(fn(&mut BackgroundUniforms, ParamValue)),
    Ascii(fn(&mut AsciiUniforms, ParamValue)),
}

#[derive(Clone, Copy)]
pub struct ParamBinding {
    pub key: ParamKey,
    pub write: UniformWrite,
}

const fn bg(key: ParamKey, write: fn(&mut BackgroundUniforms, ParamValue)) -> ParamBinding {
    ParamBinding {
        key,
        write: UniformWrite::Background(write),
    }
}

const fn ascii(key: ParamKey, write: fn(&mut AsciiUniforms, ParamValue)) -> ParamBinding {
    ParamBinding {
        key,
        write: UniformWrite::Ascii(write),
    }
}

pub static PARAM_BINDINGS: [ParamBinding; 15] = [
    bg(ParamKey::OffsetX, |u, v| u.offset[0] = v.scalar()),
    bg(ParamKey::OffsetY, |u, v| u.offset[1] = v.scalar()),
    bg(ParamKey::SizePerlinValue, |u, v| u.size_perlin = v.scalar()),
    bg(ParamKey::Blur, |u, v| u.blur = v.scalar()),
    bg(ParamKey::Color1, |u, v| u.color1 = v.rgb().to_unit()),
    bg(ParamKey::Color2, |u, v| u.color2 = v.rgb().to_unit()),
    bg(ParamKey::ThresholdSpeed, |u, v| u.threshold_speed = v.scalar()),
    bg(ParamKey::ThresholdValue, |u, v| u.threshold_value = v.scalar()),
    bg(ParamKey::ScrollSpeed, |u, v| u.scroll_speed = v.scalar()),
    bg(ParamKey::FbmOctaves, |u, v| u.fbm_octaves = v.int()),
    bg(ParamKey::FbmGain, |u, v| u.fbm_gain = v.scalar()),
    bg(ParamKey::FbmLacunarity, |u, v| u.fbm_lacunarity = v.scalar()),
    bg(ParamKey::Speed, |u, v| u.speed = v.scalar()),
    ascii(ParamKey::AsciiColor, |u, v| u.color = v.rgb().to_unit()),
    ascii(ParamKey::AsciiBgColor, |u, v| {
        u.background_color = v.rgb().to_unit()
    }),
];

pub fn binding_for(key: ParamKey) -> Option<&'static ParamBinding> {
    PARAM_BINDINGS.iter().find(|b| b.key == key)
}

/// Register one listener per binding row against the given uniform handles.
pub fn subscribe_all(
    store: &mut ParameterStore,
    background: &Rc<RefCell<BackgroundUniforms>>,
    ascii: &Rc<RefCell<AsciiUniforms>>,
) {
    for binding in PARAM_BINDINGS.iter() {
        match binding.write {
            UniformWrite::Background(write) => {
                let target = background.clone();
                store.subscribe(
                    binding.key,
                    Box::new(move |_, v| write(&mut target.borrow_mut(), v)),
                );
            }
            UniformWrite::Ascii(write) => {
                let target = ascii.clone();
                store.subscribe(
                    binding.key,
                    Box::new(move |_, v| write(&mut target.borrow_mut(), v)),
                );
            }
        }
    }
    log::debug!("[params] {} uniform bindings wired", PARAM_BINDINGS.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_exactly_one_binding() {
        for key in ParamKey::ALL {
            let n = PARAM_BINDINGS.iter().filter(|b| b.key == key).count();
            assert_eq!(n, 1, "{} bound {} times", key.name(), n);
        }
    }
}
