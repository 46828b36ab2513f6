//! DOM debug panel generated from the parameter table.
//!
//! One folder per `ParamSpec::folder`, one input per parameter: range
//! sliders for numeric entries, color pickers for RGB ones. Inputs forward
//! to a sink which returns the value actually stored (after clamping).

use std::rc::Rc;

use poster_core::params::{ParamKind, ParamSpec, PARAM_SPECS};
use poster_core::{ParamKey, ParamValue, Params, Rgb8};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    PANEL_ID, PANEL_LABEL_STYLE, PANEL_OPEN_FOLDER, PANEL_ROW_STYLE, PANEL_STYLE, PANEL_TITLE,
    PANEL_VALUE_STYLE,
};
use crate::dom::{self, js_err};

pub type ParamSink = Rc<dyn Fn(ParamKey, ParamValue) -> Option<ParamValue>>;

type InputListener = Closure<dyn FnMut(web::Event)>;

pub struct DebugPanel {
    root: web::Element,
    inputs: Vec<(web::HtmlInputElement, InputListener)>,
}

impl DebugPanel {
    pub fn new(document: &web::Document, values: &Params, sink: ParamSink) -> anyhow::Result<Self> {
        let root = document.create_element("details").map_err(js_err)?;
        root.set_id(PANEL_ID);
        root.set_attribute("style", PANEL_STYLE).map_err(js_err)?;
        append_text(document, &root, "summary", PANEL_TITLE)?;

        let mut folders: Vec<(&'static str, web::Element)> = Vec::new();
        let mut inputs = Vec::with_capacity(PARAM_SPECS.len());
        for spec in PARAM_SPECS.iter() {
            let folder = match folders.iter().find(|(name, _)| *name == spec.folder) {
                Some((_, el)) => el.clone(),
                None => {
                    let el = document.create_element("details").map_err(js_err)?;
                    if spec.folder == PANEL_OPEN_FOLDER {
                        el.set_attribute("open", "").map_err(js_err)?;
                    }
                    append_text(document, &el, "summary", spec.folder)?;
                    root.append_child(&el).map_err(js_err)?;
                    folders.push((spec.folder, el.clone()));
                    el
                }
            };
            inputs.push(build_row(document, &folder, spec, values.get(spec.key), sink.clone())?);
        }

        document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?
            .append_child(&root)
            .map_err(js_err)?;
        log::info!("[panel] {} controls in {} folders", inputs.len(), folders.len());
        Ok(Self { root, inputs })
    }

    /// Detach every input listener and remove the panel from the page.
    pub fn remove(self) {
        for (input, listener) in &self.inputs {
            let _ = input
                .remove_event_listener_with_callback("input", listener.as_ref().unchecked_ref());
        }
        self.root.remove();
    }
}

fn append_text(
    document: &web::Document,
    parent: &web::Element,
    tag: &str,
    text: &str,
) -> anyhow::Result<web::Element> {
    let el = document.create_element(tag).map_err(js_err)?;
    el.set_text_content(Some(text));
    parent.append_child(&el).map_err(js_err)?;
    Ok(el)
}

fn build_row(
    document: &web::Document,
    folder: &web::Element,
    spec: &'static ParamSpec,
    initial: ParamValue,
    sink: ParamSink,
) -> anyhow::Result<(web::HtmlInputElement, InputListener)> {
    let row = document.create_element("div").map_err(js_err)?;
    row.set_attribute("style", PANEL_ROW_STYLE).map_err(js_err)?;
    append_text(document, &row, "span", spec.label)?
        .set_attribute("style", PANEL_LABEL_STYLE)
        .map_err(js_err)?;

    let input: web::HtmlInputElement = dom::create_element(document, "input")?;
    match (spec.range, initial) {
        (Some(range), value) => {
            input.set_type("range");
            input.set_min(&range.min.to_string());
            input.set_max(&range.max.to_string());
            input.set_step(&range.step.to_string());
            input.set_value(&value.scalar().to_string());
        }
        (None, value) => {
            input.set_type("color");
            input.set_value(&value.rgb().to_hex());
        }
    }
    row.append_child(&input).map_err(js_err)?;
    let readout = append_text(document, &row, "span", &format_value(initial))?;
    readout
        .set_attribute("style", PANEL_VALUE_STYLE)
        .map_err(js_err)?;
    folder.append_child(&row).map_err(js_err)?;

    let key = spec.key;
    let input_ev = input.clone();
    let listener = Closure::wrap(Box::new(move |_ev: web::Event| {
        let raw = input_ev.value();
        let parsed = match key.kind() {
            ParamKind::Rgb => Rgb8::from_hex(&raw).ok().map(ParamValue::Rgb),
            ParamKind::Scalar | ParamKind::Int => raw.parse::<f32>().ok().map(ParamValue::Scalar),
        };
        let Some(value) = parsed else {
            log::warn!("[panel] unparsable value {:?} for {}", raw, key.name());
            return;
        };
        if let Some(stored) = sink(key, value) {
            readout.set_text_content(Some(&format_value(stored)));
        }
    }) as Box<dyn FnMut(web::Event)>);
    input
        .add_event_listener_with_callback("input", listener.as_ref().unchecked_ref())
        .map_err(js_err)?;
    Ok((input, listener))
}

fn format_value(value: ParamValue) -> String {
    match value {
        ParamValue::Scalar(v) => format!("{v:.2}"),
        ParamValue::Int(v) => v.to_string(),
        ParamValue::Rgb(c) => c.to_hex(),
    }
}
