use poster_core::stats::FpsMeter;
use web_sys as web;

use crate::constants::{STATS_ID, STATS_STYLE};
use crate::dom::js_err;

/// Fixed FPS readout. The node is created with the scene and removed on dispose.
pub struct StatsOverlay {
    node: web::Element,
    meter: FpsMeter,
}

impl StatsOverlay {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let node = document.create_element("div").map_err(js_err)?;
        node.set_id(STATS_ID);
        node.set_attribute("style", STATS_STYLE).map_err(js_err)?;
        node.set_text_content(Some("-- FPS"));
        document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no body"))?
            .append_child(&node)
            .map_err(js_err)?;
        Ok(Self {
            node,
            meter: FpsMeter::default(),
        })
    }

    pub fn record(&mut self, now_ms: f64) {
        if let Some(report) = self.meter.record(now_ms) {
            self.node.set_text_content(Some(&format!(
                "{:.2} FPS  {:.2} ms",
                report.fps, report.frame_ms
            )));
        }
    }

    pub fn remove(self) {
        self.node.remove();
    }
}
