/// DOM-facing constants for the web front-end.
///
/// Scene tuning lives in `poster_core::constants`; this file only names the
/// elements and styles the page relies on.
// Canvas the WebGPU surface is created on
pub const CANVAS_ID: &str = "app-canvas";

// Debug panel
pub const PANEL_ID: &str = "poster-debug-panel";
pub const PANEL_TITLE: &str = "Background Shader Controls";
pub const PANEL_STYLE: &str = "position:fixed;top:8px;right:8px;z-index:10;max-height:90vh;\
overflow:auto;font:11px/1.4 monospace;color:#ddd;background:rgba(20,20,28,0.85);\
padding:6px 8px;border-radius:6px;min-width:220px";
pub const PANEL_ROW_STYLE: &str = "display:flex;align-items:center;gap:6px;margin:2px 0";
pub const PANEL_LABEL_STYLE: &str = "flex:0 0 90px";
pub const PANEL_VALUE_STYLE: &str = "flex:0 0 42px;text-align:right";

// Folder shown expanded on first load
pub const PANEL_OPEN_FOLDER: &str = "Offset";

// Diagnostics overlay
pub const STATS_ID: &str = "poster-stats";
pub const STATS_STYLE: &str = "position:fixed;top:0;left:0;z-index:10;padding:2px 6px;\
font:11px monospace;color:#0f0;background:rgba(0,0,0,0.6);pointer-events:none";

// Atlas glyph drawing
pub const ATLAS_FONT_FAMILY: &str = "arial";
pub const ATLAS_FILL_STYLE: &str = "blue";

// Fallback assets
pub const FALLBACK_POSTER_RGBA: [u8; 4] = [200, 200, 200, 255];
pub const FALLBACK_POSTER_PX: u32 = 2;
pub const FALLBACK_ENVIRONMENT_RGBA: [u8; 4] = [255, 255, 255, 255];
