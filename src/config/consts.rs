// src/config/consts.rs

// Picker
pub const HOVER_CLASS: &str = "pick-csv-hover";
pub const PICKER_STYLE_ID: &str = "picker-styles";
pub const PICKER_CSS: &str =
    ".pick-csv-hover { outline: 2px solid #4285f4 !important; cursor: pointer !important; }";

// Enhancement markup
pub const ENHANCED_ATTR: &str = "data-enhanced";
pub const SELECT_ALL_CLASS: &str = "select-all-checkbox";
pub const ROW_CHECKBOX_CLASS: &str = "row-checkbox";
pub const LIST_WRAPPER_CLASS: &str = "list-checkbox-wrapper";
pub const PANEL_CLASS: &str = "csv-button-container";
pub const INVERT_BTN_CLASS: &str = "invert-selection-btn";
pub const DOWNLOAD_BTN_CLASS: &str = "csv-download-btn";
pub const INVERT_LABEL: &str = "Invert Selection";
pub const DOWNLOAD_LABEL: &str = "Download as CSV";

// Text extraction
pub const BOILERPLATE_TAGS: &[&str] = &["style", "script"];
pub const BOILERPLATE_CLASSES: &[&str] = &["mw-parser-output"];
pub const REFERENCE_TAG: &str = "sup";
pub const REFERENCE_CLASS: &str = "reference";

// Export
pub const CHECK_GLYPH: &str = "✓";
pub const NO_CONTROL_PLACEHOLDER: &str = "Selected";
pub const LIST_HEADERS: [&str; 2] = ["Selected", "Text"];
pub const TABLE_FILENAME: &str = "table-data.csv";
pub const LIST_FILENAME: &str = "list-data.csv";
pub const BOM: &str = "\u{FEFF}";
pub const DEFAULT_OUT_DIR: &str = "downloads";

// Drag-select
pub const DRAG_THRESHOLD_MS: u64 = 200;

// Logging
pub const LOG_FILE: &str = ".pick_csv/debug.log";
