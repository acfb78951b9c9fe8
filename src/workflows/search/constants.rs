use once_cell::sync::Lazy;

pub static CONFIG: Lazy<SearchConfig> = Lazy::new(SearchConfig::default);

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Basic keyword input on the landing page; its presence marks the
    /// search UI as rendered.
    pub basic_input_selector: String,
    /// Container of the advanced search controls, visible once the detail
    /// toggle has been clicked.
    pub detail_panel_selector: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            basic_input_selector: "#frwSwhInp".to_string(),
            detail_panel_selector: "#frwSwhDtlArea".to_string(),
        }
    }
}

/// Expands the advanced search panel. Returns false when the toggle is
/// absent.
pub const EXPAND_DETAIL_SCRIPT: &str = r#"() => {
    const toggle = document.querySelector('#frwSwhDtlBtn');
    if (!toggle) {
        return false;
    }
    toggle.click();
    return true;
}"#;

/// Fills the keyword field. Returns false when the field is absent.
pub const FILL_KEYWORD_SCRIPT: &str = r#"(keyword) => {
    const field = document.getElementById('frwSwhInp');
    if (!field) {
        return false;
    }
    field.value = keyword;
    return true;
}"#;

/// Reconciles the channel-type checkboxes against the desired label set:
/// a checked box whose label is not wanted gets a simulated click (writing
/// the DOM property directly does not take effect on this UI). Returns the
/// labels that were toggled off.
pub const RECONCILE_CHANNELS_SCRIPT: &str = r#"(labels) => {
    const toggled = [];
    const boxes = document.querySelectorAll('#frwSwhDtlArea input[type="checkbox"]');
    boxes.forEach((box) => {
        const label = box.closest('label');
        const text = label ? label.innerText.trim() : '';
        if (text !== '' && box.checked && !labels.includes(text)) {
            box.click();
            toggled.push(text);
        }
    });
    return toggled;
}"#;

/// Submits the search. Returns false when the button is absent.
pub const SUBMIT_SEARCH_SCRIPT: &str = r#"() => {
    const btn = document.getElementById('frwSwhBtn');
    if (!btn) {
        return false;
    }
    btn.click();
    return true;
}"#;

/// Reads every result node verbatim: title, link target, raw broadcast time
/// text and broadcaster name. Filtering and parsing happen on the client
/// side.
pub const EXTRACT_RESULTS_SCRIPT: &str = r#"() => {
    const records = [];
    document.querySelectorAll('.fwSearchMain .pgmInnArea').forEach((node) => {
        const title = node.querySelector('.pgmLinkTtl');
        const link = node.querySelector('.pgmLinkTtl a') || node.querySelector('a');
        const time = node.querySelector('.pgmTimeTxt');
        const broadcaster = node.querySelector('.pgmBcsTxt');
        records.push({
            title: title ? title.innerText.trim() : '',
            url: link ? (link.getAttribute('href') || '') : '',
            dateText: time ? time.innerText : '',
            broadcasterName: broadcaster ? broadcaster.innerText.trim() : ''
        });
    });
    return records;
}"#;
