use once_cell::sync::Lazy;

pub static CONFIG: Lazy<ReservationConfig> = Lazy::new(ReservationConfig::default);

#[derive(Debug, Clone)]
pub struct ReservationConfig {
    /// Element carrying the site's confirmation text after a reservation
    /// attempt.
    pub result_selector: String,
    /// Substring of the confirmation text that marks a completed
    /// reservation. The site reports outcome only as free text.
    pub success_text: String,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            result_selector: "#reservedEtcText".to_string(),
            success_text: "予約済みです".to_string(),
        }
    }
}

/// Opens the per-program reservation panel. Returns false when the control
/// is absent.
pub const OPEN_DETAIL_SCRIPT: &str = r#"() => {
    const btn = document.getElementById('detailReserveBtn');
    if (!btn) {
        return false;
    }
    btn.click();
    return true;
}"#;

/// Clicks the confirm control inside the now-visible reservation section.
/// Returns false when the section or control is absent.
pub const CONFIRM_RESERVE_SCRIPT: &str = r#"() => {
    const section = document.querySelector('.reserveSec');
    const btn = section ? section.querySelector('.reserveBtn') : null;
    if (!btn) {
        return false;
    }
    btn.click();
    return true;
}"#;

/// Reads the confirmation text, or null when the element is missing.
pub const READ_RESULT_SCRIPT: &str = r#"() => {
    const el = document.querySelector('#reservedEtcText');
    return el && el.innerText != null ? el.innerText : null;
}"#;
