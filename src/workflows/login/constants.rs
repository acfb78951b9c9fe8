use once_cell::sync::Lazy;

pub static CONFIG: Lazy<LoginConfig> = Lazy::new(LoginConfig::default);

#[derive(Debug, Clone)]
pub struct LoginConfig {
    /// Login page path, relative to the site base.
    pub login_path: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_path: "login/".to_string(),
        }
    }
}

/// Locates the CAPTCHA image by its source filename, rasterizes it through a
/// canvas and returns it as a JPEG data URL. Returns null when no matching
/// image is on the page (markup changed, or already logged in).
pub const CAPTCHA_EXTRACT_SCRIPT: &str = r#"() => {
    const images = Array.from(document.getElementsByTagName('img'));
    const captcha = images.find((img) => img.src && img.src.match(/captcha\.jpg/));
    if (!captcha) {
        return null;
    }
    const canvas = document.createElement('canvas');
    canvas.width = captcha.width;
    canvas.height = captcha.height;
    canvas.getContext('2d').drawImage(captcha, 0, 0);
    return canvas.toDataURL('image/jpeg');
}"#;

/// Fills the login form and enables auto-login. Returns false when any of
/// the expected fields is absent.
pub const FILL_FORM_SCRIPT: &str = r#"(args) => {
    const id = document.getElementById('loginId');
    const password = document.getElementById('loginPass');
    const captcha = document.getElementById('loginImgNm');
    const autologin = document.getElementById('autologin');
    if (!id || !password || !captcha || !autologin) {
        return false;
    }
    id.value = args.loginId;
    password.value = args.password;
    captcha.value = args.captchaAnswer;
    autologin.checked = true;
    return true;
}"#;

/// Submits the login form. Returns false when the button is absent.
pub const SUBMIT_SCRIPT: &str = r#"() => {
    const btn = document.getElementById('loginBtn');
    if (!btn) {
        return false;
    }
    btn.click();
    return true;
}"#;
