//! Synthetic browser fingerprint.
//!
//! The key set and value types are fixed; only values vary. Field order
//! follows the page script, and the wire keys (`x1`..`x82`) are kept as
//! serde renames.

use rand::Rng;
use serde::Serialize;

use rednote_sign_core::Cookies;

use crate::profile::DeviceProfile;

const PLUGINS: &str =
    "PDF Viewer,Chrome PDF Viewer,Chromium PDF Viewer,Microsoft Edge PDF Viewer,WebKit built-in PDF";
const FEATURE_BITS: &str = "0|0|0|0|0|0|0|0|0|1|0|0|0|0|0|0|0|0|1|0|0|0|0|0";
const API_BITS: &str =
    "0|0|1|0|1|0|0|0|0|0|1|0|1|0|1|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0";
const FONT_STACK: &str = "system-ui, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\", \
    \"Noto Color Emoji\", -apple-system, \"Segoe UI\", Roboto, Ubuntu, Cantarell, \
    \"Noto Sans\", sans-serif, BlinkMacSystemFont, \"Helvetica Neue\", Arial, \
    \"PingFang SC\", \"PingFang TC\", \"PingFang HK\", \"Microsoft Yahei\", \
    \"Microsoft JhengHei\"";
const LANDING_PAGE: &str = "https://www.xiaohongshu.com/explore";

/// Width of the measured text probe.
const TEXT_PROBE_WIDTH: f64 = 290.828125;
const TEXT_PROBE_HEIGHT: u32 = 18;

/// `document.referrer`, `location.href` and frame depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfo {
    pub referer: &'static str,
    pub location: &'static str,
    pub frame: u32,
}

/// Bounding box of the font-probe element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMetrics {
    pub x: u32,
    pub y: u32,
    pub left: u32,
    pub right: f64,
    pub bottom: u32,
    pub height: u32,
    pub top: u32,
    pub width: f64,
    pub font: &'static str,
}

impl TextMetrics {
    fn at(y: u32) -> Self {
        Self {
            x: 0,
            y,
            left: 0,
            right: TEXT_PROBE_WIDTH,
            bottom: y + TEXT_PROBE_HEIGHT,
            height: TEXT_PROBE_HEIGHT,
            top: y,
            width: TEXT_PROBE_WIDTH,
            font: FONT_STACK,
        }
    }
}

/// A browser environment descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fingerprint {
    #[serde(rename = "x1")]
    pub user_agent: String,
    #[serde(rename = "x2")]
    pub webdriver: &'static str,
    #[serde(rename = "x3")]
    pub language: &'static str,
    #[serde(rename = "x4")]
    pub color_depth: u8,
    #[serde(rename = "x5")]
    pub device_memory_gb: u8,
    #[serde(rename = "x6")]
    pub pixel_depth: &'static str,
    /// `vendor,renderer`
    #[serde(rename = "x7")]
    pub webgl_vendor_renderer: String,
    #[serde(rename = "x8")]
    pub hardware_concurrency: u8,
    /// `width;height`
    #[serde(rename = "x9")]
    pub resolution: String,
    /// `availWidth;availHeight`
    #[serde(rename = "x10")]
    pub available_resolution: String,
    #[serde(rename = "x11")]
    pub timezone_offset: &'static str,
    #[serde(rename = "x12")]
    pub timezone: &'static str,
    #[serde(rename = "x13")]
    pub session_storage: &'static str,
    #[serde(rename = "x14")]
    pub local_storage: &'static str,
    #[serde(rename = "x15")]
    pub indexed_db: &'static str,
    #[serde(rename = "x16")]
    pub add_behavior: &'static str,
    #[serde(rename = "x17")]
    pub open_database: &'static str,
    #[serde(rename = "x18")]
    pub cpu_class: &'static str,
    #[serde(rename = "x19")]
    pub platform: &'static str,
    #[serde(rename = "x20")]
    pub do_not_track: &'static str,
    #[serde(rename = "x21")]
    pub plugins: &'static str,
    #[serde(rename = "x22")]
    pub canvas_hash: String,
    #[serde(rename = "x23")]
    pub lied_languages: &'static str,
    #[serde(rename = "x24")]
    pub lied_resolution: &'static str,
    #[serde(rename = "x25")]
    pub lied_os: &'static str,
    #[serde(rename = "x26")]
    pub lied_browser: &'static str,
    #[serde(rename = "x27")]
    pub touch_support: &'static str,
    #[serde(rename = "x28")]
    pub touch_points: &'static str,
    #[serde(rename = "x29")]
    pub font_probe: &'static str,
    #[serde(rename = "x30")]
    pub flash: &'static str,
    #[serde(rename = "x33")]
    pub automation_a: &'static str,
    #[serde(rename = "x34")]
    pub automation_b: &'static str,
    #[serde(rename = "x35")]
    pub automation_c: &'static str,
    /// `history.length`, drawn per call.
    #[serde(rename = "x36")]
    pub history_length: String,
    #[serde(rename = "x37")]
    pub feature_bits: &'static str,
    #[serde(rename = "x38")]
    pub api_bits: &'static str,
    #[serde(rename = "x39")]
    pub canvas_noise: u32,
    #[serde(rename = "x40")]
    pub battery_charging: &'static str,
    #[serde(rename = "x41")]
    pub battery_level: &'static str,
    #[serde(rename = "x42")]
    pub sdk_version: &'static str,
    #[serde(rename = "x43")]
    pub sdk_hash: &'static str,
    /// Milliseconds, as a decimal string.
    #[serde(rename = "x44")]
    pub timestamp: String,
    #[serde(rename = "x45")]
    pub security_markers: &'static str,
    #[serde(rename = "x46")]
    pub devtools_open: &'static str,
    #[serde(rename = "x47")]
    pub media_flags: &'static str,
    #[serde(rename = "x48")]
    pub reserved_48: &'static str,
    #[serde(rename = "x49")]
    pub injected_list: &'static str,
    #[serde(rename = "x50")]
    pub reserved_50: &'static str,
    #[serde(rename = "x51")]
    pub reserved_51: &'static str,
    #[serde(rename = "x52")]
    pub reserved_52: &'static str,
    #[serde(rename = "x55")]
    pub audio_latencies: &'static str,
    /// `vendor|renderer|hash|35`
    #[serde(rename = "x56")]
    pub webgl_fingerprint: String,
    /// Session cookies joined with `"; "`.
    #[serde(rename = "x57")]
    pub cookie_string: String,
    #[serde(rename = "x58")]
    pub max_touch_span: &'static str,
    #[serde(rename = "x59")]
    pub mime_types: &'static str,
    #[serde(rename = "x60")]
    pub window_keys: &'static str,
    #[serde(rename = "x61")]
    pub document_keys: &'static str,
    #[serde(rename = "x62")]
    pub navigator_keys: &'static str,
    #[serde(rename = "x63")]
    pub reserved_63: &'static str,
    #[serde(rename = "x64")]
    pub reserved_64: &'static str,
    #[serde(rename = "x65")]
    pub reserved_65: &'static str,
    #[serde(rename = "x66")]
    pub page: PageInfo,
    #[serde(rename = "x67")]
    pub visibility: &'static str,
    #[serde(rename = "x68")]
    pub reserved_68: &'static str,
    #[serde(rename = "x69")]
    pub viewport: &'static str,
    #[serde(rename = "x70")]
    pub location_keys: Vec<&'static str>,
    #[serde(rename = "x71")]
    pub cookie_enabled: &'static str,
    #[serde(rename = "x72")]
    pub ready_state: &'static str,
    #[serde(rename = "x73")]
    pub dom_nodes: &'static str,
    #[serde(rename = "x74")]
    pub mouse: &'static str,
    #[serde(rename = "x75")]
    pub navigator_vendor: &'static str,
    #[serde(rename = "x76")]
    pub on_line: &'static str,
    #[serde(rename = "x77")]
    pub prototype_checks: &'static str,
    #[serde(rename = "x78")]
    pub text_metrics: TextMetrics,
    #[serde(rename = "x82")]
    pub obfuscation_markers: &'static str,
    #[serde(rename = "x31")]
    pub audio_sum: &'static str,
    #[serde(rename = "x79")]
    pub performance_memory: &'static str,
    #[serde(rename = "x53")]
    pub device_hash: String,
    #[serde(rename = "x54")]
    pub speech_voices: &'static str,
    #[serde(rename = "x80")]
    pub file_system: &'static str,
}

impl Fingerprint {
    /// Draw a new device and build a fingerprint for it.
    pub fn generate<R: Rng + ?Sized>(
        cookies: &Cookies,
        user_agent: &str,
        timestamp_millis: u64,
        rng: &mut R,
    ) -> Self {
        let profile = DeviceProfile::generate(rng);
        Self::from_profile(&profile, cookies, user_agent, timestamp_millis, rng)
    }

    /// Build a fingerprint for an existing device.
    ///
    /// Only `history_length` and the text-probe position are drawn here, so
    /// repeated calls with one profile describe the same device.
    pub fn from_profile<R: Rng + ?Sized>(
        profile: &DeviceProfile,
        cookies: &Cookies,
        user_agent: &str,
        timestamp_millis: u64,
        rng: &mut R,
    ) -> Self {
        let gpu = profile.gpu;
        let screen = profile.screen;
        let storage = if profile.storage_available { "true" } else { "false" };
        let history_length: u32 = rng.gen_range(1..=20);
        let probe_y: u32 = rng.gen_range(2350..=2450);

        Self {
            user_agent: user_agent.to_string(),
            webdriver: "false",
            language: "zh-CN",
            color_depth: profile.color_depth,
            device_memory_gb: profile.device_memory_gb,
            pixel_depth: "24",
            webgl_vendor_renderer: format!("{},{}", gpu.vendor, gpu.renderer),
            hardware_concurrency: profile.hardware_concurrency,
            resolution: format!("{};{}", screen.width, screen.height),
            available_resolution: format!("{};{}", screen.avail_width, screen.avail_height),
            timezone_offset: "-480",
            timezone: "Asia/Shanghai",
            session_storage: storage,
            local_storage: storage,
            indexed_db: storage,
            add_behavior: "false",
            open_database: "false",
            cpu_class: "un",
            platform: "Win32",
            do_not_track: "",
            plugins: PLUGINS,
            canvas_hash: profile.canvas_hash.clone(),
            lied_languages: "false",
            lied_resolution: "false",
            lied_os: "false",
            lied_browser: "false",
            touch_support: "false",
            touch_points: "0,false,false",
            font_probe: "4,7,8",
            flash: "swf object not loaded",
            automation_a: "0",
            automation_b: "0",
            automation_c: "0",
            history_length: history_length.to_string(),
            feature_bits: FEATURE_BITS,
            api_bits: API_BITS,
            canvas_noise: 0,
            battery_charging: "0",
            battery_level: "0",
            sdk_version: "3.4.4",
            sdk_hash: "742cc32c",
            timestamp: timestamp_millis.to_string(),
            security_markers: "__SEC_CAV__1-1-1-1-1|__SEC_WSA__|",
            devtools_open: "false",
            media_flags: "1|0|0|0|0|0",
            reserved_48: "",
            injected_list: "{list:[],type:}",
            reserved_50: "",
            reserved_51: "",
            reserved_52: "",
            audio_latencies: "380,380,360,400,380,400,420,380,400,400,360,360,440,420",
            webgl_fingerprint: format!("{}|{}|{}|35", gpu.vendor, gpu.renderer, profile.webgl_hash),
            cookie_string: cookies.to_header(),
            max_touch_span: "180",
            mime_types: "2",
            window_keys: "63",
            document_keys: "1291",
            navigator_keys: "2047",
            reserved_63: "0",
            reserved_64: "0",
            reserved_65: "0",
            page: PageInfo {
                referer: "",
                location: LANDING_PAGE,
                frame: 0,
            },
            visibility: "1|0",
            reserved_68: "0",
            viewport: "326|1292|30",
            location_keys: vec!["location"],
            cookie_enabled: "true",
            ready_state: "complete",
            dom_nodes: "1191",
            mouse: "0|0|0",
            navigator_vendor: "Google Inc.",
            on_line: "true",
            prototype_checks: "1|1|1|1|1|1|1|1|1|1",
            text_metrics: TextMetrics::at(probe_y),
            obfuscation_markers: "_0x17a2|_0x1954",
            audio_sum: "124.04347527516074",
            performance_memory: "144|599565058866",
            device_hash: profile.device_hash.clone(),
            speech_voices: "10311144241322244122",
            file_system: "1|[object FileSystemDirectoryHandle]",
        }
    }
}
