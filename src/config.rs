use std::time::Duration;

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum CameraBackend {
    Native { index: u32, open_timeout: Duration },
    Fake,
}

#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq)]
pub enum EndpointBackend {
    Http { url: String, request_timeout: Duration },
    Fake,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub window_title: String,
    pub endpoint: EndpointBackend,
    pub capture_width: u32,
    pub capture_height: u32,
    pub submitted_display_duration: Duration,
    pub preview_refresh_rate: Duration,
    pub camera: CameraBackend,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Absensi Karyawan".to_string(),
            endpoint: EndpointBackend::Http {
                url: "https://script.google.com/macros/s/AKfycbylB5rKGO6rFg4d8O28TZvP22x4qb7WC9DyGkGowv3z5Q5QzgqIA_wtos5_6C3gTdl6/exec".to_string(),
                request_timeout: Duration::from_secs(30),
            },
            capture_width: 300,
            capture_height: 200,
            submitted_display_duration: Duration::from_secs(3),
            preview_refresh_rate: Duration::from_millis(33),
            camera: CameraBackend::Native {
                index: 0,
                open_timeout: Duration::from_secs(5),
            },
            logger_timezone: western_indonesia_time(),
        }
    }
}

fn western_indonesia_time() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset")
}
