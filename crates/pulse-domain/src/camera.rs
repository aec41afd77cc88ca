//! Camera status as reported by the edge server

/// Reported status of a camera stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraStatus {
    /// Streaming
    Online,
    /// Not streaming
    Offline,
}

impl CameraStatus {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraStatus::Online => "Online",
            CameraStatus::Offline => "Offline",
        }
    }

    /// Parse a status label. Anything other than "online" is offline.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("online") {
            CameraStatus::Online
        } else {
            CameraStatus::Offline
        }
    }
}

/// A camera and its stream quality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    /// Camera identifier (e.g. "CAM-01")
    pub camera_id: String,
    /// Current status
    pub status: CameraStatus,
    /// Stream quality label (e.g. "HD")
    pub stream_quality: String,
}

impl Camera {
    /// Create a new camera entry
    pub fn new(
        camera_id: impl Into<String>,
        status: CameraStatus,
        stream_quality: impl Into<String>,
    ) -> Self {
        Self {
            camera_id: camera_id.into(),
            status,
            stream_quality: stream_quality.into(),
        }
    }

    /// Whether the camera is streaming
    pub fn is_online(&self) -> bool {
        self.status == CameraStatus::Online
    }

    /// Rows shown when the server returns no cameras
    pub fn placeholders() -> Vec<Camera> {
        vec![
            Camera::new("CAM-01", CameraStatus::Online, "HD"),
            Camera::new("CAM-02", CameraStatus::Online, "HD"),
            Camera::new("CAM-03", CameraStatus::Offline, "—"),
        ]
    }
}
