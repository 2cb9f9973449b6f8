/// Camera-side failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera device error: {0}")]
    Device(String),
    #[error("torch is not supported by this camera")]
    TorchUnsupported,
    #[error("torch constraint rejected: {0}")]
    Torch(String),
}

/// OCR engine failures.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecognizeError {
    #[error("OCR engine failed to initialize: {0}")]
    Init(String),
    #[error("OCR recognition failed: {0}")]
    Recognize(String),
}

/// Barcode decoder outcomes other than a successful read.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Nothing decodable in the current frame; expected most of the time.
    #[error("no barcode found in frame")]
    NotFound,
    #[error("barcode decoder error: {0}")]
    Other(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("vehicle registry unavailable: {0}")]
    Unavailable(String),
}

/// Errors that end a session before its loop starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Recognizer(#[from] RecognizeError),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
