use std::future::Future;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    ImmersiveAr,
    ImmersiveVr,
    Inline,
}

impl SessionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImmersiveAr => "immersive-ar",
            Self::ImmersiveVr => "immersive-vr",
            Self::Inline => "inline",
        }
    }
}

/// Asks the host whether it can run an XR session of the given mode.
pub trait XrCapability {
    fn is_session_supported(&self, mode: SessionMode) -> impl Future<Output = bool> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FixedCapability {
    pub ar: bool,
}

impl XrCapability for FixedCapability {
    async fn is_session_supported(&self, mode: SessionMode) -> bool {
        match mode {
            SessionMode::ImmersiveAr => self.ar,
            SessionMode::ImmersiveVr => false,
            SessionMode::Inline => true,
        }
    }
}
