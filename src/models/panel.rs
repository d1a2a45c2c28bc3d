/// Physical panel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub width: u32,
    pub height: u32,
}

impl PanelSpec {
    /// 7.3" six-color Spectra panel: 800x480
    pub const SPECTRA6: Self = Self {
        width: 800,
        height: 480,
    };
}
