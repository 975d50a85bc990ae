/// Whether the field is allowed to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionPreference {
    #[default]
    Full,
    /// Particles hold their positions; pointer growth still applies.
    Reduced,
}

impl MotionPreference {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            MotionPreference::Full => MotionPreference::Reduced,
            MotionPreference::Reduced => MotionPreference::Full,
        }
    }

    pub fn is_reduced(self) -> bool {
        self == MotionPreference::Reduced
    }
}
