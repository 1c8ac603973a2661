//! Is there enough data to fine-tune on?

use mimic_constant::defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataVolume {
    /// Fewer than 500 pairs.
    Insufficient,
    /// 500 to 1999 pairs.
    Baseline,
    /// 2000 pairs or more.
    Plenty,
}

impl DataVolume {
    pub fn assess(pairs: usize) -> Self {
        if pairs < defaults::MIN_RECOMMENDED_PAIRS {
            DataVolume::Insufficient
        } else if pairs < defaults::GOOD_PAIRS {
            DataVolume::Baseline
        } else {
            DataVolume::Plenty
        }
    }

    pub fn is_sufficient(&self) -> bool {
        !matches!(self, DataVolume::Insufficient)
    }

    pub fn headline(&self) -> &'static str {
        match self {
            DataVolume::Insufficient => "Not enough data to train on: at least 500 dialogues are needed.",
            DataVolume::Baseline => "Enough data for basic training (500-2000 dialogues).",
            DataVolume::Plenty => "Plenty of data (2000+ dialogues).",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            DataVolume::Insufficient => "Export more chats, or augment the data you have.",
            DataVolume::Baseline => "The model will work, but reply quality may be average.",
            DataVolume::Plenty => "The model should pick up your style well.",
        }
    }
}
