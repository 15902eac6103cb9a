//! Confidence Bands
//!
//! The four pLDDT ranges used when coloring predicted structures.
use itertools::Itertools;
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ConfidenceBand {
    #[strum(serialize = "very low")]
    VeryLow,
    #[strum(serialize = "low")]
    Low,
    #[strum(serialize = "confident")]
    Confident,
    #[strum(serialize = "very high")]
    VeryHigh,
}

impl ConfidenceBand {
    /// Lower (inclusive) and upper bound of the band.
    pub const fn bounds(&self) -> (f64, f64) {
        match self {
            Self::VeryLow => (0.0, 50.0),
            Self::Low => (50.0, 70.0),
            Self::Confident => (70.0, 90.0),
            Self::VeryHigh => (90.0, 100.0),
        }
    }

    pub const fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::VeryLow => (0xFF, 0x7D, 0x45),
            Self::Low => (0xFF, 0xDB, 0x13),
            Self::Confident => (0x65, 0xCB, 0xF3),
            Self::VeryHigh => (0x00, 0x53, 0xD6),
        }
    }

    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    pub const fn legend_label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very low (pLDDT < 50)",
            Self::Low => "Low (70 > pLDDT > 50)",
            Self::Confident => "Confident (90 > pLDDT > 70)",
            Self::VeryHigh => "Very high (pLDDT > 90)",
        }
    }

    /// Values outside [0, 100] clamp to the outer bands.
    pub fn classify(value: f64) -> Self {
        Self::iter()
            .find(|band| value < band.bounds().1)
            .unwrap_or(Self::VeryHigh)
    }
}

/// Residue counts per band for one confidence sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    counts: Vec<(ConfidenceBand, usize)>,
    total: usize,
}

impl BandSummary {
    pub fn from_confidence(confidence: &[f64]) -> Self {
        let counts = confidence
            .iter()
            .map(|&v| ConfidenceBand::classify(v))
            .counts();
        Self {
            counts: ConfidenceBand::iter()
                .map(|band| (band, counts.get(&band).copied().unwrap_or(0)))
                .collect(),
            total: confidence.len(),
        }
    }

    pub fn count(&self, band: ConfidenceBand) -> usize {
        self.counts
            .iter()
            .find(|(b, _)| *b == band)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Share of residues in `band`, 0.0 for an empty sequence.
    pub fn fraction(&self, band: ConfidenceBand) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(band) as f64 / self.total as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ConfidenceBand, usize)> {
        self.counts.iter()
    }
}

impl std::fmt::Display for BandSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = ConfidenceBand::iter()
            .map(|band| format!("{band}: {:.1}%", 100.0 * self.fraction(band)))
            .join(", ");
        write!(f, "{parts}")
    }
}
