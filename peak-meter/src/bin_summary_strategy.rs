#[allow(unused_imports)]
use micromath::F32Ext;

/// How the FFT bins inside one band are reduced to a single magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinSummary {
    Average,
    #[default]
    Max,
    Rms,
}

impl BinSummary {
    /// Empty slices summarise to 0.0.
    pub fn calculate(&self, bins: &[f32]) -> f32 {
        if bins.is_empty() {
            return 0.0;
        }
        let count = bins.len() as f32;

        match *self {
            BinSummary::Average => bins.iter().copied().sum::<f32>() / count,
            BinSummary::Max => bins.iter().copied().fold(0.0, f32::max),
            BinSummary::Rms => {
                let sum_of_squares: f32 = bins.iter().map(|&x| x * x).sum();
                (sum_of_squares / count).sqrt()
            }
        }
    }
}
